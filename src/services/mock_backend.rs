//! services/mock_backend.rs
//! Sustituto determinista cuando no hay impresión nativa (desarrollo, tests).

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::printer_model::{PrintQueueEntry, PrinterStatus, PrinterStatusSnapshot};
use crate::services::printer_backend::PrinterBackend;

#[derive(Clone, Debug)]
pub struct MockBackend {
    printer_name: String,
}

impl MockBackend {
    pub fn new(printer_name: &str) -> Self {
        Self {
            printer_name: printer_name.to_string(),
        }
    }
}

#[async_trait]
impl PrinterBackend for MockBackend {
    fn kind(&self) -> &'static str {
        "mock"
    }

    async fn status(&self) -> Result<PrinterStatusSnapshot> {
        Ok(PrinterStatusSnapshot {
            name: self.printer_name.clone(),
            status: PrinterStatus::Online,
            status_code: 0,
            jobs_count: 0,
            is_default: true,
            message: "Printer is ready (Mock mode - native printing not available)".to_string(),
        })
    }

    async fn queue(&self) -> Result<Vec<PrintQueueEntry>> {
        Ok(Vec::new())
    }

    async fn print_file(&self, path: &Path, copies: i64) -> Result<String> {
        log::info!("Mock print: {:?} con {} copias", path, copies);
        Ok("File sent to printer (Mock mode)".to_string())
    }

    async fn print_test_page(&self) -> Result<String> {
        log::info!("Mock: página de prueba impresa");
        Ok("Test page sent to printer (Mock mode)".to_string())
    }

    async fn list_printers(&self) -> Result<Vec<String>> {
        Ok(vec![format!("{} (Mock)", self.printer_name)])
    }
}
