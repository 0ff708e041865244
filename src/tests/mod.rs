//! tests/mod.rs
//! Utilidades compartidas por las pruebas.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tempfile::TempDir;

use crate::config::app_config::DEFAULT_PRINTER_NAME;
use crate::models::printer_model::{PrintQueueEntry, PrinterStatusSnapshot};
use crate::services::history_service::HistoryService;
use crate::services::mock_backend::MockBackend;
use crate::services::printer_backend::PrinterBackend;
use crate::services::printer_service::PrinterService;
use crate::services::upload_service::UploadService;

/// Backend que falla en todo, para probar la frontera de errores.
pub struct FailingBackend;

#[async_trait]
impl PrinterBackend for FailingBackend {
    fn kind(&self) -> &'static str {
        "failing"
    }

    async fn status(&self) -> Result<PrinterStatusSnapshot> {
        Err(anyhow!("spooler unreachable"))
    }

    async fn queue(&self) -> Result<Vec<PrintQueueEntry>> {
        Err(anyhow!("spooler unreachable"))
    }

    async fn print_file(&self, _path: &Path, _copies: i64) -> Result<String> {
        Err(anyhow!("printer rejected the job"))
    }

    async fn print_test_page(&self) -> Result<String> {
        Err(anyhow!("printer rejected the test page"))
    }

    async fn list_printers(&self) -> Result<Vec<String>> {
        Err(anyhow!("spooler unreachable"))
    }
}

/// Servicios listos sobre un directorio temporal.
pub struct TestContext {
    pub dir: TempDir,
    pub history: HistoryService,
    pub printer: PrinterService,
    pub uploads: UploadService,
}

impl TestContext {
    pub async fn with_backend(backend: Arc<dyn PrinterBackend>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let history = test_history(dir.path()).await;
        let printer = PrinterService::new(backend, DEFAULT_PRINTER_NAME);
        let uploads = UploadService::new(&dir.path().join("media"));
        Self {
            dir,
            history,
            printer,
            uploads,
        }
    }

    pub async fn mock() -> Self {
        Self::with_backend(Arc::new(MockBackend::new(DEFAULT_PRINTER_NAME))).await
    }

    pub fn media_file_count(&self) -> usize {
        std::fs::read_dir(self.uploads.media_dir())
            .map(|d| d.count())
            .unwrap_or(0)
    }
}

pub async fn test_history(dir: &Path) -> HistoryService {
    let pool = HistoryService::connect(&dir.join("print_history.db"))
        .await
        .expect("Failed to open test database");
    let service = HistoryService::new(pool, DEFAULT_PRINTER_NAME);
    service
        .run_migrations()
        .await
        .expect("Failed to run migrations");
    service
}

pub const BOUNDARY: &str = "----printserverboundary7MA4YWxk";

/// Arma un cuerpo multipart/form-data con `file` y `copies` opcionales.
pub fn multipart_body(file: Option<(&str, &[u8])>, copies: Option<&str>) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    if let Some(copies) = copies {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"copies\"\r\n\r\n{}\r\n",
                BOUNDARY, copies
            )
            .as_bytes(),
        );
    }
    if let Some((name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// App de prueba con los servicios del contexto.
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.printer.clone()))
                .app_data(actix_web::web::Data::new($ctx.history.clone()))
                .app_data(actix_web::web::Data::new($ctx.uploads.clone()))
                .configure(crate::app::init_app),
        )
        .await
    };
}

pub(crate) use test_app;

mod config_tests;
mod history_tests;
mod upload_tests;
