//! services/printer_service.rs
//! Frontera entre la capa web y la impresora. Ningún error cruza hacia afuera:
//! todo se convierte en snapshot centinela, lista vacía o `PrintOutcome`.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::config::app_config::AppConfig;
use crate::models::printer_model::{PrintOutcome, PrintQueueEntry, PrinterStatusSnapshot};
use crate::services::printer_backend::{select_backend, PrinterBackend};

#[derive(Clone)]
pub struct PrinterService {
    backend: Arc<dyn PrinterBackend>,
    printer_name: Arc<String>,
}

impl PrinterService {
    pub fn new(backend: Arc<dyn PrinterBackend>, printer_name: &str) -> Self {
        Self {
            backend,
            printer_name: Arc::new(printer_name.to_string()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let backend = select_backend(config)?;
        Ok(Self::new(backend, &config.printer_name))
    }

    pub fn printer_name(&self) -> &str {
        &self.printer_name
    }

    pub fn backend_kind(&self) -> &'static str {
        self.backend.kind()
    }

    pub async fn get_status(&self) -> PrinterStatusSnapshot {
        match self.backend.status().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("Error consultando estado de '{}': {:#}", self.printer_name, e);
                PrinterStatusSnapshot::probe_failed(&self.printer_name, &format!("{:#}", e))
            }
        }
    }

    pub async fn get_print_queue(&self) -> Vec<PrintQueueEntry> {
        self.backend.queue().await.unwrap_or_else(|e| {
            log::error!("Error getting print queue: {:#}", e);
            Vec::new()
        })
    }

    pub async fn list_printers(&self) -> Vec<String> {
        self.backend.list_printers().await.unwrap_or_else(|e| {
            log::error!("Error getting printers: {:#}", e);
            Vec::new()
        })
    }

    /// Envía un archivo ya guardado. Éxito = el sistema aceptó el trabajo.
    pub async fn print_file(&self, path: &Path, copies: i64) -> PrintOutcome {
        if copies < 1 {
            return PrintOutcome::failed(format!(
                "Error printing file: copies must be a positive integer (got {})",
                copies
            ));
        }
        if !path.is_file() {
            log::warn!("Archivo a imprimir no existe: {:?}", path);
            return PrintOutcome::failed(format!(
                "Error printing file: File not found: {}",
                path.display()
            ));
        }

        log::info!(
            "Enviando {:?} a '{}' ({} copias, backend={})",
            path,
            self.printer_name,
            copies,
            self.backend.kind()
        );
        match self.backend.print_file(path, copies).await {
            Ok(message) => PrintOutcome::ok(message),
            Err(e) => {
                log::error!("Fallo al imprimir {:?}: {:#}", path, e);
                PrintOutcome::failed(format!("Error printing file: {:#}", e))
            }
        }
    }

    pub async fn print_test_page(&self) -> PrintOutcome {
        log::info!(
            "Enviando página de prueba a '{}' (backend={})",
            self.printer_name,
            self.backend.kind()
        );
        match self.backend.print_test_page().await {
            Ok(message) => PrintOutcome::ok(message),
            Err(e) => {
                log::error!("Fallo en página de prueba: {:#}", e);
                PrintOutcome::failed(format!("Error printing test page: {:#}", e))
            }
        }
    }
}
