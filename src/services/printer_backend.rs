//! services/printer_backend.rs
//! Capacidad de impresión intercambiable: CUPS nativo o mock.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::app_config::{AppConfig, BackendMode};
use crate::models::printer_model::{PrintQueueEntry, PrinterStatusSnapshot};
use crate::services::cups_backend::CupsBackend;
use crate::services::mock_backend::MockBackend;

/// Operaciones crudas contra el sistema de impresión.
/// Pueden fallar; `PrinterService` convierte los errores en resultados.
#[async_trait]
pub trait PrinterBackend: Send + Sync {
    /// Nombre corto para logs ("cups", "mock").
    fn kind(&self) -> &'static str;

    async fn status(&self) -> Result<PrinterStatusSnapshot>;

    async fn queue(&self) -> Result<Vec<PrintQueueEntry>>;

    /// Devuelve el mensaje de éxito; no espera a que termine la impresión.
    async fn print_file(&self, path: &Path, copies: i64) -> Result<String>;

    async fn print_test_page(&self) -> Result<String>;

    async fn list_printers(&self) -> Result<Vec<String>>;
}

/// Elige el backend una sola vez al arrancar.
pub fn select_backend(config: &AppConfig) -> Result<Arc<dyn PrinterBackend>> {
    match config.backend {
        BackendMode::Mock => {
            log::info!("Backend de impresión: mock (forzado por configuración)");
            Ok(Arc::new(MockBackend::new(&config.printer_name)))
        }
        BackendMode::Cups => {
            let backend = CupsBackend::new(config)
                .context("PRINTER_BACKEND=cups pero CUPS no está disponible")?;
            log::info!("Backend de impresión: cups (impresora '{}')", config.printer_name);
            Ok(Arc::new(backend))
        }
        BackendMode::Auto => match CupsBackend::new(config) {
            Ok(backend) => {
                log::info!("Backend de impresión: cups (impresora '{}')", config.printer_name);
                Ok(Arc::new(backend))
            }
            Err(e) => {
                log::warn!("CUPS no disponible ({:#}), usando modo mock", e);
                Ok(Arc::new(MockBackend::new(&config.printer_name)))
            }
        },
    }
}
