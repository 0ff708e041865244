//! handlers/mod.rs
//! Módulo que agrupa los distintos handlers (páginas, impresora, subida, historial, QR).

use actix_web::{http::header, HttpRequest};
use anyhow::Result;

use crate::models::history_model::PrintHistoryRecord;
use crate::models::printer_model::PrintOutcome;
use crate::services::history_service::HistoryService;

pub mod history_handler;
pub mod page_handler;
pub mod printer_handler;
pub mod qr_handler;
pub mod upload_handler;

/// Cantidad de registros en la página principal.
pub const HOME_HISTORY_LIMIT: i64 = 10;
/// Cantidad de registros en /history/ y /api/history/.
pub const HISTORY_LIMIT: i64 = 50;

/// IP del cliente: primer valor de X-Forwarded-For, si no la del socket.
pub fn client_ip(req: &HttpRequest) -> Option<String> {
    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    forwarded.or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
}

/// Las llamadas AJAX del formulario mandan `X-Requested-With: XMLHttpRequest`.
pub fn is_ajax(req: &HttpRequest) -> bool {
    req.headers()
        .get("X-Requested-With")
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

/// Host tal como llegó en `Host`. `X-Forwarded-Host` y `Forwarded` se ignoran;
/// solo sin `Host` (HTTP/2) se usa lo que resuelve actix.
pub fn request_host(req: &HttpRequest) -> String {
    req.headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| req.connection_info().host().to_string())
}

/// Lleva el registro a su estado terminal y lo persiste.
/// Si el UPDATE falla se reintenta una vez antes de rendirse.
pub async fn close_record(
    history: &HistoryService,
    record: &mut PrintHistoryRecord,
    outcome: &PrintOutcome,
) -> Result<()> {
    record.settle(outcome)?;

    if let Err(first) = history.update(record).await {
        log::warn!("Reintentando cierre del registro {}: {:?}", record.id, first);
        if let Err(e) = history.update(record).await {
            log::error!(
                "Registro {} quedó en 'pending' (debía ser '{}'): {:?}",
                record.id,
                record.status,
                e
            );
            return Err(e);
        }
    }
    Ok(())
}
