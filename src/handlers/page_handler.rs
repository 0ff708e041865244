//! handlers/page_handler.rs
//! Páginas HTML.

use actix_web::{http::header::ContentType, web, HttpResponse};

use crate::handlers::{HISTORY_LIMIT, HOME_HISTORY_LIMIT};
use crate::services::history_service::HistoryService;
use crate::services::printer_service::PrinterService;
use crate::templates;

/// GET /
pub async fn home_page(
    printer: web::Data<PrinterService>,
    history: web::Data<HistoryService>,
) -> HttpResponse {
    // Si falla la base, la página igual se muestra sin historial.
    let recent = history
        .list_recent(HOME_HISTORY_LIMIT)
        .await
        .unwrap_or_else(|e| {
            log::error!("Error leyendo historial: {:?}", e);
            Vec::new()
        });

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(templates::render_home(printer.printer_name(), &recent))
}

/// GET /history/
pub async fn history_page(
    printer: web::Data<PrinterService>,
    history: web::Data<HistoryService>,
) -> HttpResponse {
    match history.list_recent(HISTORY_LIMIT).await {
        Ok(records) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(templates::render_history(printer.printer_name(), &records)),
        Err(e) => {
            log::error!("Error leyendo historial: {:?}", e);
            HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body("Could not load print history")
        }
    }
}
