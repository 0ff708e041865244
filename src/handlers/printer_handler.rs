//! handlers/printer_handler.rs
//! Endpoints de estado, cola y página de prueba.

use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::handlers::{client_ip, close_record};
use crate::models::history_model::{NewPrintRecord, TEST_PAGE_FILENAME};
use crate::models::printer_model::{PrintQueueResponse, PrinterListResponse};
use crate::services::history_service::HistoryService;
use crate::services::printer_service::PrinterService;

/// GET /api/printer-status/
pub async fn printer_status_endpoint(printer: web::Data<PrinterService>) -> HttpResponse {
    HttpResponse::Ok().json(printer.get_status().await)
}

/// GET /api/print-queue/
pub async fn print_queue_endpoint(printer: web::Data<PrinterService>) -> HttpResponse {
    HttpResponse::Ok().json(PrintQueueResponse {
        queue: printer.get_print_queue().await,
    })
}

/// GET /api/printers/
pub async fn list_printers_endpoint(printer: web::Data<PrinterService>) -> HttpResponse {
    HttpResponse::Ok().json(PrinterListResponse {
        printers: printer.list_printers().await,
    })
}

/// GET /api/test-print/
/// Imprime la página de prueba y deja constancia en el historial.
pub async fn test_print_endpoint(
    req: HttpRequest,
    printer: web::Data<PrinterService>,
    history: web::Data<HistoryService>,
) -> HttpResponse {
    let mut record = match history
        .create(NewPrintRecord {
            filename: TEST_PAGE_FILENAME.to_string(),
            copies: 1,
            client_ip: client_ip(&req),
            ..Default::default()
        })
        .await
    {
        Ok(record) => record,
        Err(e) => {
            log::error!("No se pudo crear registro de página de prueba: {:?}", e);
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": format!("Could not record test page: {}", e)
            }));
        }
    };

    let outcome = printer.print_test_page().await;

    if let Err(e) = close_record(&history, &mut record, &outcome).await {
        log::error!("No se pudo cerrar registro {}: {:?}", record.id, e);
    }

    HttpResponse::Ok().json(outcome)
}
