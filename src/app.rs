//! app.rs
use crate::handlers::{
    history_handler, page_handler, printer_handler, qr_handler, upload_handler,
};
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(page_handler::home_page))
        .route("/history/", web::get().to(page_handler::history_page))
        .route("/qr-code/", web::get().to(qr_handler::qr_code_endpoint))
        .service(
            web::resource("/upload/")
                .route(web::post().to(upload_handler::upload_and_print_endpoint))
                .route(web::get().to(upload_handler::upload_get_endpoint)),
        )
        .service(
            web::scope("/api")
                .route(
                    "/printer-status/",
                    web::get().to(printer_handler::printer_status_endpoint),
                )
                .route(
                    "/print-queue/",
                    web::get().to(printer_handler::print_queue_endpoint),
                )
                .route(
                    "/printers/",
                    web::get().to(printer_handler::list_printers_endpoint),
                )
                .route(
                    "/test-print/",
                    web::get().to(printer_handler::test_print_endpoint),
                )
                .route(
                    "/history/",
                    web::get().to(history_handler::history_json_endpoint),
                ),
        );
}
