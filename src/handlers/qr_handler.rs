//! handlers/qr_handler.rs
use actix_web::{HttpRequest, HttpResponse};
use log::error;

use crate::handlers::request_host;
use crate::services::qr_service;

/// GET /qr-code/
/// PNG con `http://<host>/` para abrir la página desde el teléfono.
pub async fn qr_code_endpoint(req: HttpRequest) -> HttpResponse {
    let host = request_host(&req);
    let url = qr_service::upload_url(&host);

    match qr_service::render_png(&url) {
        Ok(png) => HttpResponse::Ok()
            .append_header(("Content-Type", "image/png"))
            .append_header(("Cache-Control", "no-cache"))
            .body(png),
        Err(e) => {
            error!("Error generando QR para {}: {:?}", url, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error",
                "details": format!("{:?}", e)
            }))
        }
    }
}
