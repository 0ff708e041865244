//! handlers/history_handler.rs
use actix_web::{web, HttpResponse};

use crate::handlers::HISTORY_LIMIT;
use crate::models::history_model::{HistoryEntryResponse, HistoryListResponse};
use crate::services::history_service::HistoryService;

/// GET /api/history/
pub async fn history_json_endpoint(history: web::Data<HistoryService>) -> HttpResponse {
    match history.list_recent(HISTORY_LIMIT).await {
        Ok(records) => HttpResponse::Ok().json(HistoryListResponse {
            history: records.iter().map(HistoryEntryResponse::from).collect(),
        }),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Internal server error",
            "details": format!("{:?}", e)
        })),
    }
}
