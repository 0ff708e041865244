//! handlers/upload_handler.rs
//! Subida de archivos + impresión.

use actix_multipart::{Multipart, MultipartError};
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;
use serde_json::json;

use crate::handlers::{client_ip, close_record, is_ajax};
use crate::models::history_model::NewPrintRecord;
use crate::models::upload_model::{FieldErrors, UploadErrorResponse, UploadForm, UploadResponse};
use crate::services::history_service::HistoryService;
use crate::services::printer_service::PrinterService;
use crate::services::upload_service::{UploadService, MAX_UPLOAD_BYTES};

/// Tope para campos de texto del formulario (copies).
const MAX_TEXT_FIELD_BYTES: usize = 64;

/// POST /upload/
/// Valida, guarda, imprime y registra el resultado.
pub async fn upload_and_print_endpoint(
    req: HttpRequest,
    payload: Multipart,
    uploads: web::Data<UploadService>,
    printer: web::Data<PrinterService>,
    history: web::Data<HistoryService>,
) -> HttpResponse {
    let form = match read_upload_form(payload).await {
        Ok(form) => form,
        Err(e) => {
            log::warn!("Multipart inválido: {}", e);
            return HttpResponse::BadRequest().json(UploadErrorResponse {
                success: false,
                message: format!("Invalid upload: {}", e),
                errors: FieldErrors::new(),
            });
        }
    };

    // 1) Validar (sin registro en historial si falla)
    let validated = match uploads.validate(form) {
        Ok(v) => v,
        Err(errors) => {
            log::info!("Subida rechazada: {:?}", errors);
            return HttpResponse::BadRequest().json(UploadErrorResponse {
                success: false,
                message: "Form validation failed".to_string(),
                errors,
            });
        }
    };

    // 2) Guardar en disco
    let stored = match uploads.store(validated).await {
        Ok(stored) => stored,
        Err(e) => {
            log::error!("Error guardando archivo: {:?}", e);
            return internal_error(format!("Could not store file: {}", e));
        }
    };

    // 3) Registro "pending"
    let mut record = match history
        .create(NewPrintRecord {
            filename: stored.file_name.clone(),
            file_path: Some(stored.path.to_string_lossy().to_string()),
            file_size: Some(stored.size as i64),
            printer_name: None,
            copies: stored.copies,
            client_ip: client_ip(&req),
        })
        .await
    {
        Ok(record) => record,
        Err(e) => {
            log::error!("Error creando registro de impresión: {:?}", e);
            if let Err(rm) = tokio::fs::remove_file(&stored.path).await {
                log::warn!("No se pudo borrar {:?}: {}", stored.path, rm);
            }
            return internal_error(format!("Could not record print job: {}", e));
        }
    };

    // 4) Imprimir y cerrar el registro
    let outcome = printer.print_file(&stored.path, stored.copies).await;
    if let Err(e) = close_record(&history, &mut record, &outcome).await {
        log::error!("No se pudo cerrar registro {}: {:?}", record.id, e);
        return internal_error(format!("Could not update print record: {}", e));
    }

    log::info!(
        "Registro {} '{}' -> {} ({})",
        record.id,
        record.filename,
        record.status,
        outcome.message
    );

    if is_ajax(&req) {
        HttpResponse::Ok().json(UploadResponse {
            success: outcome.success,
            message: outcome.message,
            filename: stored.file_name,
        })
    } else {
        redirect_home()
    }
}

/// GET /upload/ no tiene formulario propio.
pub async fn upload_get_endpoint() -> HttpResponse {
    redirect_home()
}

fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, "/"))
        .finish()
}

fn internal_error(message: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "message": message
    }))
}

/// Lee el multipart. Apenas el archivo pasa el límite se deja de leer el cuerpo
/// y se devuelve lo recibido; el validador lo rechaza por tamaño.
async fn read_upload_form(mut payload: Multipart) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::default();

    while let Some(mut field) = payload.try_next().await? {
        let disposition = field.content_disposition().clone();
        let name = disposition.get_name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                form.file_name = disposition.get_filename().map(str::to_string);
                form.data.clear();
                form.size = 0;
                while let Some(chunk) = field.try_next().await? {
                    form.size += chunk.len() as u64;
                    if form.size > MAX_UPLOAD_BYTES {
                        return Ok(form);
                    }
                    form.data.extend_from_slice(&chunk);
                }
            }
            "copies" => {
                let mut buf = Vec::new();
                while let Some(chunk) = field.try_next().await? {
                    if buf.len() < MAX_TEXT_FIELD_BYTES {
                        buf.extend_from_slice(&chunk);
                    }
                }
                form.copies = Some(String::from_utf8_lossy(&buf).to_string());
            }
            _ => while field.try_next().await?.is_some() {},
        }
    }

    Ok(form)
}
