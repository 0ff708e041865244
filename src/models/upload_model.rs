//! models/upload_model.rs
//! Datos del formulario de subida y respuestas de `/upload/`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// Lo que llega del multipart, todavía sin validar.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file_name: Option<String>,
    pub data: Vec<u8>,
    /// Tamaño real recibido (puede superar `data.len()` si se cortó el buffer).
    pub size: u64,
    pub copies: Option<String>,
}

/// Archivo aceptado por el validador.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub size: u64,
    pub copies: i64,
}

/// Archivo ya guardado en disco.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
    pub copies: i64,
}

/// Errores por campo, con la forma `{"file": [...], "copies": [...]}`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadErrorResponse {
    pub success: bool,
    pub message: String,
    pub errors: FieldErrors,
}
