//! services/upload_service.rs
//! Validación del formulario de subida y guardado del archivo en disco.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::models::upload_model::{FieldErrors, StoredUpload, UploadForm, ValidatedUpload};

/// Límite de tamaño por archivo: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "txt", "docx"];
pub const MIN_COPIES: i64 = 1;
pub const MAX_COPIES: i64 = 10;

#[derive(Clone, Debug)]
pub struct UploadService {
    media_dir: Arc<PathBuf>,
}

impl UploadService {
    pub fn new(media_dir: &Path) -> Self {
        Self {
            media_dir: Arc::new(media_dir.to_path_buf()),
        }
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Valida archivo y copias. Devuelve todos los errores por campo.
    pub fn validate(&self, form: UploadForm) -> Result<ValidatedUpload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let copies = match parse_copies(form.copies.as_deref()) {
            Ok(n) => n,
            Err(msg) => {
                errors.entry("copies".to_string()).or_default().push(msg);
                0
            }
        };

        let file_name = match form.file_name.as_deref().map(str::trim) {
            None | Some("") => {
                errors
                    .entry("file".to_string())
                    .or_default()
                    .push("This field is required.".to_string());
                None
            }
            Some(name) => {
                if form.size > MAX_UPLOAD_BYTES {
                    errors
                        .entry("file".to_string())
                        .or_default()
                        .push("File size must be less than 10MB".to_string());
                } else if !has_allowed_extension(name) {
                    let allowed: Vec<String> =
                        ALLOWED_EXTENSIONS.iter().map(|e| format!(".{}", e)).collect();
                    errors.entry("file".to_string()).or_default().push(format!(
                        "File type not supported. Allowed types: {}",
                        allowed.join(", ")
                    ));
                } else if form.size == 0 {
                    errors
                        .entry("file".to_string())
                        .or_default()
                        .push("The submitted file is empty.".to_string());
                }
                Some(name.to_string())
            }
        };

        match file_name {
            Some(file_name) if errors.is_empty() => Ok(ValidatedUpload {
                file_name,
                data: form.data,
                size: form.size,
                copies,
            }),
            _ => Err(errors),
        }
    }

    /// Guarda el archivo como `<uuid>_<nombre>` dentro del directorio de media.
    pub async fn store(&self, upload: ValidatedUpload) -> Result<StoredUpload> {
        tokio::fs::create_dir_all(self.media_dir.as_path())
            .await
            .with_context(|| format!("No se pudo crear {:?}", self.media_dir))?;

        let unique_name = format!("{}_{}", Uuid::new_v4(), sanitize_file_name(&upload.file_name));
        let path = self.media_dir.join(unique_name);
        tokio::fs::write(&path, &upload.data)
            .await
            .with_context(|| format!("No se pudo guardar archivo en {:?}", path))?;

        log::info!("Archivo guardado en {:?} ({} bytes)", path, upload.size);

        Ok(StoredUpload {
            file_name: upload.file_name,
            path,
            size: upload.size,
            copies: upload.copies,
        })
    }
}

fn parse_copies(raw: Option<&str>) -> Result<i64, String> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(MIN_COPIES),
        Some(v) => v,
    };
    let n: i64 = raw
        .parse()
        .map_err(|_| "Enter a whole number.".to_string())?;
    if n < MIN_COPIES {
        return Err(format!(
            "Ensure this value is greater than or equal to {}.",
            MIN_COPIES
        ));
    }
    if n > MAX_COPIES {
        return Err(format!(
            "Ensure this value is less than or equal to {}.",
            MAX_COPIES
        ));
    }
    Ok(n)
}

pub fn has_allowed_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .map_or(false, |ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Deja solo el último componente y reemplaza caracteres problemáticos.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
