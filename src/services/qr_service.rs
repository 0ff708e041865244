//! services/qr_service.rs
//! QR en PNG con la URL de la página de subida.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

/// Píxeles por módulo del QR.
pub const MODULE_PIXELS: u32 = 10;
/// Margen silencioso en módulos.
pub const QUIET_ZONE_MODULES: u32 = 4;

pub fn upload_url(host: &str) -> String {
    format!("http://{}/", host)
}

pub fn encode(data: &str) -> Result<QrCode> {
    QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)
        .with_context(|| format!("No se pudo codificar '{}' como QR", data))
}

/// Renderiza `data` como PNG en blanco y negro.
pub fn render_png(data: &str) -> Result<Vec<u8>> {
    let code = encode(data)?;
    let img = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .build();

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .context("No se pudo escribir el PNG del QR")?;
    Ok(buffer.into_inner())
}
