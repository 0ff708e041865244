//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod cups_backend;
pub mod history_service;
pub mod mock_backend;
pub mod printer_backend;
pub mod printer_service;
pub mod qr_service;
pub mod upload_service;
