//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod history_model;
pub mod printer_model;
pub mod upload_model;
