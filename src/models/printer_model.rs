//! models/printer_model.rs
//! Estructuras que describen el estado de la impresora y el resultado de un envío.

use serde::{Deserialize, Serialize};

/// Bits de estado de la impresora (mismos valores que el spooler de Windows).
pub const STATUS_PAUSED: i64 = 0x1;
pub const STATUS_ERROR: i64 = 0x2;
pub const STATUS_OFFLINE: i64 = 0x80;

/// Código de estado de un trabajo en impresión.
pub const JOB_STATUS_PRINTING: i64 = 0x10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterStatus {
    Online,
    Offline,
    Paused,
    Error,
}

impl PrinterStatus {
    /// Traduce el bitmask crudo. Gana el primer bit en orden
    /// offline > paused > error; sin bits conocidos es `Online`.
    pub fn from_code(code: i64) -> Self {
        if code & STATUS_OFFLINE != 0 {
            PrinterStatus::Offline
        } else if code & STATUS_PAUSED != 0 {
            PrinterStatus::Paused
        } else if code & STATUS_ERROR != 0 {
            PrinterStatus::Error
        } else {
            PrinterStatus::Online
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PrinterStatus::Online => "Printer is ready",
            PrinterStatus::Offline => "Printer is offline",
            PrinterStatus::Paused => "Printer is paused",
            PrinterStatus::Error => "Printer has an error",
        }
    }
}

/// Lectura puntual del estado; no se persiste.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterStatusSnapshot {
    pub name: String,
    pub status: PrinterStatus,
    pub status_code: i64,
    pub jobs_count: i64,
    pub is_default: bool,
    pub message: String,
}

impl PrinterStatusSnapshot {
    pub fn from_code(name: &str, status_code: i64, jobs_count: i64, is_default: bool) -> Self {
        let status = PrinterStatus::from_code(status_code);
        Self {
            name: name.to_string(),
            status,
            status_code,
            jobs_count,
            is_default,
            message: status.message().to_string(),
        }
    }

    /// Snapshot centinela cuando la consulta al sistema falla.
    pub fn probe_failed(name: &str, cause: &str) -> Self {
        Self {
            name: name.to_string(),
            status: PrinterStatus::Error,
            status_code: -1,
            jobs_count: 0,
            is_default: false,
            message: format!("Error getting printer status: {}", cause),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrintQueueEntry {
    pub job_id: i64,
    pub document: String,
    pub status: i64,
    pub pages: i64,
    pub submitted: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrintQueueResponse {
    pub queue: Vec<PrintQueueEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrinterListResponse {
    pub printers: Vec<String>,
}

/// Resultado explícito de cualquier envío a la impresora.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOutcome {
    pub success: bool,
    pub message: String,
}

impl PrintOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
