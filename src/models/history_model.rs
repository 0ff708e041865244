//! models/history_model.rs
//! Historial de impresiones (tabla `print_history`).

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::printer_model::PrintOutcome;

pub const TEST_PAGE_FILENAME: &str = "Test Page";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintStatus {
    Pending,
    Printing,
    Completed,
    Failed,
}

impl PrintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrintStatus::Pending => "pending",
            PrintStatus::Printing => "printing",
            PrintStatus::Completed => "completed",
            PrintStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PrintStatus::Completed | PrintStatus::Failed)
    }
}

impl std::str::FromStr for PrintStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(PrintStatus::Pending),
            "printing" => Ok(PrintStatus::Printing),
            "completed" => Ok(PrintStatus::Completed),
            "failed" => Ok(PrintStatus::Failed),
            other => Err(anyhow!("Estado de impresión desconocido: {}", other)),
        }
    }
}

impl std::fmt::Display for PrintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct PrintHistoryRecord {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub filename: String,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    pub status: PrintStatus,
    pub printer_name: String,
    pub copies: i64,
    pub error_message: Option<String>,
    pub client_ip: Option<String>,
}

impl PrintHistoryRecord {
    /// Cierra el registro según el resultado del envío.
    /// Solo se permite una transición desde un estado no terminal.
    pub fn settle(&mut self, outcome: &PrintOutcome) -> Result<()> {
        if self.status.is_terminal() {
            return Err(anyhow!(
                "El registro {} ya está en estado terminal ({})",
                self.id,
                self.status
            ));
        }
        if outcome.success {
            self.status = PrintStatus::Completed;
            self.error_message = None;
        } else {
            self.status = PrintStatus::Failed;
            self.error_message = Some(outcome.message.clone());
        }
        Ok(())
    }
}

/// Fila tal como sale de SQLite.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PrintHistoryRow {
    pub id: i64,
    pub timestamp: String,
    pub filename: String,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    pub status: String,
    pub printer_name: String,
    pub copies: i64,
    pub error_message: Option<String>,
    pub client_ip: Option<String>,
}

impl TryFrom<PrintHistoryRow> for PrintHistoryRecord {
    type Error = anyhow::Error;

    fn try_from(row: PrintHistoryRow) -> Result<Self> {
        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .with_context(|| format!("Timestamp inválido en registro {}", row.id))?
            .with_timezone(&Utc);
        Ok(PrintHistoryRecord {
            id: row.id,
            timestamp,
            filename: row.filename,
            file_path: row.file_path,
            file_size: row.file_size,
            status: row.status.parse()?,
            printer_name: row.printer_name,
            copies: row.copies,
            error_message: row.error_message,
            client_ip: row.client_ip,
        })
    }
}

/// Campos para crear un registro nuevo (siempre arranca en `pending`).
#[derive(Debug, Clone, Default)]
pub struct NewPrintRecord {
    pub filename: String,
    pub file_path: Option<String>,
    pub file_size: Option<i64>,
    /// `None` usa la impresora configurada.
    pub printer_name: Option<String>,
    pub copies: i64,
    pub client_ip: Option<String>,
}

/// Entrada de `/api/history/`.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntryResponse {
    pub id: i64,
    pub timestamp: String,
    pub filename: String,
    pub status: String,
    pub copies: i64,
    pub file_size: Option<i64>,
    pub error_message: Option<String>,
}

impl From<&PrintHistoryRecord> for HistoryEntryResponse {
    fn from(r: &PrintHistoryRecord) -> Self {
        HistoryEntryResponse {
            id: r.id,
            timestamp: r.timestamp.to_rfc3339(),
            filename: r.filename.clone(),
            status: r.status.to_string(),
            copies: r.copies,
            file_size: r.file_size,
            error_message: r.error_message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryListResponse {
    pub history: Vec<HistoryEntryResponse>,
}
