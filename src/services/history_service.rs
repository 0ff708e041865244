use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::models::history_model::{
    NewPrintRecord, PrintHistoryRecord, PrintHistoryRow, PrintStatus,
};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, timestamp, filename, file_path, file_size, status,
        printer_name, copies, error_message, client_ip
    FROM print_history
"#;

#[derive(Clone, Debug)]
pub struct HistoryService {
    db_pool: Pool<Sqlite>,
    default_printer: String,
}

impl HistoryService {
    pub fn new(db_pool: Pool<Sqlite>, default_printer: &str) -> Self {
        HistoryService {
            db_pool,
            default_printer: default_printer.to_string(),
        }
    }

    /// Abre (o crea) la base SQLite en `path`.
    pub async fn connect(path: &Path) -> Result<Pool<Sqlite>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("No se pudo crear directorio {:?}", parent))?;
        }
        log::info!("Conectando a SQLite en {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("No se pudo abrir la base de datos {:?}", path))
    }

    /// Corre migraciones con sqlx
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db_pool)
            .await
            .context("Fallo en migraciones de 'print_history'")?;
        Ok(())
    }

    /// Crea el registro en estado "pending".
    pub async fn create(&self, req: NewPrintRecord) -> Result<PrintHistoryRecord> {
        let now = Utc::now().trunc_subsecs(6);
        let printer_name = req
            .printer_name
            .unwrap_or_else(|| self.default_printer.clone());
        let copies = if req.copies < 1 { 1 } else { req.copies };

        let result = sqlx::query(
            r#"
            INSERT INTO print_history (
                timestamp, filename, file_path, file_size, status,
                printer_name, copies, error_message, client_ip
            )
            VALUES (?1, ?2, ?3, ?4, 'pending', ?5, ?6, NULL, ?7)
            "#,
        )
        .bind(now.to_rfc3339_opts(SecondsFormat::Micros, true))
        .bind(&req.filename)
        .bind(&req.file_path)
        .bind(req.file_size)
        .bind(&printer_name)
        .bind(copies)
        .bind(&req.client_ip)
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar registro de impresión")?;

        Ok(PrintHistoryRecord {
            id: result.last_insert_rowid(),
            timestamp: now,
            filename: req.filename,
            file_path: req.file_path,
            file_size: req.file_size,
            status: PrintStatus::Pending,
            printer_name,
            copies,
            error_message: None,
            client_ip: req.client_ip,
        })
    }

    /// Persiste estado y error. Un registro ya terminal en la base no se toca.
    pub async fn update(&self, record: &PrintHistoryRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE print_history
            SET status = ?2,
                error_message = ?3
            WHERE id = ?1
              AND status IN ('pending', 'printing')
            "#,
        )
        .bind(record.id)
        .bind(record.status.as_str())
        .bind(&record.error_message)
        .execute(&self.db_pool)
        .await
        .context("Fallo al actualizar registro de impresión")?;

        if result.rows_affected() == 0 {
            let current = self.get(record.id).await?;
            return Err(anyhow!(
                "El registro {} ya está en estado terminal ({})",
                record.id,
                current.status
            ));
        }
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<PrintHistoryRecord> {
        let row: PrintHistoryRow = sqlx::query_as(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id)
            .fetch_one(&self.db_pool)
            .await
            .with_context(|| format!("No se encontró registro con id {}", id))?;
        row.try_into()
    }

    /// Últimos `limit` registros, más recientes primero.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<PrintHistoryRecord>> {
        let rows: Vec<PrintHistoryRow> = sqlx::query_as(&format!(
            "{} ORDER BY timestamp DESC, id DESC LIMIT ?1",
            SELECT_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al listar historial")?;

        rows.into_iter().map(PrintHistoryRecord::try_from).collect()
    }
}
