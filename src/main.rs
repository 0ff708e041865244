use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use dotenv::dotenv;
use sqlx::{Pool, Sqlite};

use crate::config::app_config::AppConfig;
use crate::logger::init_logger;
use crate::services::history_service::HistoryService;
use crate::services::printer_service::PrinterService;
use crate::services::upload_service::UploadService;

mod app;
mod config;
mod handlers;
mod logger;
mod models;
mod services;
mod templates;

#[cfg(test)]
mod tests;

async fn setup_database(config: &AppConfig) -> Result<Pool<Sqlite>> {
    let db_path = std::env::current_dir()
        .context("No se pudo obtener el current_dir")?
        .join(config.database_path());

    let db_pool = HistoryService::connect(&db_path).await?;

    // Verificar la conexión
    let conn = db_pool.acquire().await.context("Falló la conexión")?;
    drop(conn);

    Ok(db_pool)
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env().context("Configuración inválida")?;
    log::info!(
        "Impresora configurada: '{}' (backend={:?})",
        config.printer_name,
        config.backend
    );

    let db_pool = setup_database(&config).await?;

    // HistoryService
    let history_service = HistoryService::new(db_pool, &config.printer_name);
    history_service.run_migrations().await?;

    let printer_service = PrinterService::from_config(&config)?;
    log::info!("Backend de impresión activo: {}", printer_service.backend_kind());

    let upload_service = UploadService::new(&config.media_dir);
    log::info!("Archivos subidos en {:?}", upload_service.media_dir());

    // Levantar servidor
    log::info!("Levantando servidor en {}:{}", config.host, config.port);
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(printer_service.clone()))
            .app_data(web::Data::new(history_service.clone()))
            .app_data(web::Data::new(upload_service.clone()))
            .configure(app::init_app)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("No se pudo escuchar en {}:{}", config.host, config.port))?
        .run()
        .await
        .context("El servidor terminó con error")?;

    Ok(())
}
