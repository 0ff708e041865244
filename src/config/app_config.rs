//! config/app_config.rs
//! Configuración global del servidor de impresión.
//! Se construye una sola vez al arrancar (desde .env / variables de entorno)
//! y se pasa a cada servicio en su constructor.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

pub const DEFAULT_PRINTER_NAME: &str = "HP LaserJet Pro 4004d";
pub const DEFAULT_TEST_PAGE_COMMAND: &str = "lp -d {printer} /usr/share/cups/data/testprint";

/// Qué implementación de impresora usar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// CUPS si `lp` y `lpstat` existen en PATH, si no mock.
    Auto,
    Cups,
    Mock,
}

impl std::str::FromStr for BackendMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(BackendMode::Auto),
            "cups" | "native" => Ok(BackendMode::Cups),
            "mock" => Ok(BackendMode::Mock),
            other => Err(anyhow!("PRINTER_BACKEND inválido: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub printer_name: String,
    pub backend: BackendMode,
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub media_dir: PathBuf,
    pub test_page_timeout: Duration,
    pub test_page_command: String,
    pub workers: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            printer_name: DEFAULT_PRINTER_NAME.to_string(),
            backend: BackendMode::Auto,
            host: "0.0.0.0".to_string(),
            port: 8000,
            data_dir: PathBuf::from("data"),
            media_dir: PathBuf::from("media/print_files"),
            test_page_timeout: Duration::from_secs(30),
            test_page_command: DEFAULT_TEST_PAGE_COMMAND.to_string(),
            workers: None,
        }
    }
}

impl AppConfig {
    /// Lee la configuración de las variables de entorno del proceso.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env`, pero con una función de búsqueda inyectable (tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();

        if let Some(name) = lookup("PRINTER_NAME").filter(|v| !v.trim().is_empty()) {
            cfg.printer_name = name.trim().to_string();
        }
        if let Some(mode) = lookup("PRINTER_BACKEND") {
            cfg.backend = mode.parse()?;
        }
        if let Some(host) = lookup("SERVER_HOST") {
            cfg.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            cfg.port = port
                .trim()
                .parse()
                .with_context(|| format!("SERVER_PORT inválido: {}", port))?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            cfg.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("MEDIA_DIR") {
            cfg.media_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup("TEST_PAGE_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("TEST_PAGE_TIMEOUT_SECS inválido: {}", secs))?;
            if secs == 0 {
                return Err(anyhow!("TEST_PAGE_TIMEOUT_SECS debe ser mayor que 0"));
            }
            cfg.test_page_timeout = Duration::from_secs(secs);
        }
        if let Some(cmd) = lookup("TEST_PAGE_COMMAND").filter(|v| !v.trim().is_empty()) {
            cfg.test_page_command = cmd;
        }
        if let Some(workers) = lookup("HTTP_WORKERS") {
            let n: usize = workers
                .trim()
                .parse()
                .with_context(|| format!("HTTP_WORKERS inválido: {}", workers))?;
            cfg.workers = Some(n.max(1));
        }

        Ok(cfg)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("print_history.db")
    }

    /// Comando de página de prueba ya separado en argv, con `{printer}` sustituido.
    pub fn test_page_argv(&self) -> Vec<String> {
        self.test_page_command
            .split_whitespace()
            .map(|part| part.replace("{printer}", &self.printer_name))
            .collect()
    }
}
