//! services/cups_backend.rs
//! Backend nativo sobre las herramientas de línea de comandos de CUPS
//! (`lp`, `lpstat`, `lpq`).

use std::{
    path::{Path, PathBuf},
    process::Output,
    sync::Arc,
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tokio::{process::Command, time::timeout};

use crate::config::app_config::AppConfig;
use crate::models::printer_model::{
    PrintQueueEntry, PrinterStatusSnapshot, JOB_STATUS_PRINTING, STATUS_ERROR, STATUS_OFFLINE,
    STATUS_PAUSED,
};
use crate::services::printer_backend::PrinterBackend;

/// Tiempo máximo para las consultas y envíos a `lp`/`lpstat`.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(15);

/// Motivos de CUPS que cuentan como error de la impresora.
const ERROR_REASONS: &[&str] = &[
    "media-jam",
    "media-empty",
    "media-needed",
    "toner-empty",
    "marker-supply-empty",
    "door-open",
    "cover-open",
    "input-tray-missing",
    "output-area-full",
];

#[derive(Clone, Debug)]
pub struct CupsBackend {
    printer_name: Arc<String>,
    lp_path: Arc<PathBuf>,
    lpstat_path: Arc<PathBuf>,
    lpq_path: Option<Arc<PathBuf>>,
    test_page_argv: Arc<Vec<String>>,
    test_page_timeout: Duration,
}

impl CupsBackend {
    pub fn new(config: &AppConfig) -> Result<Self> {
        // Verifica que las herramientas de CUPS estén en PATH
        let lp_path = which::which("lp").context("No se encontró lp en el sistema")?;
        let lpstat_path = which::which("lpstat").context("No se encontró lpstat en el sistema")?;
        let lpq_path = which::which("lpq").ok();

        Ok(Self::with_commands(
            &config.printer_name,
            lp_path,
            lpstat_path,
            lpq_path,
            config.test_page_argv(),
            config.test_page_timeout,
        ))
    }

    pub fn with_commands(
        printer_name: &str,
        lp_path: PathBuf,
        lpstat_path: PathBuf,
        lpq_path: Option<PathBuf>,
        test_page_argv: Vec<String>,
        test_page_timeout: Duration,
    ) -> Self {
        Self {
            printer_name: Arc::new(printer_name.to_string()),
            lp_path: Arc::new(lp_path),
            lpstat_path: Arc::new(lpstat_path),
            lpq_path: lpq_path.map(Arc::new),
            test_page_argv: Arc::new(test_page_argv),
            test_page_timeout,
        }
    }

    async fn lpstat(&self, args: &[&str]) -> Result<String> {
        let output = run_command(&self.lpstat_path, args, COMMAND_TIMEOUT).await?;
        checked_stdout(output, "lpstat")
    }

    async fn is_default(&self) -> Result<bool> {
        let out = self.lpstat(&["-d"]).await?;
        Ok(parse_default_destination(&out).as_deref() == Some(self.printer_name.as_str()))
    }
}

#[async_trait]
impl PrinterBackend for CupsBackend {
    fn kind(&self) -> &'static str {
        "cups"
    }

    async fn status(&self) -> Result<PrinterStatusSnapshot> {
        let name = self.printer_name.as_str();
        let details = self.lpstat(&["-l", "-p", name]).await?;
        let status_code = parse_printer_state(&details);

        let jobs = self.lpstat(&["-o", name]).await?;
        let jobs_count = jobs.lines().filter(|l| !l.trim().is_empty()).count() as i64;

        // Sin destino por defecto, lpstat -d sale con error; no es fatal.
        let is_default = self.is_default().await.unwrap_or(false);

        Ok(PrinterStatusSnapshot::from_code(
            name,
            status_code,
            jobs_count,
            is_default,
        ))
    }

    async fn queue(&self) -> Result<Vec<PrintQueueEntry>> {
        let lpq = self
            .lpq_path
            .as_ref()
            .ok_or_else(|| anyhow!("No se encontró lpq en el sistema"))?;
        let output = run_command(lpq, &["-P", self.printer_name.as_str()], COMMAND_TIMEOUT).await?;
        let stdout = checked_stdout(output, "lpq")?;
        Ok(parse_lpq(&stdout))
    }

    async fn print_file(&self, path: &Path, copies: i64) -> Result<String> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let copies_arg = copies.to_string();
        let path_arg = path.to_string_lossy().to_string();

        let output = run_command(
            &self.lp_path,
            &[
                "-d",
                self.printer_name.as_str(),
                "-n",
                copies_arg.as_str(),
                "-t",
                file_name.as_str(),
                path_arg.as_str(),
            ],
            COMMAND_TIMEOUT,
        )
        .await?;
        let stdout = checked_stdout(output, "lp")?;
        log::info!("lp aceptó el trabajo: {}", stdout.trim());

        Ok(format!("File sent to printer: {}", file_name))
    }

    async fn print_test_page(&self) -> Result<String> {
        let (program, args) = self
            .test_page_argv
            .split_first()
            .ok_or_else(|| anyhow!("TEST_PAGE_COMMAND está vacío"))?;
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = run_command(Path::new(program), &args, self.test_page_timeout).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("{}", stderr.trim()));
        }
        Ok("Test page sent to printer".to_string())
    }

    async fn list_printers(&self) -> Result<Vec<String>> {
        let out = self.lpstat(&["-p"]).await?;
        Ok(parse_printer_names(&out))
    }
}

/// Ejecuta un comando con límite de tiempo. Si vence, el proceso hijo se mata
/// al soltar el future (`kill_on_drop`).
pub async fn run_command(program: &Path, args: &[&str], limit: Duration) -> Result<Output> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true);

    timeout(limit, cmd.output())
        .await
        .map_err(|_| anyhow!("timed out after {}s", limit.as_secs()))?
        .with_context(|| format!("No se pudo lanzar {}", program.display()))
}

fn checked_stdout(output: Output, tool: &str) -> Result<String> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("{} falló: {}", tool, stderr.trim()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Convierte la salida de `lpstat -l -p <impresora>` en el bitmask de estado.
pub fn parse_printer_state(output: &str) -> i64 {
    let lower = output.to_ascii_lowercase();
    let mut code = 0;

    if lower
        .lines()
        .next()
        .map_or(false, |first| first.contains(" disabled"))
    {
        code |= STATUS_PAUSED;
    }
    if lower.contains("unable to connect") {
        code |= STATUS_OFFLINE;
    }

    for line in lower.lines() {
        let Some(alerts) = line.trim().strip_prefix("alerts:") else {
            continue;
        };
        for reason in alerts.split(|c: char| c == ',' || c.is_whitespace()) {
            if reason.is_empty() || reason == "none" || reason.ends_with("-warning") {
                continue;
            }
            let base = reason
                .trim_end_matches("-report")
                .trim_end_matches("-error");
            if base.contains("offline") {
                code |= STATUS_OFFLINE;
            } else if base == "paused" {
                code |= STATUS_PAUSED;
            } else if reason.ends_with("-error") || ERROR_REASONS.contains(&base) {
                code |= STATUS_ERROR;
            }
        }
    }

    code
}

/// `lpstat -d` → "system default destination: NAME".
pub fn parse_default_destination(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|l| l.trim().strip_prefix("system default destination:"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Nombres de impresora de `lpstat -p` ("printer NAME is idle...").
pub fn parse_printer_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|l| l.strip_prefix("printer "))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Parsea la tabla de `lpq`:
/// `Rank Owner Job File(s) Total Size`.
pub fn parse_lpq(output: &str) -> Vec<PrintQueueEntry> {
    output
        .lines()
        .skip_while(|l| !l.trim_start().starts_with("Rank"))
        .skip(1)
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 6 || tokens[tokens.len() - 1] != "bytes" {
                return None;
            }
            let job_id = tokens[2].parse::<i64>().ok()?;
            let document = tokens[3..tokens.len() - 2].join(" ");
            let status = if tokens[0] == "active" {
                JOB_STATUS_PRINTING
            } else {
                0
            };
            Some(PrintQueueEntry {
                job_id,
                document,
                status,
                pages: 0,
                submitted: None,
            })
        })
        .collect()
}
