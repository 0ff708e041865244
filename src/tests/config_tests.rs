//! tests/config_tests.rs
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::app_config::{AppConfig, BackendMode, DEFAULT_PRINTER_NAME};

fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_without_environment() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(cfg.printer_name, DEFAULT_PRINTER_NAME);
    assert_eq!(cfg.backend, BackendMode::Auto);
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.test_page_timeout, Duration::from_secs(30));
    assert_eq!(cfg.database_path(), PathBuf::from("data/print_history.db"));
}

#[test]
fn reads_overrides() {
    let cfg = config_from(&[
        ("PRINTER_NAME", "Office_Laser"),
        ("PRINTER_BACKEND", "MOCK"),
        ("SERVER_PORT", "9100"),
        ("TEST_PAGE_TIMEOUT_SECS", "5"),
        ("MEDIA_DIR", "/var/lib/print/media"),
        ("HTTP_WORKERS", "2"),
    ])
    .unwrap();
    assert_eq!(cfg.printer_name, "Office_Laser");
    assert_eq!(cfg.backend, BackendMode::Mock);
    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.test_page_timeout, Duration::from_secs(5));
    assert_eq!(cfg.media_dir, PathBuf::from("/var/lib/print/media"));
    assert_eq!(cfg.workers, Some(2));
}

#[test]
fn rejects_invalid_values() {
    assert!(config_from(&[("PRINTER_BACKEND", "winspool")]).is_err());
    assert!(config_from(&[("SERVER_PORT", "http")]).is_err());
    assert!(config_from(&[("TEST_PAGE_TIMEOUT_SECS", "0")]).is_err());
}

#[test]
fn test_page_command_substitutes_printer() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(
        cfg.test_page_argv(),
        vec![
            "lp".to_string(),
            "-d".to_string(),
            "HP LaserJet Pro 4004d".to_string(),
            "/usr/share/cups/data/testprint".to_string(),
        ]
    );

    let custom = config_from(&[
        ("PRINTER_NAME", "Lab"),
        ("TEST_PAGE_COMMAND", "lp -d {printer} -o job-sheets=standard /dev/null"),
    ])
    .unwrap();
    assert_eq!(custom.test_page_argv()[2], "Lab");
    assert_eq!(custom.test_page_argv().len(), 6);
}
