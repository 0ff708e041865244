//! tests/history_tests.rs
//! Pruebas del historial en SQLite.

use actix_rt::test;

use crate::models::history_model::{
    HistoryEntryResponse, NewPrintRecord, PrintStatus, TEST_PAGE_FILENAME,
};
use crate::models::printer_model::PrintOutcome;
use crate::tests::test_history;

fn new_record(name: &str) -> NewPrintRecord {
    NewPrintRecord {
        filename: name.to_string(),
        copies: 1,
        ..Default::default()
    }
}

#[test]
async fn create_starts_pending_with_default_printer() {
    let dir = tempfile::tempdir().unwrap();
    let history = test_history(dir.path()).await;

    let record = history
        .create(NewPrintRecord {
            filename: "report.pdf".to_string(),
            file_path: Some("media/abc_report.pdf".to_string()),
            file_size: Some(2048),
            printer_name: None,
            copies: 3,
            client_ip: Some("10.0.0.7".to_string()),
        })
        .await
        .expect("create failed");

    assert_eq!(record.status, PrintStatus::Pending);
    assert_eq!(record.printer_name, "HP LaserJet Pro 4004d");
    assert!(record.error_message.is_none());

    let stored = history.get(record.id).await.expect("get failed");
    assert_eq!(stored.filename, "report.pdf");
    assert_eq!(stored.copies, 3);
    assert_eq!(stored.file_size, Some(2048));
    assert_eq!(stored.client_ip.as_deref(), Some("10.0.0.7"));
    assert_eq!(stored.status, PrintStatus::Pending);
    assert_eq!(stored.timestamp, record.timestamp);
}

#[test]
async fn list_recent_is_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let history = test_history(dir.path()).await;

    let a = history.create(new_record("a.txt")).await.unwrap();
    let b = history.create(new_record("b.txt")).await.unwrap();

    let listed = history.list_recent(10).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
}

#[test]
async fn list_recent_honours_limit() {
    let dir = tempfile::tempdir().unwrap();
    let history = test_history(dir.path()).await;

    for i in 0..12 {
        history
            .create(new_record(&format!("doc{}.txt", i)))
            .await
            .unwrap();
    }

    let listed = history.list_recent(10).await.unwrap();
    assert_eq!(listed.len(), 10);
    assert_eq!(listed[0].filename, "doc11.txt");
}

#[test]
async fn settle_moves_to_terminal_once() {
    let dir = tempfile::tempdir().unwrap();
    let history = test_history(dir.path()).await;

    let mut record = history.create(new_record(TEST_PAGE_FILENAME)).await.unwrap();
    record
        .settle(&PrintOutcome::failed("Error printing test page: boom"))
        .unwrap();
    history.update(&record).await.unwrap();

    let stored = history.get(record.id).await.unwrap();
    assert_eq!(stored.status, PrintStatus::Failed);
    assert_eq!(
        stored.error_message.as_deref(),
        Some("Error printing test page: boom")
    );

    // En memoria no se puede volver a cerrar.
    assert!(record.settle(&PrintOutcome::ok("ok")).is_err());

    // Y la base rechaza pisar un estado terminal.
    let mut forged = stored.clone();
    forged.status = PrintStatus::Completed;
    forged.error_message = None;
    assert!(history.update(&forged).await.is_err());
    assert_eq!(
        history.get(record.id).await.unwrap().status,
        PrintStatus::Failed
    );
}

#[test]
async fn completed_clears_error_message() {
    let dir = tempfile::tempdir().unwrap();
    let history = test_history(dir.path()).await;

    let mut record = history.create(new_record("ok.pdf")).await.unwrap();
    record.settle(&PrintOutcome::ok("File sent")).unwrap();
    history.update(&record).await.unwrap();

    let stored = history.get(record.id).await.unwrap();
    assert_eq!(stored.status, PrintStatus::Completed);
    assert!(stored.error_message.is_none());
}

#[test]
async fn api_entry_uses_rfc3339_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let history = test_history(dir.path()).await;

    let record = history.create(new_record("x.png")).await.unwrap();
    let entry = HistoryEntryResponse::from(&record);

    assert_eq!(entry.id, record.id);
    assert_eq!(entry.status, "pending");
    assert!(chrono::DateTime::parse_from_rfc3339(&entry.timestamp).is_ok());
}
