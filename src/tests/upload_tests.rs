//! tests/upload_tests.rs
//! Validación y guardado de archivos subidos.

use crate::models::upload_model::UploadForm;
use crate::services::upload_service::{sanitize_file_name, UploadService, MAX_UPLOAD_BYTES};

fn form(name: &str, size: u64, copies: Option<&str>) -> UploadForm {
    let data = vec![b'a'; size.min(MAX_UPLOAD_BYTES) as usize];
    UploadForm {
        file_name: Some(name.to_string()),
        data,
        size,
        copies: copies.map(str::to_string),
    }
}

fn service() -> UploadService {
    UploadService::new(std::path::Path::new("unused-media"))
}

#[test]
fn accepts_small_text_file() {
    let upload = service()
        .validate(form("notes.txt", 1024, Some("2")))
        .expect("debería aceptar");
    assert_eq!(upload.file_name, "notes.txt");
    assert_eq!(upload.copies, 2);
    assert_eq!(upload.size, 1024);
}

#[test]
fn extension_check_is_case_insensitive() {
    assert!(service().validate(form("SCAN.PDF", 10, None)).is_ok());
    assert!(service().validate(form("photo.JpEg", 10, None)).is_ok());
}

#[test]
fn missing_copies_defaults_to_one() {
    let upload = service().validate(form("a.docx", 10, None)).unwrap();
    assert_eq!(upload.copies, 1);
}

#[test]
fn rejects_files_over_ten_mib() {
    let errors = service()
        .validate(form("big.pdf", 11 * 1024 * 1024, Some("1")))
        .unwrap_err();
    assert_eq!(errors["file"], vec!["File size must be less than 10MB".to_string()]);

    // Exactamente 10 MiB todavía entra.
    assert!(service().validate(form("edge.pdf", MAX_UPLOAD_BYTES, None)).is_ok());
}

#[test]
fn rejects_unsupported_extensions() {
    for name in ["setup.exe", "archive.tar.gz", "README", "script.pdf.sh"] {
        let errors = service().validate(form(name, 100, None)).unwrap_err();
        assert!(
            errors["file"][0].starts_with("File type not supported"),
            "{}: {:?}",
            name,
            errors
        );
    }
}

#[test]
fn rejects_out_of_range_copies() {
    for bad in ["0", "11", "-3", "two", "1.5"] {
        let errors = service().validate(form("a.txt", 5, Some(bad))).unwrap_err();
        assert!(errors.contains_key("copies"), "copies={} {:?}", bad, errors);
        assert!(!errors.contains_key("file"));
    }
    assert_eq!(service().validate(form("a.txt", 5, Some("10"))).unwrap().copies, 10);
}

#[test]
fn collects_errors_for_every_field() {
    let errors = service()
        .validate(UploadForm {
            file_name: None,
            data: Vec::new(),
            size: 0,
            copies: Some("99".to_string()),
        })
        .unwrap_err();
    assert_eq!(errors["file"], vec!["This field is required.".to_string()]);
    assert_eq!(errors["copies"].len(), 1);
}

#[test]
fn rejects_empty_file() {
    let errors = service().validate(form("empty.txt", 0, None)).unwrap_err();
    assert!(errors.contains_key("file"));
}

#[test]
fn sanitizes_names() {
    assert_eq!(sanitize_file_name("../../etc/passwd.txt"), "passwd.txt");
    assert_eq!(sanitize_file_name("C:\\Users\\ana\\mi doc.pdf"), "mi_doc.pdf");
    assert_eq!(sanitize_file_name(".hidden.txt"), "hidden.txt");
    assert_eq!(sanitize_file_name("///"), "upload");
}

#[actix_rt::test]
async fn store_writes_under_media_dir() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = UploadService::new(&dir.path().join("print_files"));

    let validated = uploads.validate(form("hola mundo.txt", 4, Some("1"))).unwrap();
    let stored = uploads.store(validated).await.expect("store failed");

    assert!(stored.path.starts_with(dir.path().join("print_files")));
    assert!(stored
        .path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .ends_with("_hola_mundo.txt"));
    assert_eq!(std::fs::read(&stored.path).unwrap(), b"aaaa");
    assert_eq!(stored.file_name, "hola mundo.txt");
}
