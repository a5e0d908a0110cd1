use std::path::PathBuf;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lexichat::app::operations::{
    initialize_with_existing_pdfs, show_recent_sessions, upload_documents,
};
use lexichat::ui::Severity;

use crate::backend_harness::{controller, controller_for, last_block};

fn write_pdf(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"%PDF-1.4 test document").unwrap();
    path
}

#[tokio::test]
async fn upload_sends_one_multipart_part_per_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-documents"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains(r#"name="files"; filename="constitution.pdf""#))
        .and(body_string_contains(r#"name="files"; filename="bns.pdf""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Successfully processed 2 documents",
            "files_processed": ["constitution.pdf", "bns.pdf"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let paths = vec![write_pdf(&dir, "constitution.pdf"), write_pdf(&dir, "bns.pdf")];

    let mut ctl = controller(&server);
    let processed = upload_documents(&mut ctl, &paths).await.unwrap();
    assert_eq!(processed.files_processed.len(), 2);

    let status = ctl.view().status.current().unwrap();
    assert_eq!(status.severity, Severity::Success);
    assert_eq!(status.message, "✅ Successfully processed 2 documents");
    assert!(last_block(&ctl).contains("Documents processed successfully: constitution.pdf, bns.pdf"));

    server.verify().await;
}

#[tokio::test]
async fn upload_backend_error_is_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-documents"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Only PDF files are allowed"})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let paths = vec![write_pdf(&dir, "notes.pdf")];

    let mut ctl = controller(&server);
    assert!(upload_documents(&mut ctl, &paths).await.is_none());

    let status = ctl.view().status.current().unwrap();
    assert_eq!(status.severity, Severity::Error);
    assert_eq!(status.message, "❌ Error: Only PDF files are allowed");
    assert!(ctl.view().transcript.is_empty());
}

#[tokio::test]
async fn unreadable_file_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-documents"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pdf");

    let mut ctl = controller(&server);
    assert!(upload_documents(&mut ctl, &[missing]).await.is_none());

    let status = ctl.view().status.current().unwrap();
    assert_eq!(status.severity, Severity::Error);
    assert!(status.message.starts_with("❌ Upload failed: "));
    assert!(status.message.contains("missing.pdf"));

    server.verify().await;
}

#[tokio::test]
async fn empty_upload_is_a_no_op() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-documents"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    assert!(upload_documents(&mut ctl, &[]).await.is_none());
    assert!(ctl.view().status.current().is_none());

    server.verify().await;
}

#[tokio::test]
async fn initialize_reports_processed_files() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/initialize-with-existing-pdfs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Initialized with 3 existing PDF files",
            "files_processed": ["a.pdf", "b.pdf", "c.pdf"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    initialize_with_existing_pdfs(&mut ctl).await.unwrap();

    let status = ctl.view().status.current().unwrap();
    assert_eq!(status.message, "✅ Initialized with 3 existing PDF files");
    assert!(last_block(&ctl).contains("Initialized with documents: a.pdf, b.pdf, c.pdf"));

    server.verify().await;
}

#[tokio::test]
async fn initialize_without_files_adds_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/initialize-with-existing-pdfs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Nothing new"})))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    initialize_with_existing_pdfs(&mut ctl).await.unwrap();
    assert!(ctl.view().transcript.is_empty());
    assert_eq!(ctl.view().status.current().unwrap().message, "✅ Nothing new");
}

#[tokio::test]
async fn initialize_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/initialize-with-existing-pdfs"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "No PDF files found"})))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    assert!(initialize_with_existing_pdfs(&mut ctl).await.is_none());
    assert_eq!(
        ctl.view().status.current().unwrap().message,
        "❌ Error: No PDF files found"
    );

    let mut offline = controller_for("http://127.0.0.1:9");
    assert!(initialize_with_existing_pdfs(&mut offline).await.is_none());
    let status = offline.view().status.current().unwrap();
    assert_eq!(status.severity, Severity::Error);
    assert!(status.message.starts_with("❌ Initialization failed: "));
}

#[tokio::test]
async fn recent_sessions_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recent-sessions"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessions": [
                {
                    "session_id": "s-1",
                    "created_at": "2024-03-01T10:00:00.123",
                    "last_updated": "2024-03-01T10:30:00",
                    "total_exchanges": 3,
                    "preview": "What is Section 80C?"
                },
                {
                    "session_id": "s-2",
                    "created_at": "2024-02-20T08:00:00",
                    "total_exchanges": 1,
                    "preview": "<b>bail</b> under BNS"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    let sessions = show_recent_sessions(&mut ctl, Some(5)).await.unwrap();
    assert_eq!(sessions.len(), 2);

    let block = last_block(&ctl);
    assert_eq!(block.matches("session-entry").count(), 2);
    assert!(block.contains("2024-03-01 • 3 exchanges"));
    assert!(block.contains("&lt;b&gt;bail&lt;/b&gt; under BNS"));

    server.verify().await;
}

#[tokio::test]
async fn no_recent_sessions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recent-sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sessions": []})))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    assert_eq!(show_recent_sessions(&mut ctl, None).await.map(|s| s.len()), Some(0));
    assert!(last_block(&ctl).contains("No recent conversations found."));
}

#[tokio::test]
async fn recent_sessions_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/recent-sessions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db locked"})))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    assert!(show_recent_sessions(&mut ctl, Some(10)).await.is_none());
    assert!(last_block(&ctl).contains("Error loading conversation history."));
}
