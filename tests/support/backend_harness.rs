#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lexichat::api::http_client::build_backend_client_with_timeouts;
use lexichat::api::{Backend, HttpBackend};
use lexichat::session::SessionController;
use lexichat::ui::ChatView;

pub fn controller_for(base_url: &str) -> SessionController {
    let client = build_backend_client_with_timeouts(5, 2);
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(base_url, client).unwrap());
    SessionController::new(backend, ChatView::default())
}

pub fn controller(server: &MockServer) -> SessionController {
    controller_for(&server.uri())
}

pub async fn mount_new_conversation(server: &MockServer, session_id: &str) {
    Mock::given(method("POST"))
        .and(path("/api/new-conversation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": session_id,
            "message": "New conversation started"
        })))
        .mount(server)
        .await;
}

pub fn answer_body(answer: &str, session_id: Option<&str>) -> Value {
    json!({
        "answer": answer,
        "sources": [],
        "session_id": session_id,
        "is_follow_up": false
    })
}

pub fn source(document_type: &str, page: u32) -> Value {
    json!({
        "content": format!("Excerpt from page {page}"),
        "metadata": {"document_type": document_type, "page_number": page}
    })
}

/// Blocks of one kind (`message-user`, `message-assistant`, `message-system`).
pub fn count_blocks(ctl: &SessionController, kind: &str) -> usize {
    ctl.view()
        .transcript
        .blocks()
        .iter()
        .filter(|b| b.as_str().contains(kind))
        .count()
}

pub fn last_block(ctl: &SessionController) -> String {
    ctl.view()
        .transcript
        .last()
        .map(|b| b.as_str().to_string())
        .unwrap_or_default()
}
