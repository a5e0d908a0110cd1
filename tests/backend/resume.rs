use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lexichat::session::SessionId;
use lexichat::ui::Severity;

use crate::backend_harness::{controller, count_blocks, last_block, mount_new_conversation, source};

fn history(n: usize) -> serde_json::Value {
    let entries: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "user_question": format!("question {i}"),
                "assistant_response": format!("answer {i}"),
                "sources": [source("Constitution", 10 + u32::try_from(i).unwrap())],
                "timestamp": "2024-03-01T10:00:00.000000"
            })
        })
        .collect();
    json!({"session_id": "ignored-by-client", "history": entries})
}

#[tokio::test]
async fn resume_replays_two_blocks_per_exchange_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversation-history/s-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history(4)))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    let exchanges = ctl.resume_conversation(SessionId::new("s-9")).await.unwrap();

    assert_eq!(exchanges.len(), 4);
    assert_eq!(ctl.session_id().map(SessionId::as_str), Some("s-9"));
    assert_eq!(ctl.history(), exchanges.as_slice());

    let blocks = ctl.view().transcript.blocks();
    assert_eq!(blocks.len(), 8);
    for (i, pair) in blocks.chunks(2).enumerate() {
        assert!(pair[0].as_str().contains("message-user"));
        assert!(pair[0].as_str().contains(&format!("question {i}")));
        assert!(pair[1].as_str().contains("message-assistant"));
        assert!(pair[1].as_str().contains(&format!("answer {i}")));
        assert!(pair[1].as_str().contains(&format!("Constitution - Page {}", 10 + i)));
    }

    let status = ctl.view().status.current().unwrap();
    assert_eq!(status.severity, Severity::Success);
    assert!(status.message.starts_with("✅ Loaded conversation with 4 previous exchanges"));

    server.verify().await;
}

#[tokio::test]
async fn resume_replaces_current_conversation() {
    let server = MockServer::start().await;
    mount_new_conversation(&server, "current").await;
    Mock::given(method("GET"))
        .and(path("/api/conversation-history/older"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history(1)))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.start_new_conversation().await;
    ctl.record_exchange("local", "only", Vec::new());

    ctl.resume_conversation(SessionId::new("older")).await.unwrap();
    assert_eq!(ctl.history().len(), 1);
    assert_eq!(ctl.history()[0].question, "question 0");
    assert_eq!(ctl.view().transcript.len(), 2);
}

#[tokio::test]
async fn resume_encodes_session_id_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/conversation-history/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history(0)))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    let exchanges = ctl.resume_conversation(SessionId::new("a b")).await.unwrap();
    assert!(exchanges.is_empty());
    assert!(ctl.view().transcript.is_empty());
    assert_eq!(ctl.session_id().map(SessionId::as_str), Some("a b"));

    server.verify().await;
}

#[tokio::test]
async fn failed_resume_shows_error_and_keeps_session() {
    let server = MockServer::start().await;
    mount_new_conversation(&server, "keep-me").await;
    Mock::given(method("GET"))
        .and(path("/api/conversation-history/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Session not found"})))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.start_new_conversation().await;

    let err = ctl.resume_conversation(SessionId::new("gone")).await.unwrap_err();
    assert_eq!(err.user_message(), "Session not found");
    assert_eq!(ctl.session_id().map(SessionId::as_str), Some("keep-me"));
    assert_eq!(count_blocks(&ctl, "message-system"), 1);
    assert!(last_block(&ctl).contains("❌ Error loading conversation."));
}
