use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lexichat::session::{APOLOGY_TEXT, QueryOutcome, SessionId};

use crate::backend_harness::{
    answer_body, controller, count_blocks, last_block, mount_new_conversation, source,
};

#[tokio::test]
async fn question_sends_exactly_one_request_with_current_session() {
    let server = MockServer::start().await;
    mount_new_conversation(&server, "s-1").await;

    Mock::given(method("POST"))
        .and(path("/api/query"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"question": "What is TDS?", "session_id": "s-1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(answer_body("TDS is tax deducted at source.", Some("s-1"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    assert_eq!(ctl.start_new_conversation().await, Some(SessionId::new("s-1")));

    let outcome = ctl.submit_query("   What is TDS?  ").await;
    let QueryOutcome::Answered(exchange) = outcome else {
        panic!("expected an answer, got {outcome:?}");
    };
    assert_eq!(exchange.question, "What is TDS?");
    assert_eq!(exchange.answer, "TDS is tax deducted at source.");
    assert_eq!(ctl.history().len(), 1);
    assert_eq!(count_blocks(&ctl, "message-user"), 1);

    server.verify().await;
}

#[tokio::test]
async fn whitespace_question_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("never", None)))
        .expect(0)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    for blank in ["", "   ", "\n\t "] {
        assert!(matches!(ctl.submit_query(blank).await, QueryOutcome::Skipped));
    }
    assert!(ctl.view().transcript.is_empty());
    assert!(ctl.history().is_empty());

    server.verify().await;
}

#[tokio::test]
async fn first_query_without_session_sends_null_and_adopts_returned_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .and(body_json(json!({"question": "Explain Article 21", "session_id": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("Right to life.", Some("X"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .and(body_json(json!({"question": "And its limits?", "session_id": "X"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("Procedure established by law.", None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    assert!(ctl.session_id().is_none());

    ctl.submit_query("Explain Article 21").await;
    assert_eq!(ctl.session_id().map(SessionId::as_str), Some("X"));

    ctl.submit_query("And its limits?").await;
    assert_eq!(ctl.session_id().map(SessionId::as_str), Some("X"));
    assert_eq!(ctl.history().len(), 2);

    server.verify().await;
}

#[tokio::test]
async fn response_session_id_replaces_current_one() {
    let server = MockServer::start().await;
    mount_new_conversation(&server, "old").await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("ok", Some("new"))))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.start_new_conversation().await;
    ctl.submit_query("q").await;

    assert_eq!(ctl.session_id().map(SessionId::as_str), Some("new"));
    assert_eq!(ctl.history().len(), 1);
}

#[tokio::test]
async fn backend_error_becomes_single_apology() {
    let server = MockServer::start().await;
    mount_new_conversation(&server, "s-err").await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "vector store offline"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    ctl.start_new_conversation().await;
    let assistant_before = count_blocks(&ctl, "message-assistant");

    let outcome = ctl.submit_query("What is Section 80C?").await;
    assert!(matches!(outcome, QueryOutcome::Failed(ref e) if e.is_backend_error()));

    assert_eq!(count_blocks(&ctl, "message-assistant"), assistant_before + 1);
    let last = last_block(&ctl);
    assert!(last.contains(APOLOGY_TEXT));
    assert!(!last.contains("vector store offline"));
    assert_eq!(ctl.session_id().map(SessionId::as_str), Some("s-err"));
    assert!(ctl.history().is_empty());
    assert!(!ctl.view().typing.is_active());

    server.verify().await;
}

#[tokio::test]
async fn undecodable_answer_is_also_an_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    let outcome = ctl.submit_query("q").await;

    assert!(matches!(outcome, QueryOutcome::Failed(_)));
    assert!(last_block(&ctl).contains(APOLOGY_TEXT));
    assert!(ctl.session_id().is_none());
}

#[tokio::test]
async fn follow_up_answers_carry_notice_and_sources() {
    let server = MockServer::start().await;
    let sources: Vec<_> = (1..=5).map(|p| source("Income Tax Act", p)).collect();
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "**Deduction** under Section 80C is capped at ₹1,50,000.",
            "sources": sources,
            "session_id": "s-5",
            "is_follow_up": true
        })))
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    let QueryOutcome::Answered(exchange) = ctl.submit_query("How much can I claim?").await else {
        panic!("expected an answer");
    };
    assert_eq!(exchange.sources.len(), 5);

    let block = last_block(&ctl);
    assert!(block.contains("Building on our previous conversation"));
    assert_eq!(block.matches("source-entry").count(), 3);
    assert!(block.contains("+2 more sources"));
    assert!(block.contains("Income Tax Act - Page 1"));
    assert!(block.contains("₹1,50,000</span>"));
}

#[tokio::test]
async fn failed_new_conversation_is_silent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/new-conversation"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "starting up"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctl = controller(&server);
    assert!(ctl.start_new_conversation().await.is_none());
    assert!(ctl.session_id().is_none());
    assert!(ctl.view().transcript.is_empty());
    assert!(ctl.view().status.current().is_none());

    server.verify().await;
}
