use super::types::{Exchange, Session, SessionId, SessionState};
use crate::api::{Backend, QueryRequest, Source};
use crate::error::ApiError;
use crate::render::{Message, render, welcome_text};
use crate::ui::{ChatView, Severity};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shown in place of an answer whenever a query fails, whatever the cause.
pub const APOLOGY_TEXT: &str =
    "I'm sorry, but I'm having trouble connecting to the server. Please try again later.";

#[derive(Debug)]
pub enum QueryOutcome {
    /// Blank input; nothing was sent.
    Skipped,
    Answered(Exchange),
    /// The apology was shown instead of an answer.
    Failed(ApiError),
}

/// Owns the conversation: which session is current, the local exchange log
/// and the view the exchanges are rendered into.
///
/// Every mutating operation takes `&mut self`, so at most one request is in
/// flight per controller.
pub struct SessionController {
    backend: Arc<dyn Backend>,
    state: SessionState,
    history: Vec<Exchange>,
    view: ChatView,
    show_welcome: bool,
}

impl SessionController {
    pub fn new(backend: Arc<dyn Backend>, view: ChatView) -> Self {
        Self {
            backend,
            state: SessionState::Uninitialized,
            history: Vec::new(),
            view,
            show_welcome: true,
        }
    }

    pub fn with_welcome(mut self, show_welcome: bool) -> Self {
        self.show_welcome = show_welcome;
        self
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.state.session_id()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    pub fn view(&self) -> &ChatView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ChatView {
        &mut self.view
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Replaces the session and drops everything tied to the old one.
    fn replace_session(&mut self, id: SessionId) {
        self.state = SessionState::Active(Session::new(id));
        self.history.clear();
        self.view.transcript.clear();
    }

    /// Takes over an id the backend handed back with an answer. The local
    /// log is kept: this is the same conversation from the user's side.
    fn adopt_session_id(&mut self, id: SessionId) {
        if id.is_empty() || self.state.session_id() == Some(&id) {
            return;
        }
        info!(session_id = %id, "backend assigned session");
        self.state = SessionState::Active(Session::new(id));
    }

    /// Asks the backend for a fresh session. Failures are logged and leave
    /// the current state alone.
    pub async fn start_new_conversation(&mut self) -> Option<SessionId> {
        let created = match self.backend.new_conversation().await {
            Ok(created) => created,
            Err(e) => {
                warn!(error = %e, "could not start a new conversation");
                return None;
            }
        };
        if created.session_id.is_empty() {
            warn!("backend returned an empty session id");
            return None;
        }

        let id = created.session_id;
        self.replace_session(id.clone());
        if self.show_welcome {
            self.view
                .transcript
                .push(render(&Message::assistant(welcome_text())));
        }
        info!(session_id = %id, "started new conversation");
        Some(id)
    }

    /// Loads a stored conversation and replays it into the view.
    pub async fn resume_conversation(&mut self, id: SessionId) -> Result<Vec<Exchange>, ApiError> {
        let history = match self.backend.conversation_history(&id).await {
            Ok(history) => history,
            Err(e) => {
                warn!(session_id = %id, error = %e, "could not load conversation");
                self.view
                    .transcript
                    .push(render(&Message::System("❌ Error loading conversation.".into())));
                return Err(e);
            }
        };

        let exchanges: Vec<Exchange> = history.history.into_iter().map(Exchange::from).collect();
        self.replace_session(id.clone());
        for exchange in &exchanges {
            self.view
                .transcript
                .push(render(&Message::User(exchange.question.clone())));
            self.view.transcript.push(render(&Message::Assistant {
                answer: exchange.answer.clone(),
                sources: exchange.sources.clone(),
                follow_up: false,
            }));
        }
        self.history.clone_from(&exchanges);
        self.view.status.show(
            format!(
                "✅ Loaded conversation with {} previous exchanges. \
                 You can continue the conversation with context awareness.",
                exchanges.len()
            ),
            Severity::Success,
        );
        info!(session_id = %id, exchanges = exchanges.len(), "resumed conversation");
        Ok(exchanges)
    }

    pub fn record_exchange(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
        sources: Vec<Source>,
    ) -> &Exchange {
        self.history.push(Exchange::new(question, answer, sources));
        let last = self.history.len() - 1;
        &self.history[last]
    }

    /// Sends one question and renders the outcome.
    pub async fn submit_query(&mut self, question: &str) -> QueryOutcome {
        let question = question.trim();
        if question.is_empty() {
            debug!("ignoring blank question");
            return QueryOutcome::Skipped;
        }

        self.view
            .transcript
            .push(render(&Message::User(question.to_string())));

        let result = {
            let _typing = self.view.typing.acquire();
            let request = QueryRequest {
                question,
                session_id: self.state.session_id(),
            };
            self.backend.query(&request).await
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "query failed");
                self.view
                    .transcript
                    .push(render(&Message::assistant(APOLOGY_TEXT)));
                return QueryOutcome::Failed(e);
            }
        };

        if let Some(id) = response.session_id {
            self.adopt_session_id(id);
        }
        debug!(
            sources = response.sources.len(),
            follow_up = response.is_follow_up,
            "received answer"
        );

        self.view.transcript.push(render(&Message::Assistant {
            answer: response.answer.clone(),
            sources: response.sources.clone(),
            follow_up: response.is_follow_up,
        }));
        let exchange = self
            .record_exchange(question, response.answer, response.sources)
            .clone();
        QueryOutcome::Answered(exchange)
    }
}
