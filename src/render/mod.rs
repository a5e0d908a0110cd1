//! Turns chat messages into HTML fragments.
//!
//! The [`Message`] variant decides how text is treated: user and system text
//! is always escaped, assistant text goes through the formatting chain in
//! [`rules`]. Rendering never fails.

pub mod blocks;
pub mod escape;
pub mod rules;
pub mod sources;

pub use blocks::{FOLLOW_UP_NOTICE, render_session_list, welcome_text};
pub use escape::escape_html;
pub use rules::{Target, format_answer, format_answer_terminal};
pub use sources::{INLINE_SOURCE_LIMIT, render_sources};

use crate::api::Source;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    User(String),
    System(String),
    Assistant {
        answer: String,
        sources: Vec<Source>,
        follow_up: bool,
    },
}

impl Message {
    pub fn assistant(answer: impl Into<String>) -> Self {
        Self::Assistant {
            answer: answer.into(),
            sources: Vec::new(),
            follow_up: false,
        }
    }
}

/// A rendered HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn render(message: &Message) -> Markup {
    let html = match message {
        Message::User(text) => format!(
            r#"<div class="message-bubble message-user flex justify-end"><div class="bg-blue-600 text-white p-4 rounded-lg max-w-3xl"><p>{}</p></div></div>"#,
            escape_html(text)
        ),
        Message::System(text) => format!(
            r#"<div class="message-bubble message-system"><div class="bg-yellow-100 border-l-4 border-yellow-400 p-4 rounded"><p class="text-yellow-800">{}</p></div></div>"#,
            escape_html(text)
        ),
        Message::Assistant {
            answer,
            sources,
            follow_up,
        } => format!(
            r#"<div class="message-bubble message-assistant"><div class="bg-gray-100 p-4 rounded-lg"><div class="flex items-start"><i class="fas fa-robot text-blue-600 mr-3 mt-1"></i><div class="flex-1"><div class="prose prose-sm max-w-none">{}{}</div>{}</div></div></div></div>"#,
            if *follow_up { FOLLOW_UP_NOTICE } else { "" },
            format_answer(answer),
            render_sources(sources)
        ),
    };
    Markup(html)
}
