use super::Markup;
use super::escape::escape_html;
use crate::api::SessionSummary;
use crate::session::parse_timestamp;
use std::fmt::Write;

pub const FOLLOW_UP_NOTICE: &str = r#"<div class="text-xs text-blue-600 italic mb-2">💬 Building on our previous conversation...</div>"#;

const WELCOME: &str = "Hello! I'm your Indian Legal Assistant with context awareness. \
I can help you with questions about:
• **Indian Constitution** - Articles, Fundamental Rights, Directive Principles
• **Bharatiya Nyaya Sanhita** - Criminal law provisions and sections
• **Income Tax Laws** - Tax deductions, TDS, Assessment, Compliance
💬 I remember our conversation context, so feel free to ask follow-up questions!";

/// Greeting shown at the top of a fresh conversation, written in the same
/// dialect as backend answers so it goes through the formatting chain.
pub fn welcome_text() -> &'static str {
    WELCOME
}

/// `YYYY-MM-DD` when the backend timestamp parses, the raw text otherwise.
fn display_date(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || escape_html(raw),
        |ts| ts.format("%Y-%m-%d").to_string(),
    )
}

/// "Recent Conversations" list; each entry carries its id for loading.
pub fn render_session_list(sessions: &[SessionSummary]) -> Markup {
    let mut html = String::from(
        r#"<div class="message-bubble message-system"><div class="bg-yellow-100 border-l-4 border-yellow-400 p-4 rounded"><p class="font-semibold text-yellow-800 mb-2">📋 Recent Conversations:</p><div class="space-y-2">"#,
    );
    for session in sessions {
        let _ = write!(
            html,
            r#"<div class="session-entry p-2 bg-white rounded border" data-session-id="{}"><p class="text-sm font-medium">{}</p><p class="text-xs text-gray-500">{} • {} exchanges</p></div>"#,
            escape_html(session.session_id.as_str()),
            escape_html(&session.preview),
            display_date(&session.created_at),
            session.total_exchanges
        );
    }
    html.push_str("</div></div></div>");
    Markup::new(html)
}
