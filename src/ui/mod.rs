//! What the user sees: transcript, typing indicator and status banner.

pub mod page;
pub mod status;
pub mod style;
pub mod transcript;
pub mod typing;

pub use status::{Severity, Status, StatusBanner};
pub use transcript::Transcript;
pub use typing::{TypingGuard, TypingIndicator};

use crate::config::UiConfig;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct ChatView {
    pub transcript: Transcript,
    pub typing: TypingIndicator,
    pub status: StatusBanner,
}

impl ChatView {
    pub fn new(status_clear_after: Duration) -> Self {
        Self {
            transcript: Transcript::new(),
            typing: TypingIndicator::new(),
            status: StatusBanner::new(status_clear_after),
        }
    }

    pub fn from_config(config: &UiConfig) -> Self {
        Self::new(Duration::from_secs(config.status_clear_secs))
    }
}
