use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Append the assistant greeting after a new conversation starts (default: true)
    #[serde(default = "default_true")]
    pub show_welcome: bool,
    /// Seconds before success/error banners clear themselves (default: 5)
    #[serde(default = "default_status_clear_secs")]
    pub status_clear_secs: u64,
    /// Where the rendered HTML transcript is written, if anywhere
    #[serde(default)]
    pub transcript_path: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_status_clear_secs() -> u64 {
    5
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_welcome: true,
            status_clear_secs: default_status_clear_secs(),
            transcript_path: None,
        }
    }
}
