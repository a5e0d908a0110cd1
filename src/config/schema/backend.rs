use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Origin of the question-answering backend (default: http://127.0.0.1:5000)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout; queries can take a while on cold indexes
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// How many sessions `/api/recent-sessions` is asked for
    #[serde(default = "default_recent_sessions_limit")]
    pub recent_sessions_limit: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_recent_sessions_limit() -> u32 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            recent_sessions_limit: default_recent_sessions_limit(),
        }
    }
}
