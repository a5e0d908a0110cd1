use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("LEXICHAT_BACKEND_URL")
            && !url.trim().is_empty()
        {
            self.backend.base_url = url.trim().to_string();
        }

        if let Ok(timeout_str) = std::env::var("LEXICHAT_TIMEOUT_SECS")
            && let Ok(timeout) = timeout_str.trim().parse::<u64>()
            && timeout > 0
        {
            self.backend.timeout_secs = timeout;
        }

        if let Ok(level) = std::env::var("LEXICHAT_LOG_LEVEL")
            && !level.trim().is_empty()
        {
            self.observability.log_level = level.trim().to_string();
        }

        if let Ok(path) = std::env::var("LEXICHAT_TRANSCRIPT")
            && !path.trim().is_empty()
        {
            self.ui.transcript_path = Some(path);
        }
    }
}
