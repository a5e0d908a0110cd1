use crate::config::Config;

pub fn render_status(config: &Config) -> String {
    let transcript = config
        .transcript_path()
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());

    let lines = [
        "◆ lexichat status".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        String::new(),
        format!("  Backend           {}", config.backend.base_url),
        format!("  Timeout           {}s", config.backend.timeout_secs),
        format!("  Connect timeout   {}s", config.backend.connect_timeout_secs),
        format!("  Recent sessions   {}", config.backend.recent_sessions_limit),
        String::new(),
        format!(
            "  Welcome message   {}",
            if config.ui.show_welcome { "on" } else { "off" }
        ),
        format!("  Banner clears     {}s", config.ui.status_clear_secs),
        format!("  Transcript        {transcript}"),
        format!("  Log level         {}", config.observability.log_level),
    ];
    lines.join("\n")
}
