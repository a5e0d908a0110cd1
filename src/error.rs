use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `lexichat`.
///
/// Library callers can match on these to decide recovery strategy; the
/// binary and its command handlers use `anyhow::Result` for ad-hoc context
/// chains.
#[derive(Debug, Error)]
pub enum LexiError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Backend API ─────────────────────────────────────────────────────
    #[error("api: {0}")]
    Api(#[from] ApiError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Backend API errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("{endpoint} request failed: {message}")]
    Request { endpoint: String, message: String },

    /// The backend answered with a non-2xx status. `message` carries the
    /// backend's `error` field when present.
    #[error("{endpoint} returned {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("{endpoint} response could not be decoded: {message}")]
    Decode { endpoint: String, message: String },

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// The text the operational UI surfaces verbatim: the backend's own
    /// error string for status failures, the full description otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// True when the backend was reached and answered with an error body.
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, LexiError>;
