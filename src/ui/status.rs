use std::time::{Duration, Instant};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "bg-blue-100 text-blue-800 border-blue-300",
            Self::Success => "bg-green-100 text-green-800 border-green-300",
            Self::Error => "bg-red-100 text-red-800 border-red-300",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
}

/// Transient operational notice, separate from the transcript.
///
/// Success and error banners disappear `clear_after` after being shown;
/// info banners stay until replaced or cleared.
#[derive(Debug, Clone)]
pub struct StatusBanner {
    current: Option<Status>,
    clear_after: Duration,
}

impl StatusBanner {
    pub fn new(clear_after: Duration) -> Self {
        Self {
            current: None,
            clear_after,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.show_at(message, severity, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let message = message.into();
        tracing::debug!(%severity, %message, "status banner");
        self.current = Some(Status {
            message,
            severity,
            shown_at: now,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Status> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&Status> {
        self.current.as_ref().filter(|status| {
            status.severity == Severity::Info
                || now.saturating_duration_since(status.shown_at) < self.clear_after
        })
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
