use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// "Assistant is typing" flag shared between the controller and whoever
/// draws the view.
#[derive(Debug, Clone, Default)]
pub struct TypingIndicator {
    active: Arc<AtomicBool>,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Shows the indicator until the returned guard is dropped.
    #[must_use = "the indicator is hidden again as soon as the guard drops"]
    pub fn acquire(&self) -> TypingGuard {
        self.active.store(true, Ordering::SeqCst);
        TypingGuard {
            active: Arc::clone(&self.active),
        }
    }
}

#[derive(Debug)]
pub struct TypingGuard {
    active: Arc<AtomicBool>,
}

impl Drop for TypingGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}
