//! Transient notifications.

use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A toast message that dismisses itself after [`NOTICE_TTL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    raised_at: Instant,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::raised_at(NoticeLevel::Info, message, Instant::now())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::raised_at(NoticeLevel::Warning, message, Instant::now())
    }

    pub fn raised_at(level: NoticeLevel, message: impl Into<String>, at: Instant) -> Self {
        Self {
            level,
            message: message.into(),
            raised_at: at,
        }
    }

    pub fn is_active_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < NOTICE_TTL
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Instant::now())
    }
}
