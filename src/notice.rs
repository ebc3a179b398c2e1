//! User-visible notices.
//!
//! Warnings and errors raised during a reconciliation pass surface as
//! transient notices. Delivery is decoupled from pass control flow: the
//! coordinator decides synchronously what to do with an error, while the
//! notice itself can be delivered later on a background thread so rapid
//! edits do not flood the user.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default delay before a notice is shown.
pub const NOTICE_DELAY_MS: u64 = 1000;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A transient user-visible message.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }
}

/// Destination for notices.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Sink that prints notices to stderr and mirrors them into tracing.
#[derive(Debug, Default)]
pub struct ConsoleNotice;

impl NoticeSink for ConsoleNotice {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Warning => tracing::warn!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::error!(message = %notice.message, "notice"),
        }
        eprintln!("notice: {}", notice.message);
    }
}

/// Sink that retains notices in memory.
///
/// Used by tests and by embedders that render notices themselves.
#[derive(Debug, Default)]
pub struct MemoryNotice {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotice {
    /// Messages of all notices received so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .expect("notice buffer poisoned")
            .iter()
            .map(|notice| notice.message.clone())
            .collect()
    }

    /// Drain the buffered notices.
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().expect("notice buffer poisoned"))
    }
}

impl NoticeSink for MemoryNotice {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .expect("notice buffer poisoned")
            .push(notice);
    }
}

/// Decorator that delivers notices after a fixed delay.
///
/// Each notice is handed to a detached thread that sleeps, then forwards to
/// the inner sink. Fire-and-forget: suitable for long-running processes
/// (the watch loop), not for a one-shot command about to exit.
pub struct DelayedNotice {
    inner: Arc<dyn NoticeSink>,
    delay: Duration,
}

impl DelayedNotice {
    pub fn new(inner: Arc<dyn NoticeSink>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl NoticeSink for DelayedNotice {
    fn notify(&self, notice: Notice) {
        let inner = Arc::clone(&self.inner);
        let delay = self.delay;
        thread::spawn(move || {
            thread::sleep(delay);
            inner.notify(notice);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_retains_order() {
        let sink = MemoryNotice::default();
        sink.notify(Notice::warning("first"));
        sink.notify(Notice::error("second"));
        assert_eq!(sink.messages(), vec!["first", "second"]);

        let drained = sink.take();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NoticeLevel::Warning);
        assert_eq!(drained[1].level, NoticeLevel::Error);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn delayed_sink_delivers_after_the_delay() {
        let inner = Arc::new(MemoryNotice::default());
        let delayed = DelayedNotice::new(inner.clone(), Duration::from_millis(20));

        delayed.notify(Notice::warning("late"));
        assert!(inner.messages().is_empty());

        thread::sleep(Duration::from_millis(200));
        assert_eq!(inner.messages(), vec!["late"]);
    }
}
