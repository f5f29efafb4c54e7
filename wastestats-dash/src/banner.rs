//! Transient error banner
//!
//! The dashboard surfaces user-facing errors as a banner that clears itself
//! after a few seconds. Showing a new message replaces the old one and
//! invalidates its pending dismissal, so an earlier timer can never clear a
//! later message.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use log::debug;

use crate::lock;

/// How long a banner message stays visible by default.
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

/// The error channel pages report user-facing problems to.
pub trait ErrorSink: Send + Sync {
    /// Reports one user-facing message.
    fn report(&self, message: &str);
}

/// Default [`ErrorSink`]: a message slot with timed auto-dismiss.
///
/// Cheap to clone; clones share the same message slot. `show` must be called
/// from within a Tokio runtime, since the dismissal timer is a spawned task.
#[derive(Clone, Default)]
pub struct ErrorBanner {
    inner: Arc<BannerInner>,
    timeout: Option<Duration>,
}

#[derive(Default)]
struct BannerInner {
    message: Mutex<Option<String>>,
    // Bumped on every show/clear; a dismiss task only clears if its
    // generation is still the latest when the timer fires.
    generation: AtomicU64,
}

impl ErrorBanner {
    /// Creates a banner with the default 3 second dismissal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a banner with a custom dismissal timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            inner: Arc::default(),
            timeout: Some(timeout),
        }
    }

    /// Shows a message, replacing any current one and cancelling its
    /// pending dismissal.
    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        debug!("banner: {message}");

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *lock(&self.inner.message) = Some(message);

        let inner = Arc::clone(&self.inner);
        let timeout = self.timeout.unwrap_or(DISMISS_AFTER);
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let mut slot = lock(&inner.message);
            // A newer show or clear owns the slot now.
            if inner.generation.load(Ordering::SeqCst) == generation {
                *slot = None;
            }
        });
    }

    /// Dismisses the current message immediately.
    pub fn clear(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        *lock(&self.inner.message) = None;
    }

    /// The currently visible message, if any.
    pub fn message(&self) -> Option<String> {
        lock(&self.inner.message).clone()
    }
}

impl ErrorSink for ErrorBanner {
    fn report(&self, message: &str) {
        self.show(message);
    }
}
