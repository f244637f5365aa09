use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use super::store::WaitlistApi;

/// Last known waitlist size for the social-proof banner.
///
/// Refreshing is best effort: a failed fetch keeps the previous value.
pub struct WaitlistCounter {
    api: Arc<dyn WaitlistApi>,
    last: AtomicU64,
}

impl WaitlistCounter {
    pub fn new(api: Arc<dyn WaitlistApi>) -> Self {
        Self {
            api,
            last: AtomicU64::new(0),
        }
    }

    /// Value shown right now, without hitting the store.
    pub fn current(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }

    /// Fetches the store's size and returns it. Never fails.
    pub async fn refresh_count(&self) -> u64 {
        match self.api.count().await {
            Ok(count) => {
                self.last.store(count, Ordering::Relaxed);
                count
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to refresh waitlist count");
                self.current()
            }
        }
    }
}
