use std::sync::Arc;

use crate::domain::entities::waitlist_entry::WaitlistEntry;

use super::{counter::WaitlistCounter, error::ClientError, store::WaitlistApi};

/// Admin view over the waitlist.
pub struct AdminPanel {
    api: Arc<dyn WaitlistApi>,
    counter: Arc<WaitlistCounter>,
}

impl AdminPanel {
    pub fn new(api: Arc<dyn WaitlistApi>, counter: Arc<WaitlistCounter>) -> Self {
        Self { api, counter }
    }

    pub async fn entries(&self) -> Result<Vec<WaitlistEntry>, ClientError> {
        self.api.list().await
    }

    /// Irreversibly deletes every entry once `confirm` agrees.
    ///
    /// Returns `Ok(None)` when the confirmation was declined, in which case
    /// the store is not contacted. On success the counter is refreshed.
    pub async fn clear_all(
        &self,
        confirm: impl FnOnce() -> bool,
    ) -> Result<Option<u64>, ClientError> {
        if !confirm() {
            return Ok(None);
        }

        let deleted = self.api.clear().await?;
        tracing::info!(deleted, "Waitlist cleared from admin panel");
        self.counter.refresh_count().await;
        Ok(Some(deleted))
    }
}
