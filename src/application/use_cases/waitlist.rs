use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::{email_templates, validators},
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

// ============================================================================
// Ports
// ============================================================================

/// Canonical waitlist storage. Implementations must reject a second entry
/// with the same email with `AppError::DuplicateEmail`.
#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>>;
    /// All entries, oldest first.
    async fn list(&self) -> AppResult<Vec<WaitlistEntry>>;
    async fn count(&self) -> AppResult<i64>;
    /// Removes every entry and returns how many were deleted.
    async fn delete_all(&self) -> AppResult<u64>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()>;
}

// ============================================================================
// Use cases
// ============================================================================

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    email: Arc<dyn EmailSender>,
    owner_email: String,
    product_name: String,
}

impl WaitlistUseCases {
    pub fn new(
        repo: Arc<dyn WaitlistRepo>,
        email: Arc<dyn EmailSender>,
        owner_email: String,
        product_name: String,
    ) -> Self {
        Self {
            repo,
            email,
            owner_email,
            product_name,
        }
    }

    /// Validate, dedupe, store and notify the owner.
    ///
    /// The owner notification runs after the entry is stored and its failure
    /// does not undo or fail the signup.
    #[instrument(skip(self, input), fields(email = %input.email.trim()))]
    pub async fn submit(&self, input: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        let candidate = validators::validate_new_entry(input)?;

        let existing_count = self.repo.count().await?;

        if self.repo.find_by_email(&candidate.email).await?.is_some() {
            tracing::info!("Rejected duplicate waitlist signup");
            return Err(AppError::DuplicateEmail);
        }

        // The repo enforces uniqueness too, so a concurrent submission that
        // slipped past the lookup above still ends up as DuplicateEmail.
        let entry = self.repo.insert(&candidate).await?;
        tracing::info!(entry_id = %entry.id, existing_count, "Waitlist signup stored");

        if let Err(err) = self.notify_owner(&entry, existing_count).await {
            tracing::warn!(
                entry_id = %entry.id,
                error = %err,
                "Owner notification failed; signup kept"
            );
        }

        Ok(entry)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> AppResult<i64> {
        self.repo.count().await
    }

    #[instrument(skip(self))]
    pub async fn clear_all(&self) -> AppResult<u64> {
        let deleted = self.repo.delete_all().await?;
        tracing::warn!(deleted, "Waitlist cleared");
        Ok(deleted)
    }

    async fn notify_owner(&self, entry: &WaitlistEntry, existing_count: i64) -> AppResult<()> {
        let (subject, html) =
            email_templates::new_signup_email(&self.product_name, entry, existing_count);
        self.email.send(&self.owner_email, &subject, &html).await
    }
}
