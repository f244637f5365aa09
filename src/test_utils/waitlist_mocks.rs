//! In-memory implementations of the server-side ports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::{EmailSender, WaitlistRepo},
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
    infra::RateLimiterTrait,
};

// ============================================================================
// InMemoryWaitlistRepo
// ============================================================================

/// In-memory implementation of WaitlistRepo. Enforces email uniqueness like
/// the unique index does.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub entries: Mutex<Vec<WaitlistEntry>>,
    calls: AtomicUsize,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all entries (for test assertions).
    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of repo calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        self.touch();
        let mut entries = self.entries.lock().unwrap();

        if entries.iter().any(|e| e.email == entry.email) {
            return Err(AppError::DuplicateEmail);
        }

        let stored = WaitlistEntry {
            id: Uuid::new_v4(),
            first_name: entry.first_name.clone(),
            last_name: entry.last_name.clone(),
            email: entry.email.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        entries.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        self.touch();
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        self.touch();
        Ok(self.get_all())
    }

    async fn count(&self) -> AppResult<i64> {
        self.touch();
        Ok(self.entries.lock().unwrap().len() as i64)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        self.touch();
        let mut entries = self.entries.lock().unwrap();
        let deleted = entries.len() as u64;
        entries.clear();
        Ok(deleted)
    }
}

/// Repo whose lookup never sees existing rows, as when two submissions of
/// the same email race past `find_by_email`. Only `insert` can catch the
/// duplicate.
pub struct StaleLookupWaitlistRepo {
    inner: Arc<InMemoryWaitlistRepo>,
}

impl StaleLookupWaitlistRepo {
    pub fn new(inner: Arc<InMemoryWaitlistRepo>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl WaitlistRepo for StaleLookupWaitlistRepo {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        self.inner.insert(entry).await
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<WaitlistEntry>> {
        Ok(None)
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        self.inner.list().await
    }

    async fn count(&self) -> AppResult<i64> {
        self.inner.count().await
    }

    async fn delete_all(&self) -> AppResult<u64> {
        self.inner.delete_all().await
    }
}

// ============================================================================
// Email senders
// ============================================================================

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Records every email instead of sending it.
#[derive(Default)]
pub struct InMemoryEmailSender {
    sent: Mutex<Vec<SentEmail>>,
}

impl InMemoryEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for InMemoryEmailSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

/// Email sender whose provider is always down.
pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, _to: &str, _subject: &str, _html: &str) -> AppResult<()> {
        Err(AppError::EmailDelivery("provider unavailable".into()))
    }
}

// ============================================================================
// InMemoryRateLimiter
// ============================================================================

/// In-memory rate limiter for testing.
/// Uses HashMap to track request counts per client IP.
pub struct InMemoryRateLimiter {
    counts: Mutex<HashMap<String, u64>>,
    max_per_ip: u64,
}

impl InMemoryRateLimiter {
    pub fn new(max_per_ip: u64) -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
            max_per_ip,
        }
    }

    /// Create a permissive rate limiter that never blocks (for most tests).
    pub fn permissive() -> Self {
        Self::new(u64::MAX)
    }
}

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check(&self, client_ip: &str) -> AppResult<()> {
        let mut counts = self.counts.lock().unwrap();
        let count = counts.entry(client_ip.to_string()).or_insert(0);
        *count += 1;
        if *count > self.max_per_ip {
            return Err(AppError::RateLimited);
        }
        Ok(())
    }
}
