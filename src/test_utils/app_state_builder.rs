//! Test app state builder for HTTP-level integration testing.
//!
//! `TestAppStateBuilder` creates an `AppState` wired to in-memory mocks;
//! `spawn_app` serves the full application on an ephemeral local port.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::waitlist::{EmailSender, WaitlistRepo, WaitlistUseCases},
    domain::entities::waitlist_entry::WaitlistEntry,
    infra::{RateLimiterTrait, app::create_app, config::AppConfig},
    test_utils::{
        InMemoryEmailSender, InMemoryRateLimiter, InMemoryWaitlistRepo, StaleLookupWaitlistRepo,
    },
};

pub const TEST_OWNER_EMAIL: &str = "owner@evolance.test";

pub struct TestAppStateBuilder {
    repo: Arc<InMemoryWaitlistRepo>,
    email: Arc<InMemoryEmailSender>,
    email_override: Option<Arc<dyn EmailSender>>,
    rate_limiter: Arc<dyn RateLimiterTrait>,
    admin_token: Option<SecretString>,
    stale_lookups: bool,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            repo: Arc::new(InMemoryWaitlistRepo::new()),
            email: Arc::new(InMemoryEmailSender::new()),
            email_override: None,
            rate_limiter: Arc::new(InMemoryRateLimiter::permissive()),
            admin_token: None,
            stale_lookups: false,
        }
    }

    pub fn with_entry(self, entry: WaitlistEntry) -> Self {
        self.repo.entries.lock().unwrap().push(entry);
        self
    }

    pub fn with_admin_token(mut self, token: &str) -> Self {
        self.admin_token = Some(SecretString::from(token));
        self
    }

    pub fn with_email_sender(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.email_override = Some(sender);
        self
    }

    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiterTrait>) -> Self {
        self.rate_limiter = limiter;
        self
    }

    /// Route the repo through `StaleLookupWaitlistRepo` so duplicates are
    /// only caught on insert.
    pub fn with_stale_lookups(mut self) -> Self {
        self.stale_lookups = true;
        self
    }

    /// Handle on the repo for assertions after the state is built.
    pub fn repo(&self) -> Arc<InMemoryWaitlistRepo> {
        self.repo.clone()
    }

    /// Handle on the recording email sender.
    pub fn email(&self) -> Arc<InMemoryEmailSender> {
        self.email.clone()
    }

    pub fn build(self) -> AppState {
        let config = AppConfig {
            database_url: "postgres://unused".to_string(),
            redis_url: "redis://unused".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            resend_api_key: SecretString::from("re_test"),
            email_from: "hello@evolance.test".to_string(),
            owner_email: TEST_OWNER_EMAIL.to_string(),
            product_name: "Evolance".to_string(),
            admin_token: self.admin_token,
            rate_limit_window_secs: 60,
            rate_limit_per_ip: u64::MAX,
            trust_proxy: false,
        };

        let email: Arc<dyn EmailSender> = match self.email_override {
            Some(sender) => sender,
            None => self.email,
        };

        let repo: Arc<dyn WaitlistRepo> = if self.stale_lookups {
            Arc::new(StaleLookupWaitlistRepo::new(self.repo))
        } else {
            self.repo
        };

        let waitlist_use_cases = WaitlistUseCases::new(
            repo,
            email,
            config.owner_email.clone(),
            config.product_name.clone(),
        );

        AppState {
            config: Arc::new(config),
            waitlist_use_cases: Arc::new(waitlist_use_cases),
            rate_limiter: self.rate_limiter,
        }
    }
}

/// Serve the full application (rate limiting, CORS, tracing layers included)
/// on 127.0.0.1 and return its base URL.
pub async fn spawn_app(app_state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    let app = create_app(app_state);

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("test server");
    });

    format!("http://{addr}")
}
