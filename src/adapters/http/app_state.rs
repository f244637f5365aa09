use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    infra::{RateLimiterTrait, config::AppConfig},
    use_cases::waitlist::WaitlistUseCases,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub waitlist_use_cases: Arc<WaitlistUseCases>,
    pub rate_limiter: Arc<dyn RateLimiterTrait>,
}

impl FromRef<AppState> for Arc<WaitlistUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.waitlist_use_cases.clone()
    }
}
