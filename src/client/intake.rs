use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use thiserror::Error;

use crate::domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry};

use super::{counter::WaitlistCounter, store::WaitlistApi};

/// How long the "you're on the list" confirmation stays up.
pub const DEFAULT_CONFIRMATION: Duration = Duration::from_secs(5);

/// Why a submission was not accepted. `Display` is the message shown under the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("{0}")]
    Invalid(String),

    #[error("This email is already on the waitlist")]
    Duplicate,

    #[error("Something went wrong. Please try again.")]
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub entry: WaitlistEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Accepted { since: Instant },
    Rejected(Rejected),
}

/// Signup form handler.
pub struct IntakeForm {
    pub fields: NewWaitlistEntry,
    state: SubmitState,
    confirmation: Duration,
    api: Arc<dyn WaitlistApi>,
    counter: Arc<WaitlistCounter>,
}

impl IntakeForm {
    pub fn new(api: Arc<dyn WaitlistApi>, counter: Arc<WaitlistCounter>) -> Self {
        Self {
            fields: NewWaitlistEntry::default(),
            state: SubmitState::Idle,
            confirmation: DEFAULT_CONFIRMATION,
            api,
            counter,
        }
    }

    pub fn with_confirmation(mut self, confirmation: Duration) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Message to render under the form, if the last attempt was rejected.
    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            SubmitState::Rejected(reason) => Some(reason.to_string()),
            _ => None,
        }
    }

    /// Sends the current fields to the store.
    ///
    /// Missing fields are rejected locally without any request. On success
    /// the fields are cleared, the counter is refreshed and the form shows
    /// the confirmation until [`IntakeForm::poll`] moves it back to idle.
    pub async fn submit(&mut self) -> Result<Accepted, Rejected> {
        if self.fields.has_missing_fields() {
            return Err(self.reject(Rejected::MissingFields));
        }

        self.state = SubmitState::Submitting;
        let candidate = self.fields.trimmed();

        let entry = match self.api.append(&candidate).await {
            Ok(entry) => entry,
            Err(err) if err.is_duplicate() => return Err(self.reject(Rejected::Duplicate)),
            Err(err) => {
                let reason = match err.invalid_input_message() {
                    Some(msg) => Rejected::Invalid(msg.to_string()),
                    None => {
                        tracing::error!(error = %err, "Waitlist submission failed");
                        Rejected::Failed
                    }
                };
                return Err(self.reject(reason));
            }
        };

        self.fields = NewWaitlistEntry::default();
        self.state = SubmitState::Accepted {
            since: Instant::now(),
        };
        self.counter.refresh_count().await;

        Ok(Accepted { entry })
    }

    /// Drives the confirmation timer: `Accepted` returns to `Idle` once the
    /// confirmation duration has passed.
    pub fn poll(&mut self, now: Instant) -> &SubmitState {
        if let SubmitState::Accepted { since } = self.state
            && now.saturating_duration_since(since) >= self.confirmation
        {
            self.state = SubmitState::Idle;
        }
        &self.state
    }

    fn reject(&mut self, reason: Rejected) -> Rejected {
        self.state = SubmitState::Rejected(reason.clone());
        reason
    }
}
