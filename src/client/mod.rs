//! Client side of the waitlist, as driven by the landing page.
//!
//! - [`WaitlistClient`] talks to the store over HTTP.
//! - [`IntakeForm`] is the signup form handler (`Idle -> Submitting -> Accepted | Rejected`).
//! - [`WaitlistCounter`] backs the social-proof count banner.
//! - [`AdminPanel`] lists every entry and clears the waitlist behind a confirmation.

mod admin;
mod counter;
mod error;
mod intake;
mod store;

pub use admin::AdminPanel;
pub use counter::WaitlistCounter;
pub use error::ClientError;
pub use intake::{Accepted, DEFAULT_CONFIRMATION, IntakeForm, Rejected, SubmitState};
pub use store::{WaitlistApi, WaitlistClient};
