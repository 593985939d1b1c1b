//! Push notification delivery for newly detected offers.
//!
//! Wraps the Pushover message API behind a fire-and-forget client: delivery
//! failures are surfaced as typed errors for the caller to log, and a client
//! built without credentials is a silent no-op. Notification is a side
//! effect of registering a new offer, never a precondition — callers must
//! not let a failed delivery affect dedup state.

pub mod client;
pub mod error;

pub use client::{Delivery, PushoverNotifier};
pub use error::NotifyError;
