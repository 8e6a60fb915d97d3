//! Live reconciliation for a signed-in Quillt user.
//!
//! A [`LiveSession`] subscribes to a store's plan feed and re-derives the
//! user's [`DerivedView`](quillt_core::DerivedView) once per change
//! notification. The helpers in [`account`] cover the session lifecycle
//! around it: restoring a signed-in identity, signing in and out, and
//! publishing new plans.

pub mod account;
pub mod error;
pub mod session;

pub use account::{publish_plan, restore_session, sign_in, sign_out};
pub use error::{PublishError, SessionError};
pub use session::{Link, LiveSession, LiveState};

#[cfg(test)]
mod tests;
