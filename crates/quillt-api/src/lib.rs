//! JSON REST API for Quillt.
//!
//! Exposes an axum [`Router`] backed by any [`quillt_core::store::TripStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", quillt_api::api_router(state))
//! ```

pub mod assist;
pub mod captions;
pub mod error;
pub mod etag;
pub mod identities;
pub mod plans;
pub mod views;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use quillt_core::store::TripStore;

pub use assist::{CaptionConfig, Captioner};
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S: TripStore> {
  pub store:    Arc<S>,
  pub captions: Arc<Captioner>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: TripStore + Clone + 'static,
{
  Router::new()
    // Plans
    .route("/plans", get(plans::list::<S>).post(plans::create::<S>))
    .route("/plans/{id}", delete(plans::delete_one::<S>))
    // Identities
    .route("/identities", get(identities::list::<S>).post(identities::create::<S>))
    .route("/identities/{id}", get(identities::get_one::<S>))
    .route("/identities/{id}/view", get(views::handler::<S>))
    // Assist
    .route("/captions", post(captions::handler::<S>))
    .with_state(state)
}
