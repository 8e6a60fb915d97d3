//! The `TripStore` and `SessionStore` traits.
//!
//! Both are implemented by storage backends (e.g. `quillt-store-sqlite`).
//! The live loop and the HTTP layer depend on these abstractions, not on any
//! concrete backend.

use std::{future::Future, sync::Arc};

use tokio::sync::watch;
use uuid::Uuid;

use crate::{
  identity::{Identity, NewIdentity},
  plan::{NewPlan, Plan},
};

/// Key under which the signed-in identity id is kept in a [`SessionStore`].
pub const SESSION_KEY: &str = "quillt.session.user_id";

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// One full copy of the plan collection, as pushed to subscribers.
///
/// Cloning is cheap; the plans are reference-counted. Consumers treat a
/// snapshot as immutable for the whole recomputation it feeds.
#[derive(Debug, Clone, Default)]
pub struct PlanSnapshot {
  /// Incremented by the store on every change.
  pub revision: u64,
  /// Ordered by `start_date` ascending.
  pub plans:    Arc<Vec<Plan>>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the shared plan collection and the identity directory.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait TripStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Plans ─────────────────────────────────────────────────────────────

  /// The whole collection, ordered by `start_date` ascending.
  fn list_plans(&self) -> impl Future<Output = Result<Vec<Plan>, Self::Error>> + Send + '_;

  /// Validate and append a plan with a freshly minted id.
  fn create_plan(
    &self,
    input: NewPlan,
  ) -> impl Future<Output = Result<Plan, Self::Error>> + Send + '_;

  /// Remove a plan. Returns `false` if it did not exist.
  fn delete_plan(&self, id: Uuid) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Subscribe to full-snapshot change notifications.
  ///
  /// The receiver starts out holding the latest snapshot, so a late
  /// subscriber never misses the current state. When the store goes away
  /// the channel closes.
  fn subscribe(&self) -> watch::Receiver<PlanSnapshot>;

  // ── Identities ────────────────────────────────────────────────────────

  fn add_identity(
    &self,
    input: NewIdentity,
  ) -> impl Future<Output = Result<Identity, Self::Error>> + Send + '_;

  /// Returns `None` if not found.
  fn get_identity(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + '_;

  fn list_identities(&self) -> impl Future<Output = Result<Vec<Identity>, Self::Error>> + Send + '_;
}

/// A small persistent key-value store for session state that must survive
/// restarts.
pub trait SessionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  fn set<'a>(
    &'a self,
    key: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn clear<'a>(&'a self, key: &'a str) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
