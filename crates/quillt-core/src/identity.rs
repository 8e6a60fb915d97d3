//! Identity: a person who can own plans.
//!
//! Identities are issued by the registration flow. The engine never creates
//! or mutates them; it only resolves an owner id to one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle shown for a friend whose plans carry no embedded handle.
pub const PLACEHOLDER_HANDLE: &str = "@friend";

/// Display name shown for a friend whose plans carry no embedded name.
pub const PLACEHOLDER_NAME: &str = "Friend";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  pub id:           Uuid,
  pub display_name: String,
  /// URL or other reference to an avatar image.
  pub avatar:       String,
  pub handle:       String,
}

/// Input to [`crate::store::TripStore::add_identity`]; the id is minted by
/// the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIdentity {
  pub display_name: String,
  pub handle:       String,
  /// Falls back to [`placeholder_avatar`] for the minted id when absent.
  pub avatar:       Option<String>,
}

/// Deterministic avatar reference for `owner_id`.
pub fn placeholder_avatar(owner_id: Uuid) -> String {
  format!("https://api.dicebear.com/7.x/avataaars/svg?seed={owner_id}")
}
