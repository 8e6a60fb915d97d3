//! Friend identity resolution.
//!
//! An owner id resolves in two tiers: the explicit roster first, then the
//! author snapshot embedded on any of that owner's plans. An owner found in
//! neither is unresolved, which is an expected transient state (the roster
//! may not have loaded yet) rather than an error.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  identity::{Identity, PLACEHOLDER_HANDLE, PLACEHOLDER_NAME, placeholder_avatar},
  plan::Plan,
};

/// Where a resolved identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
  Roster,
  Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
  pub identity: Identity,
  pub source:   IdentitySource,
}

/// Synthesize an identity from the first plan owned by `owner_id` that
/// carries any author snapshot data.
fn from_snapshot(owner_id: Uuid, plans: &[Plan]) -> Option<Identity> {
  let author = plans
    .iter()
    .filter(|p| p.owner_id == owner_id)
    .map(|p| &p.author)
    .find(|a| !a.is_empty())?;

  Some(Identity {
    id:           owner_id,
    display_name: author.name.clone().unwrap_or_else(|| PLACEHOLDER_NAME.to_owned()),
    avatar:       author.avatar.clone().unwrap_or_else(|| placeholder_avatar(owner_id)),
    handle:       author.handle.clone().unwrap_or_else(|| PLACEHOLDER_HANDLE.to_owned()),
  })
}

/// Resolve `owner_id` against `roster`, falling back to author snapshots
/// found in `plans`.
pub fn resolve_identity(
  owner_id: Uuid,
  roster: &[Identity],
  plans: &[Plan],
) -> Option<ResolvedIdentity> {
  if let Some(identity) = roster.iter().find(|i| i.id == owner_id) {
    return Some(ResolvedIdentity {
      identity: identity.clone(),
      source:   IdentitySource::Roster,
    });
  }
  from_snapshot(owner_id, plans).map(|identity| ResolvedIdentity {
    identity,
    source: IdentitySource::Snapshot,
  })
}

/// Every friend visible in `plans`: the `known` identities (minus the viewer)
/// followed by snapshot-synthesized identities for owners `known` lacks, in
/// first-seen plan order.
pub fn build_roster(known: &[Identity], plans: &[Plan], viewer_id: Uuid) -> Vec<Identity> {
  let mut roster: Vec<Identity> = known
    .iter()
    .filter(|i| i.id != viewer_id)
    .cloned()
    .collect();

  for plan in plans {
    if plan.owner_id == viewer_id || roster.iter().any(|i| i.id == plan.owner_id) {
      continue;
    }
    if let Some(identity) = from_snapshot(plan.owner_id, plans) {
      roster.push(identity);
    }
  }

  roster
}
