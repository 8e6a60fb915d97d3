//! The derived view a signed-in user sees: their own plans, their friends'
//! plans, and the overlaps between them.
//!
//! Never stored, always derived from one plan snapshot.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  identity::Identity,
  overlap::{Overlap, compute_overlaps},
  plan::Plan,
  roster::{build_roster, resolve_identity},
};

/// A friend's plan paired with the identity it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendPlan {
  pub plan:   Plan,
  pub friend: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedView {
  pub viewer_id:    Uuid,
  /// The viewer's plans, by start date.
  pub my_plans:     Vec<Plan>,
  /// Plans by resolvable friends, by start date. Plans whose owner cannot be
  /// resolved are left out.
  pub friend_plans: Vec<FriendPlan>,
  pub friends:      Vec<Identity>,
  pub overlaps:     Vec<Overlap>,
}

impl DerivedView {
  /// Overlaps involving one of the viewer's plans.
  pub fn overlaps_for(&self, plan_id: Uuid) -> impl Iterator<Item = &Overlap> + '_ {
    self
      .overlaps
      .iter()
      .filter(move |o| o.viewer_plan.id == plan_id)
  }

  pub fn trips_planned(&self) -> usize { self.my_plans.len() }

  pub fn overlaps_found(&self) -> usize { self.overlaps.len() }
}

/// Derive everything `viewer_id` sees from one snapshot of `plans`.
///
/// `known` is the explicit roster; friends missing from it are synthesized
/// from author snapshots on their plans, so a newly seen friend shows up in
/// the same derivation that first sees their plan.
pub fn derive_view(viewer_id: Uuid, plans: &[Plan], known: &[Identity]) -> DerivedView {
  let mut my_plans: Vec<Plan> = plans
    .iter()
    .filter(|p| p.owner_id == viewer_id)
    .cloned()
    .collect();
  my_plans.sort_by(|a, b| a.start_date.cmp(&b.start_date));

  let friends = build_roster(known, plans, viewer_id);

  let mut friend_plans: Vec<FriendPlan> = plans
    .iter()
    .filter(|p| p.owner_id != viewer_id)
    .filter_map(|p| {
      resolve_identity(p.owner_id, &friends, plans).map(|r| FriendPlan {
        plan:   p.clone(),
        friend: r.identity,
      })
    })
    .collect();
  friend_plans.sort_by(|a, b| a.plan.start_date.cmp(&b.plan.start_date));

  let overlaps = compute_overlaps(&my_plans, plans, &friends);

  DerivedView { viewer_id, my_plans, friend_plans, friends, overlaps }
}
