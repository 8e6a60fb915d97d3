//! The overlap engine.
//!
//! An [`Overlap`] exists for a viewer plan `P` and another plan `Q` if and
//! only if:
//!
//! 1. `P` and `Q` have different owners,
//! 2. `Q`'s owner resolves to an identity ([`crate::roster`]),
//! 3. their locations are city-equivalent ([`crate::city`]),
//! 4. their date ranges share at least one day ([`crate::interval`]).
//!
//! The scan is `|viewer_plans| × |all_plans|`.

use serde::{Deserialize, Serialize};

use crate::{
  city::is_same_city,
  identity::Identity,
  interval::intersection,
  plan::Plan,
  roster::resolve_identity,
};

/// A derived, never-persisted fact: two friends' plans coincide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
  /// The viewer's own plan.
  pub viewer_plan:   Plan,
  /// The friend's plan.
  pub other_plan:    Plan,
  pub friend:        Identity,
  pub overlap_start: String,
  pub overlap_end:   String,
  /// Always the viewer's location string, even when the friend's differs
  /// textually and matched through an alias rule.
  pub city:          String,
}

/// Compute every overlap between `viewer_plans` and `all_plans`.
///
/// Output is grouped by viewer plan in input order, then by `all_plans`
/// order within each group. Identical inputs yield identical output.
pub fn compute_overlaps(
  viewer_plans: &[Plan],
  all_plans: &[Plan],
  roster: &[Identity],
) -> Vec<Overlap> {
  let mut overlaps = Vec::new();

  for mine in viewer_plans {
    for other in all_plans {
      if other.owner_id == mine.owner_id {
        continue;
      }
      let Some(friend) = resolve_identity(other.owner_id, roster, all_plans) else {
        continue;
      };
      if !is_same_city(&mine.location, &other.location) {
        continue;
      }
      let Some((start, end)) = intersection(
        &mine.start_date,
        &mine.end_date,
        &other.start_date,
        &other.end_date,
      ) else {
        continue;
      };

      overlaps.push(Overlap {
        viewer_plan:   mine.clone(),
        other_plan:    other.clone(),
        friend:        friend.identity,
        overlap_start: start.to_owned(),
        overlap_end:   end.to_owned(),
        city:          mine.location.clone(),
      });
    }
  }

  overlaps
}
