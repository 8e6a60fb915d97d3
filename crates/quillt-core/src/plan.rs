//! Plan types. A plan is a published intent to be somewhere on some days.
//!
//! Plans are written once by their owner and never mutated afterwards.
//! Dates are plain `YYYY-MM-DD` strings: the format is fixed-width and
//! zero-padded, so string order is chronological order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, identity::Identity, interval::is_calendar_day};

// ─── Visibility ──────────────────────────────────────────────────────────────

/// Reserved for private plans. Stored but not yet enforced: every plan is
/// treated as visible to every friend.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
  #[default]
  Public,
  Private,
}

// ─── Author snapshot ─────────────────────────────────────────────────────────

/// Author display fields copied onto a plan at creation time, so a friend
/// can be shown before the roster knows about them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSnapshot {
  pub name:   Option<String>,
  pub avatar: Option<String>,
  pub handle: Option<String>,
}

impl AuthorSnapshot {
  pub fn of(identity: &Identity) -> Self {
    Self {
      name:   Some(identity.display_name.clone()),
      avatar: Some(identity.avatar.clone()),
      handle: Some(identity.handle.clone()),
    }
  }

  /// `true` if no field carries any data.
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.avatar.is_none() && self.handle.is_none()
  }
}

// ─── Plan ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
  pub id:          Uuid,
  pub owner_id:    Uuid,
  /// Free text, never normalised at write time.
  pub location:    String,
  pub start_date:  String,
  pub end_date:    String,
  pub description: Option<String>,
  #[serde(default)]
  pub visibility:  Visibility,
  #[serde(default)]
  pub author:      AuthorSnapshot,
}

// ─── Drafts ──────────────────────────────────────────────────────────────────

/// The fields a user fills in when creating a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDraft {
  pub location:    String,
  pub start_date:  String,
  pub end_date:    String,
  pub description: Option<String>,
}

/// Input to [`crate::store::TripStore::create_plan`].
/// The id is always minted by the store.
#[derive(Debug, Clone)]
pub struct NewPlan {
  pub owner_id:    Uuid,
  pub location:    String,
  pub start_date:  String,
  pub end_date:    String,
  pub description: Option<String>,
  pub visibility:  Visibility,
  pub author:      AuthorSnapshot,
}

impl NewPlan {
  /// Build a public plan owned by `author`, echoing the author's display
  /// fields onto the record.
  pub fn authored_by(author: &Identity, draft: PlanDraft) -> Self {
    Self {
      owner_id:    author.id,
      location:    draft.location,
      start_date:  draft.start_date,
      end_date:    draft.end_date,
      description: draft.description.filter(|d| !d.trim().is_empty()),
      visibility:  Visibility::Public,
      author:      AuthorSnapshot::of(author),
    }
  }

  /// Reject input the creation flow should never let through.
  pub fn validate(&self) -> Result<()> {
    if self.location.trim().is_empty() {
      return Err(Error::EmptyLocation);
    }
    for day in [&self.start_date, &self.end_date] {
      if !is_calendar_day(day) {
        return Err(Error::InvalidDay(day.clone()));
      }
    }
    if self.start_date > self.end_date {
      return Err(Error::InvertedRange {
        start: self.start_date.clone(),
        end:   self.end_date.clone(),
      });
    }
    Ok(())
  }
}
