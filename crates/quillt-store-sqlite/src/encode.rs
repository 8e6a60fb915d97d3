//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings; dates are stored exactly
//! as written so lexical order survives the round trip.

use quillt_core::{
  identity::Identity,
  plan::{AuthorSnapshot, Plan, Visibility},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Visibility ──────────────────────────────────────────────────────────────

pub fn encode_visibility(v: Visibility) -> &'static str {
  match v {
    Visibility::Public => "public",
    Visibility::Private => "private",
  }
}

pub fn decode_visibility(s: &str) -> Result<Visibility> {
  match s {
    "public" => Ok(Visibility::Public),
    "private" => Ok(Visibility::Private),
    other => Err(Error::Visibility(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const PLAN_COLUMNS: &str = "plan_id, owner_id, location, start_date, end_date, description,
   visibility, author_name, author_avatar, author_handle";

/// Raw strings read directly from a `plans` row.
pub struct RawPlan {
  pub plan_id:       String,
  pub owner_id:      String,
  pub location:      String,
  pub start_date:    String,
  pub end_date:      String,
  pub description:   Option<String>,
  pub visibility:    String,
  pub author_name:   Option<String>,
  pub author_avatar: Option<String>,
  pub author_handle: Option<String>,
}

impl RawPlan {
  /// Read a row selected with [`PLAN_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      plan_id:       row.get(0)?,
      owner_id:      row.get(1)?,
      location:      row.get(2)?,
      start_date:    row.get(3)?,
      end_date:      row.get(4)?,
      description:   row.get(5)?,
      visibility:    row.get(6)?,
      author_name:   row.get(7)?,
      author_avatar: row.get(8)?,
      author_handle: row.get(9)?,
    })
  }

  pub fn into_plan(self) -> Result<Plan> {
    Ok(Plan {
      id:          decode_uuid(&self.plan_id)?,
      owner_id:    decode_uuid(&self.owner_id)?,
      location:    self.location,
      start_date:  self.start_date,
      end_date:    self.end_date,
      description: self.description,
      visibility:  decode_visibility(&self.visibility)?,
      author:      AuthorSnapshot {
        name:   self.author_name,
        avatar: self.author_avatar,
        handle: self.author_handle,
      },
    })
  }
}

/// Raw strings read directly from an `identities` row.
pub struct RawIdentity {
  pub identity_id:  String,
  pub display_name: String,
  pub avatar:       String,
  pub handle:       String,
}

impl RawIdentity {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      identity_id:  row.get(0)?,
      display_name: row.get(1)?,
      avatar:       row.get(2)?,
      handle:       row.get(3)?,
    })
  }

  pub fn into_identity(self) -> Result<Identity> {
    Ok(Identity {
      id:           decode_uuid(&self.identity_id)?,
      display_name: self.display_name,
      avatar:       self.avatar,
      handle:       self.handle,
    })
  }
}
