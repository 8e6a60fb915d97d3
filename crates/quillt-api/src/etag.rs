//! ETag computation for derived views.
//!
//! The ETag is a SHA-256 hash over the view's JSON encoding. Derivation is
//! deterministic and order-stable, so identical plan data always yields the
//! same ETag and any visible change yields a different one.

use quillt_core::DerivedView;
use sha2::{Digest, Sha256};

/// Compute a strong, quoted ETag for `view`.
pub fn compute_etag(view: &DerivedView) -> Result<String, serde_json::Error> {
  let encoded = serde_json::to_vec(view)?;
  let hash = Sha256::digest(&encoded);
  Ok(format!("\"{}\"", hex::encode(hash)))
}

/// `true` if an `If-None-Match` header value names `etag`.
///
/// Accepts `*`, comma-separated lists, weak validators, and bare ETags
/// without the surrounding quotes.
pub fn if_none_match_hits(header: &str, etag: &str) -> bool {
  let current = strip_etag_quotes(etag);
  header.split(',').map(str::trim).any(|candidate| {
    candidate == "*"
      || strip_etag_quotes(candidate.trim_start_matches("W/")) == current
  })
}

fn strip_etag_quotes(s: &str) -> &str { s.trim_matches('"') }

#[cfg(test)]
mod tests {
  use quillt_core::{
    derive_view,
    plan::{AuthorSnapshot, Plan, Visibility},
  };
  use uuid::Uuid;

  use super::*;

  fn plan(owner_id: Uuid, location: &str) -> Plan {
    Plan {
      id: Uuid::new_v4(),
      owner_id,
      location: location.into(),
      start_date: "2024-07-01".into(),
      end_date: "2024-07-05".into(),
      description: None,
      visibility: Visibility::Public,
      author: AuthorSnapshot::default(),
    }
  }

  #[test]
  fn same_view_same_etag() {
    let viewer = Uuid::new_v4();
    let plans = vec![plan(viewer, "SF")];
    let a = derive_view(viewer, &plans, &[]);
    let b = derive_view(viewer, &plans, &[]);
    assert_eq!(compute_etag(&a).unwrap(), compute_etag(&b).unwrap());
  }

  #[test]
  fn adding_a_plan_changes_etag() {
    let viewer = Uuid::new_v4();
    let mut plans = vec![plan(viewer, "SF")];
    let before = compute_etag(&derive_view(viewer, &plans, &[])).unwrap();
    plans.push(plan(viewer, "Paris"));
    let after = compute_etag(&derive_view(viewer, &plans, &[])).unwrap();
    assert_ne!(before, after);
  }

  #[test]
  fn if_none_match_forms() {
    let etag = "\"abc123\"";
    assert!(if_none_match_hits("\"abc123\"", etag));
    assert!(if_none_match_hits("abc123", etag));
    assert!(if_none_match_hits("W/\"abc123\"", etag));
    assert!(if_none_match_hits("\"zzz\", \"abc123\"", etag));
    assert!(if_none_match_hits("*", etag));
    assert!(!if_none_match_hits("\"zzz\"", etag));
  }
}
