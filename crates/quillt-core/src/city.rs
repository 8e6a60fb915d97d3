//! City equivalence: do two free-text locations name the same place?
//!
//! Matching is a case-folded exact comparison plus a small, explicit alias
//! table. There is no fuzzy matching and no geocoding: a pair the table does
//! not list (e.g. "NYC" and "New York") does not match. Extend
//! [`ALIAS_RULES`] to widen coverage.

/// A single alias rule, applied to case-folded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasRule {
  /// Both locations contain the needle.
  BothContain(&'static str),
  /// One location contains the short form and the other the long form, in
  /// either orientation.
  Pair(&'static str, &'static str),
}

pub const ALIAS_RULES: &[AliasRule] = &[
  AliasRule::BothContain("new york"),
  AliasRule::Pair("sf", "san francisco"),
];

impl AliasRule {
  /// Symmetric by construction: `matches(a, b) == matches(b, a)`.
  fn matches(self, a: &str, b: &str) -> bool {
    match self {
      Self::BothContain(needle) => a.contains(needle) && b.contains(needle),
      Self::Pair(short, long) => {
        (a.contains(short) && b.contains(long))
          || (b.contains(short) && a.contains(long))
      }
    }
  }
}

/// Case-insensitive city equivalence. Whitespace is significant.
pub fn is_same_city(a: &str, b: &str) -> bool {
  let a = a.to_lowercase();
  let b = b.to_lowercase();
  a == b || ALIAS_RULES.iter().any(|rule| rule.matches(&a, &b))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn both_ways(a: &str, b: &str) -> bool {
    let forward = is_same_city(a, b);
    assert_eq!(forward, is_same_city(b, a), "asymmetric for {a:?} / {b:?}");
    forward
  }

  #[test]
  fn exact_match_ignores_case() {
    assert!(both_ways("London, UK", "london, uk"));
    assert!(both_ways("PARIS", "paris"));
  }

  #[test]
  fn different_cities_do_not_match() {
    assert!(!both_ways("London, UK", "Paris, France"));
    assert!(!both_ways("San Francisco, CA", "New York, NY"));
  }

  #[test]
  fn whitespace_is_not_trimmed() {
    assert!(!both_ways("London", "London "));
  }

  #[test]
  fn new_york_requires_the_phrase_on_both_sides() {
    assert!(both_ways("New York, NY", "new york city"));
    assert!(!both_ways("NYC", "New York, NY"));
  }

  #[test]
  fn sf_matches_san_francisco_in_either_order() {
    assert!(both_ways("SF", "San Francisco, CA"));
    assert!(both_ways("San Francisco", "sf bay area"));
  }

  #[test]
  fn sf_alone_does_not_match_other_cities() {
    assert!(!both_ways("SF", "Oakland"));
  }

  #[test]
  fn symmetry_holds_across_a_sample_grid() {
    let sample = [
      "SF",
      "sf",
      "San Francisco, CA",
      "New York, NY",
      "new york",
      "NYC",
      "London, UK",
      "",
    ];
    for a in sample {
      for b in sample {
        both_ways(a, b);
      }
    }
  }
}
