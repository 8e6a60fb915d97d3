//! Closed-interval arithmetic over `YYYY-MM-DD` calendar days.
//!
//! Both ends of a range are inclusive. Comparison is lexical, which equals
//! chronological order for the fixed-width format. Malformed days and
//! inverted ranges never intersect anything.

use chrono::NaiveDate;

/// `true` if `s` is a zero-padded `YYYY-MM-DD` string naming a real day.
pub fn is_calendar_day(s: &str) -> bool {
  let bytes = s.as_bytes();
  bytes.len() == 10
    && bytes
      .iter()
      .enumerate()
      .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() })
    && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn is_range(start: &str, end: &str) -> bool {
  is_calendar_day(start) && is_calendar_day(end) && start <= end
}

/// The days shared by `[a_start, a_end]` and `[b_start, b_end]`, as
/// `(later start, earlier end)`. Ranges touching on one day share that day.
pub fn intersection<'a>(
  a_start: &'a str,
  a_end: &'a str,
  b_start: &'a str,
  b_end: &'a str,
) -> Option<(&'a str, &'a str)> {
  if !is_range(a_start, a_end) || !is_range(b_start, b_end) {
    return None;
  }
  if a_start > b_end || b_start > a_end {
    return None;
  }
  Some((a_start.max(b_start), a_end.min(b_end)))
}

pub fn intersects(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> bool {
  intersection(a_start, a_end, b_start, b_end).is_some()
}
