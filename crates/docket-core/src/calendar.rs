//! Calendar Index — the derived day-of-month → assessments view.
//!
//! A pure function of its inputs: it holds no state, is recomputed on every
//! read, and there is nothing to invalidate. Month boundaries and leap years
//! are whatever [`chrono::NaiveDate`] says they are — never hand-computed
//! here.

use std::collections::BTreeMap;

use chrono::Datelike as _;

use crate::assessment::Assessment;

/// Group the assessments due in `(year, month)` by day of month.
///
/// Days with no assessments are simply absent from the map (not present with
/// an empty list), so callers can test membership cheaply. Input order is
/// preserved within each day; callers passing the store's canonical list
/// order get created-at order per day for free.
pub fn month_view(
  assessments: &[Assessment],
  year: i32,
  month: u32,
) -> BTreeMap<u32, Vec<Assessment>> {
  let mut days: BTreeMap<u32, Vec<Assessment>> = BTreeMap::new();
  for assessment in assessments {
    if assessment.date.year() == year && assessment.date.month() == month {
      days
        .entry(assessment.date.day())
        .or_default()
        .push(assessment.clone());
    }
  }
  days
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, TimeZone, Utc};
  use uuid::Uuid;

  use super::*;

  fn assessment(
    subject: &str,
    (y, m, d): (i32, u32, u32),
    created_secs: i64,
  ) -> Assessment {
    Assessment {
      id:           Uuid::new_v4(),
      subject:      subject.to_owned(),
      date:         NaiveDate::from_ymd_opt(y, m, d).unwrap(),
      rubric_image: None,
      created_at:   Utc.timestamp_opt(created_secs, 0).unwrap(),
    }
  }

  #[test]
  fn day_present_iff_assessment_due() {
    let all = vec![
      assessment("Math", (2024, 5, 1), 100),
      assessment("Science", (2024, 5, 1), 200),
      assessment("Math", (2024, 5, 2), 300),
    ];

    let days = month_view(&all, 2024, 5);
    assert_eq!(days.len(), 2);
    assert!(days.contains_key(&1));
    assert!(days.contains_key(&2));
    assert!(!days.contains_key(&3));

    let day1: Vec<_> = days[&1].iter().map(|a| a.subject.as_str()).collect();
    assert_eq!(day1, ["Math", "Science"]);
    let day2: Vec<_> = days[&2].iter().map(|a| a.subject.as_str()).collect();
    assert_eq!(day2, ["Math"]);
  }

  #[test]
  fn other_months_excluded() {
    let all = vec![
      assessment("Math", (2024, 4, 30), 100),
      assessment("Math", (2024, 5, 1), 200),
      assessment("Math", (2024, 6, 1), 300),
      assessment("Math", (2023, 5, 1), 400),
    ];

    let days = month_view(&all, 2024, 5);
    assert_eq!(days.len(), 1);
    assert!(days.contains_key(&1));
  }

  #[test]
  fn leap_february_has_day_29() {
    let all = vec![assessment("History", (2024, 2, 29), 100)];
    let days = month_view(&all, 2024, 2);
    assert!(days.contains_key(&29));
  }

  #[test]
  fn empty_month_yields_empty_map() {
    let all = vec![assessment("Math", (2024, 5, 1), 100)];
    assert!(month_view(&all, 2024, 11).is_empty());
  }
}
