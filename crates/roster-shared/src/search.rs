use anyhow::{
  Context,
  anyhow
};
use chrono::NaiveDate;
use regex::Regex;

use crate::entry::RosterEntry;

#[derive(Debug, Clone)]
pub enum StaffPattern {
  Contains(String),
  Regex(Regex)
}

impl StaffPattern {
  /// `/expr/` is a regular expression,
  /// anything else a case-insensitive
  /// substring.
  pub fn parse(
    raw: &str
  ) -> anyhow::Result<Self> {
    let raw = raw.trim();
    if raw.len() >= 2
      && raw.starts_with('/')
      && raw.ends_with('/')
    {
      let expr = &raw[1..raw.len() - 1];
      let re = Regex::new(expr)
        .with_context(|| {
          format!(
            "invalid staff pattern: {raw}"
          )
        })?;
      return Ok(Self::Regex(re));
    }
    Ok(Self::Contains(raw.to_lowercase()))
  }

  pub fn matches(
    &self,
    name: &str
  ) -> bool {
    match self {
      | StaffPattern::Contains(needle) => {
        name
          .to_lowercase()
          .contains(needle.as_str())
      }
      | StaffPattern::Regex(re) => {
        re.is_match(name)
      }
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleQuery {
  pub staff:     Option<StaffPattern>,
  pub from:      Option<NaiveDate>,
  pub to:        Option<NaiveDate>,
  pub slot:      Option<String>,
  pub core_only: bool
}

impl ScheduleQuery {
  /// Builds a query from raw form values.
  /// Blank fields leave that filter off;
  /// dates are `YYYY-MM-DD`.
  pub fn from_fields(
    staff: &str,
    from: &str,
    to: &str,
    slot: &str,
    core_only: bool
  ) -> anyhow::Result<Self> {
    let staff = non_blank(staff)
      .map(StaffPattern::parse)
      .transpose()?;
    let from = non_blank(from)
      .map(parse_query_date)
      .transpose()?;
    let to = non_blank(to)
      .map(parse_query_date)
      .transpose()?;
    if let (Some(from), Some(to)) =
      (from, to)
      && from > to
    {
      return Err(anyhow!(
        "start date {from} is after end \
         date {to}"
      ));
    }
    Ok(Self {
      staff,
      from,
      to,
      slot: non_blank(slot)
        .map(str::to_string),
      core_only
    })
  }

  pub fn matches(
    &self,
    entry: &RosterEntry
  ) -> bool {
    if self
      .staff
      .as_ref()
      .is_some_and(|pattern| {
        !pattern.matches(&entry.staff_name)
      })
    {
      return false;
    }
    if self
      .from
      .is_some_and(|from| entry.date < from)
    {
      return false;
    }
    if self
      .to
      .is_some_and(|to| entry.date > to)
    {
      return false;
    }
    if self
      .slot
      .as_deref()
      .is_some_and(|slot| {
        entry.time_slot != slot
      })
    {
      return false;
    }
    !self.core_only || entry.core_staff
  }
}

fn non_blank(raw: &str) -> Option<&str> {
  let raw = raw.trim();
  (!raw.is_empty()).then_some(raw)
}

fn parse_query_date(
  raw: &str
) -> anyhow::Result<NaiveDate> {
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .with_context(|| {
      format!("invalid date: {raw}")
    })
}

/// Entries matching `query`, in roster
/// order.
#[tracing::instrument(skip_all)]
pub fn search_schedule<'a>(
  entries: &'a [RosterEntry],
  query: &ScheduleQuery
) -> Vec<&'a RosterEntry> {
  let hits = entries
    .iter()
    .filter(|entry| query.matches(entry))
    .collect::<Vec<_>>();
  tracing::debug!(
    total = entries.len(),
    hits = hits.len(),
    "searched schedule"
  );
  hits
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entry::builtin_entries;

  #[test]
  fn filters_by_staff_and_date_range() {
    let entries = builtin_entries();
    let query = ScheduleQuery {
      staff: Some(
        StaffPattern::parse("林子旺")
          .expect("pattern")
      ),
      from: NaiveDate::from_ymd_opt(
        2026, 2, 15
      ),
      ..ScheduleQuery::default()
    };

    let ids = search_schedule(&entries, &query)
      .into_iter()
      .map(|entry| entry.id)
      .collect::<Vec<_>>();
    assert_eq!(ids, vec![201, 202, 203]);
  }

  #[test]
  fn regex_and_core_filters() {
    let entries = builtin_entries();
    let query = ScheduleQuery {
      staff: Some(
        StaffPattern::parse("/^(郑|曾)/")
          .expect("pattern")
      ),
      slot: Some("13:30～18:00".to_string()),
      ..ScheduleQuery::default()
    };
    let ids = search_schedule(&entries, &query)
      .into_iter()
      .map(|entry| entry.id)
      .collect::<Vec<_>>();
    assert_eq!(ids, vec![196, 198]);

    let core = ScheduleQuery {
      core_only: true,
      ..ScheduleQuery::default()
    };
    assert_eq!(
      search_schedule(&entries, &core).len(),
      2
    );
    assert!(StaffPattern::parse("/(/").is_err());
  }

  #[test]
  fn form_fields_build_a_query() {
    let entries = builtin_entries();
    let query = ScheduleQuery::from_fields(
      " 林 ",
      "2026-02-14",
      "2026-02-14",
      "9:00～12:00",
      false
    )
    .expect("query");
    let ids = search_schedule(&entries, &query)
      .into_iter()
      .map(|entry| entry.id)
      .collect::<Vec<_>>();
    assert_eq!(ids, vec![193]);

    let blank = ScheduleQuery::from_fields(
      "", " ", "", "", true
    )
    .expect("blank query");
    assert!(blank.staff.is_none());
    assert!(blank.slot.is_none());
    assert!(blank.core_only);

    assert!(
      ScheduleQuery::from_fields(
        "", "2026/02/14", "", "", false
      )
      .is_err()
    );
    assert!(
      ScheduleQuery::from_fields(
        "",
        "2026-02-15",
        "2026-02-14",
        "",
        false
      )
      .is_err()
    );
  }

  #[test]
  fn empty_query_returns_everything() {
    let entries = builtin_entries();
    assert_eq!(
      search_schedule(
        &entries,
        &ScheduleQuery::default()
      )
      .len(),
      entries.len()
    );
  }
}
