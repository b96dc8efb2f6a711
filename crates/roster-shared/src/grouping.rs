use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::entry::RosterEntry;

/// Lookup from (date, time slot) to the
/// entries assigned there, in source
/// order.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct GroupingIndex {
  by_date: BTreeMap<
    NaiveDate,
    BTreeMap<String, Vec<RosterEntry>>
  >
}

impl GroupingIndex {
  pub fn build(
    entries: &[RosterEntry]
  ) -> Self {
    let mut index = Self::default();
    for entry in entries {
      index
        .by_date
        .entry(entry.date)
        .or_default()
        .entry(entry.time_slot.clone())
        .or_default()
        .push(entry.clone());
    }
    tracing::debug!(
      entries = entries.len(),
      dates = index.by_date.len(),
      "rebuilt grouping index"
    );
    index
  }

  /// Entries for one cell; empty when
  /// nothing is assigned.
  pub fn bucket(
    &self,
    date: NaiveDate,
    slot: &str
  ) -> &[RosterEntry] {
    self
      .by_date
      .get(&date)
      .and_then(|slots| slots.get(slot))
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }

  pub fn entry_count(&self) -> usize {
    self
      .by_date
      .values()
      .flat_map(|slots| slots.values())
      .map(Vec::len)
      .sum()
  }
}
