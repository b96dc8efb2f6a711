use chrono::{
  Datelike,
  NaiveDate
};
use serde::{
  Deserialize,
  Serialize
};

use crate::entry::{
  RosterEntry,
  date_key
};
use crate::grouping::GroupingIndex;
use crate::month::{
  ViewState,
  is_weekend
};
use crate::schedule::ScheduleConfig;

pub const WEEKDAY_NAMES: [&str; 7] =
  ["日", "一", "二", "三", "四", "五", "六"];

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub enum RowStyle {
  Holiday,
  Weekend
}

impl RowStyle {
  pub fn css_class(self) -> &'static str {
    match self {
      | RowStyle::Holiday => "holiday-row",
      | RowStyle::Weekend => "weekend-row"
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub enum StaffKind {
  Core,
  Regular
}

impl StaffKind {
  pub fn css_class(self) -> &'static str {
    match self {
      | StaffKind::Core => "core-staff",
      | StaffKind::Regular => "regular-staff"
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct StaffBadge {
  pub name: String,
  pub kind: StaffKind
}

impl From<&RosterEntry> for StaffBadge {
  fn from(entry: &RosterEntry) -> Self {
    Self {
      name: entry.staff_name.clone(),
      kind: if entry.core_staff {
        StaffKind::Core
      } else {
        StaffKind::Regular
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct SlotCell {
  pub slot:  String,
  pub staff: Vec<StaffBadge>
}

/// One calendar row: date, weekday and
/// a cell per time slot.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct RowDescriptor {
  pub key:           String,
  pub date:          NaiveDate,
  pub date_label:    String,
  pub weekday_label: String,
  pub style:         Option<RowStyle>,
  pub cells:         Vec<SlotCell>
}

impl RowDescriptor {
  pub fn css_class(
    &self
  ) -> Option<&'static str> {
    self.style.map(RowStyle::css_class)
  }
}

pub fn weekday_label(
  date: NaiveDate
) -> String {
  let idx = date
    .weekday()
    .num_days_from_sunday()
    as usize;
  format!("星期{}", WEEKDAY_NAMES[idx])
}

pub fn row_style(
  date: NaiveDate,
  schedule: &ScheduleConfig
) -> Option<RowStyle> {
  if schedule.holidays.contains(date) {
    Some(RowStyle::Holiday)
  } else if is_weekend(date) {
    Some(RowStyle::Weekend)
  } else {
    None
  }
}

pub fn create_date_row(
  date: NaiveDate,
  index: &GroupingIndex,
  schedule: &ScheduleConfig
) -> RowDescriptor {
  let cells = schedule
    .time_slots
    .iter()
    .map(|slot| SlotCell {
      slot:  slot.clone(),
      staff: index
        .bucket(date, slot)
        .iter()
        .map(StaffBadge::from)
        .collect()
    })
    .collect();

  RowDescriptor {
    key: date_key(date),
    date,
    date_label: format!(
      "{}/{}",
      date.month(),
      date.day()
    ),
    weekday_label: weekday_label(date),
    style: row_style(date, schedule),
    cells
  }
}

/// All rows of the month grid in
/// ascending date order.
pub fn render_rows(
  view: &ViewState,
  index: &GroupingIndex,
  schedule: &ScheduleConfig
) -> Vec<RowDescriptor> {
  view
    .display_window()
    .into_iter()
    .map(|date| {
      create_date_row(
        date, index, schedule
      )
    })
    .collect()
}
