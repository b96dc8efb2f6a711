use chrono::NaiveDate;

use crate::entry::{
  RosterEntry,
  builtin_entries
};
use crate::grouping::GroupingIndex;
use crate::month::{
  ViewState,
  parse_month_key
};
use crate::rows::{
  RowDescriptor,
  create_date_row,
  render_rows
};
use crate::schedule::ScheduleConfig;

/// Where `load_data` takes the roster
/// from.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterSource {
  Builtin,
  Fixed(Vec<RosterEntry>)
}

impl RosterSource {
  fn entries(&self) -> Vec<RosterEntry> {
    match self {
      | RosterSource::Builtin => {
        builtin_entries()
      }
      | RosterSource::Fixed(entries) => {
        entries.clone()
      }
    }
  }
}

/// Owns the view state, the roster and
/// its grouping index. Every render
/// rebuilds the full row sequence from
/// current state.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarRenderer {
  view:     ViewState,
  entries:  Vec<RosterEntry>,
  index:    GroupingIndex,
  schedule: ScheduleConfig,
  source:   RosterSource
}

impl CalendarRenderer {
  /// Renderer over the built-in roster.
  pub fn new(
    schedule: ScheduleConfig
  ) -> Self {
    Self::with_source(
      schedule,
      RosterSource::Builtin
    )
  }

  /// Renderer over a roster loaded
  /// elsewhere, e.g. from a data file.
  pub fn with_entries(
    schedule: ScheduleConfig,
    entries: Vec<RosterEntry>
  ) -> Self {
    Self::with_source(
      schedule,
      RosterSource::Fixed(entries)
    )
  }

  pub fn with_source(
    schedule: ScheduleConfig,
    source: RosterSource
  ) -> Self {
    let mut renderer = Self {
      view: ViewState::new(
        schedule.initial_date
      ),
      entries: Vec::new(),
      index: GroupingIndex::default(),
      schedule,
      source
    };
    renderer.load_data();
    renderer
  }

  pub fn view(&self) -> &ViewState {
    &self.view
  }

  pub fn entries(&self) -> &[RosterEntry] {
    &self.entries
  }

  pub fn index(&self) -> &GroupingIndex {
    &self.index
  }

  pub fn schedule(
    &self
  ) -> &ScheduleConfig {
    &self.schedule
  }

  #[tracing::instrument(skip(self))]
  pub fn load_data(&mut self) {
    self.entries = self.source.entries();
    self.index =
      GroupingIndex::build(&self.entries);
    tracing::info!(
      entries = self.entries.len(),
      grouped = self.index.entry_count(),
      "loaded roster data"
    );
  }

  pub fn render_calendar(
    &self
  ) -> Vec<RowDescriptor> {
    let rows = render_rows(
      &self.view,
      &self.index,
      &self.schedule
    );
    tracing::debug!(
      month = %self.view.month_key(),
      rows = rows.len(),
      "rendered calendar"
    );
    rows
  }

  pub fn create_date_row(
    &self,
    date: NaiveDate
  ) -> RowDescriptor {
    create_date_row(
      date,
      &self.index,
      &self.schedule
    )
  }

  pub fn is_holiday(
    &self,
    date_key: &str
  ) -> bool {
    self.schedule.is_holiday(date_key)
  }

  /// Applies a month picker value
  /// (`YYYY-MM`). On a malformed value
  /// the view is left untouched.
  #[tracing::instrument(skip(self))]
  pub fn set_month_from_picker(
    &mut self,
    value: &str
  ) -> anyhow::Result<Vec<RowDescriptor>>
  {
    let (year, month) =
      parse_month_key(value)?;
    self.view.set_month(year, month)?;
    Ok(self.render_calendar())
  }

  pub fn prev_month(
    &mut self
  ) -> Vec<RowDescriptor> {
    self.view.shift(-1);
    self.render_calendar()
  }

  pub fn next_month(
    &mut self
  ) -> Vec<RowDescriptor> {
    self.view.shift(1);
    self.render_calendar()
  }

  pub fn refresh(
    &mut self
  ) -> Vec<RowDescriptor> {
    self.load_data();
    self.render_calendar()
  }

  pub fn set_reference(
    &mut self,
    date: NaiveDate
  ) -> anyhow::Result<()> {
    self.view.set_reference(date)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::rows::{
    RowStyle,
    StaffKind
  };

  fn ymd(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  fn renderer() -> CalendarRenderer {
    CalendarRenderer::new(
      ScheduleConfig::embedded()
    )
  }

  #[test]
  fn february_2026_rows_match_roster() {
    let renderer = renderer();
    assert_eq!(
      renderer.view().month_key(),
      "2026-02"
    );
    let rows = renderer.render_calendar();

    let valentine = rows
      .iter()
      .find(|row| row.key == "2026-02-14")
      .expect("row for 2026-02-14");
    assert_eq!(
      valentine.style,
      Some(RowStyle::Weekend)
    );
    assert_eq!(
      valentine.weekday_label,
      "星期六"
    );
    let morning = valentine
      .cells
      .iter()
      .find(|cell| cell.slot == "9:00～12:00")
      .expect("morning slot");
    let badges = morning
      .staff
      .iter()
      .map(|badge| {
        (badge.name.as_str(), badge.kind)
      })
      .collect::<Vec<_>>();
    assert_eq!(badges, vec![
      ("郑晨昊", StaffKind::Core),
      ("林子旺", StaffKind::Regular),
      ("曾婷婷", StaffKind::Regular),
      ("陈伟强", StaffKind::Regular)
    ]);

    let sunday = rows
      .iter()
      .find(|row| row.key == "2026-02-15")
      .expect("row for 2026-02-15");
    assert_eq!(
      sunday.css_class(),
      Some("holiday-row")
    );
  }

  #[test]
  fn rendering_is_idempotent() {
    let renderer = renderer();
    assert_eq!(
      renderer.render_calendar(),
      renderer.render_calendar()
    );
  }

  #[test]
  fn navigation_moves_between_months() {
    let mut renderer = renderer();

    let rows = renderer.next_month();
    assert_eq!(
      renderer.view().month_key(),
      "2026-03"
    );
    assert_eq!(rows[0].date, ymd(2026, 3, 1));
    assert_eq!(
      rows.last().map(|row| row.date),
      Some(ymd(2026, 4, 4))
    );

    renderer.prev_month();
    assert_eq!(
      renderer.view().month_key(),
      "2026-02"
    );
  }

  #[test]
  fn month_picker_sets_first_of_month() {
    let mut renderer = renderer();
    renderer
      .set_month_from_picker("2025-12")
      .expect("valid picker value");
    assert_eq!(
      renderer.view().reference(),
      ymd(2025, 12, 1)
    );

    assert!(
      renderer
        .set_month_from_picker("12/2025")
        .is_err()
    );
    assert_eq!(
      renderer.view().reference(),
      ymd(2025, 12, 1)
    );

    assert!(
      renderer
        .set_month_from_picker("262142-12")
        .is_err()
    );
    assert_eq!(
      renderer.render_calendar().len() % 7,
      0
    );
    assert_eq!(
      renderer.view().month_key(),
      "2025-12"
    );
  }

  #[test]
  fn refresh_rebuilds_index_from_source() {
    let mut renderer = renderer();
    let before = renderer.render_calendar();
    let after = renderer.refresh();
    assert_eq!(before, after);
    assert_eq!(
      renderer.index().entry_count(),
      13
    );
    assert!(renderer.is_holiday("2026-02-20"));
  }

  #[test]
  fn fixed_source_survives_refresh() {
    let entries = vec![RosterEntry::new(
      1,
      ymd(2026, 2, 2),
      "8:00～9:00",
      "a",
      true
    )];
    let mut renderer =
      CalendarRenderer::with_entries(
        ScheduleConfig::default(),
        entries
      );
    renderer.refresh();
    assert_eq!(renderer.entries().len(), 1);
    let row =
      renderer.create_date_row(ymd(2026, 2, 2));
    assert_eq!(row.cells[0].staff.len(), 1);
  }
}
