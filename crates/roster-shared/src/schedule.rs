use std::collections::BTreeSet;

use anyhow::{
  Context,
  anyhow
};
use chrono::{
  Datelike,
  NaiveDate
};
use serde::{
  Deserialize,
  Serialize
};

use crate::month::month_window;

pub const DEFAULT_SCHEDULE_TOML: &str =
  include_str!("../assets/schedule.toml");

const DEFAULT_TIME_SLOTS: [&str; 7] = [
  "8:00～9:00",
  "9:00～12:00",
  "13:30～18:00",
  "18:00～21:00",
  "8:00～12:00",
  "13:30～17:30",
  "17:30～21:30"
];

/// Dates highlighted as holidays.
/// Membership only; nothing is derived
/// from a real holiday calendar.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(transparent)]
pub struct HolidaySet(BTreeSet<NaiveDate>);

impl HolidaySet {
  pub fn new<I>(dates: I) -> Self
  where
    I: IntoIterator<Item = NaiveDate>
  {
    Self(dates.into_iter().collect())
  }

  pub fn contains(
    &self,
    date: NaiveDate
  ) -> bool {
    self.0.contains(&date)
  }

  /// Membership test on a `YYYY-MM-DD`
  /// key. Anything unparsable is not a
  /// holiday.
  pub fn contains_key(
    &self,
    date_key: &str
  ) -> bool {
    NaiveDate::parse_from_str(
      date_key, "%Y-%m-%d"
    )
    .map(|date| self.contains(date))
    .unwrap_or(false)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct StaffConfig {
  #[serde(default)]
  pub core_staff:  String,
  #[serde(default)]
  pub test_staffs: Vec<String>
}

impl StaffConfig {
  pub fn validate(
    &self
  ) -> anyhow::Result<()> {
    if self.core_staff.trim().is_empty()
    {
      return Err(anyhow!(
        "core staff must not be empty"
      ));
    }
    if self.test_staffs.is_empty() {
      return Err(anyhow!(
        "at least one test staff is \
         required"
      ));
    }
    Ok(())
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ScheduleConfig {
  #[serde(default)]
  pub version:      u32,
  #[serde(
    default = "default_initial_date"
  )]
  pub initial_date: NaiveDate,
  #[serde(default = "default_time_slots")]
  pub time_slots:   Vec<String>,
  #[serde(default)]
  pub holidays:     HolidaySet,
  #[serde(default)]
  pub staff:        StaffConfig
}

impl Default for ScheduleConfig {
  fn default() -> Self {
    Self {
      version:      1,
      initial_date: default_initial_date(
      ),
      time_slots:   default_time_slots(),
      holidays:     HolidaySet::default(),
      staff:        StaffConfig::default()
    }
  }
}

impl ScheduleConfig {
  pub fn from_toml(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<ScheduleConfig>(
        raw
      )
      .context(
        "failed parsing schedule config"
      )?;
    sanitize_schedule_config(
      &mut config
    );
    Ok(config)
  }

  /// The embedded schedule. Falls back
  /// to bare defaults if the asset does
  /// not parse.
  pub fn embedded() -> Self {
    match Self::from_toml(
      DEFAULT_SCHEDULE_TOML
    ) {
      | Ok(config) => {
        tracing::info!(
          version = config.version,
          slots = config.time_slots.len(),
          holidays = config.holidays.len(),
          "loaded schedule config"
        );
        config
      }
      | Err(error) => {
        tracing::error!(%error, "failed parsing embedded schedule config; using defaults");
        ScheduleConfig::default()
      }
    }
  }

  pub fn is_holiday(
    &self,
    date_key: &str
  ) -> bool {
    self.holidays.contains_key(date_key)
  }

  /// Staff roles, validated.
  pub fn load_staff_config(
    &self
  ) -> anyhow::Result<StaffConfig> {
    self.staff.validate()?;
    Ok(self.staff.clone())
  }
}

fn default_initial_date() -> NaiveDate {
  NaiveDate::from_ymd_opt(2026, 2, 14)
    .unwrap_or(NaiveDate::MIN)
}

fn default_time_slots() -> Vec<String> {
  DEFAULT_TIME_SLOTS
    .iter()
    .map(|slot| slot.to_string())
    .collect()
}

fn sanitize_schedule_config(
  config: &mut ScheduleConfig
) {
  let mut seen = BTreeSet::new();
  config.time_slots.retain(|slot| {
    let slot = slot.trim();
    !slot.is_empty()
      && seen.insert(slot.to_string())
  });
  for slot in &mut config.time_slots {
    *slot = slot.trim().to_string();
  }

  if config.time_slots.is_empty() {
    tracing::warn!(
      "schedule config has no time \
       slots; using defaults"
    );
    config.time_slots =
      default_time_slots();
  }

  config.staff.test_staffs.retain(
    |name| !name.trim().is_empty()
  );

  if month_window(
    config.initial_date.year(),
    config.initial_date.month()
  )
  .is_none()
  {
    tracing::warn!(
      initial_date = %config.initial_date,
      "initial date cannot be displayed; \
       using default"
    );
    config.initial_date =
      default_initial_date();
  }
}
