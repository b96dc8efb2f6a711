use chrono::NaiveDate;
use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

/// One staff assignment to a date and
/// time slot.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct RosterEntry {
  pub id:         u64,
  pub date:       NaiveDate,
  pub time_slot:  String,
  pub staff_name: String,
  #[serde(
    default,
    deserialize_with = "deserialize_flag"
  )]
  pub core_staff: bool
}

impl RosterEntry {
  pub fn new(
    id: u64,
    date: NaiveDate,
    time_slot: &str,
    staff_name: &str,
    core_staff: bool
  ) -> Self {
    Self {
      id,
      date,
      time_slot: time_slot.to_string(),
      staff_name: staff_name
        .to_string(),
      core_staff
    }
  }

  pub fn date_key(&self) -> String {
    date_key(self.date)
  }
}

pub fn date_key(
  date: NaiveDate
) -> String {
  date.format("%Y-%m-%d").to_string()
}

// Roster exports written by the
// scheduling backend store the flag
// as 0/1.
fn deserialize_flag<'de, D>(
  deserializer: D
) -> Result<bool, D::Error>
where
  D: Deserializer<'de>
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Flag {
    Bool(bool),
    Int(i64)
  }

  match Flag::deserialize(deserializer)?
  {
    | Flag::Bool(value) => Ok(value),
    | Flag::Int(value) => Ok(value != 0)
  }
}

/// The fixed roster the calendar is
/// loaded with.
pub fn builtin_entries()
-> Vec<RosterEntry> {
  const ROWS: [(
    u64,
    (i32, u32, u32),
    &str,
    &str,
    bool
  ); 13] = [
    (
      191,
      (2026, 2, 14),
      "8:00～9:00",
      "林子旺",
      false
    ),
    (
      192,
      (2026, 2, 14),
      "9:00～12:00",
      "郑晨昊",
      true
    ),
    (
      193,
      (2026, 2, 14),
      "9:00～12:00",
      "林子旺",
      false
    ),
    (
      194,
      (2026, 2, 14),
      "9:00～12:00",
      "曾婷婷",
      false
    ),
    (
      195,
      (2026, 2, 14),
      "9:00～12:00",
      "陈伟强",
      false
    ),
    (
      196,
      (2026, 2, 14),
      "13:30～18:00",
      "郑晨昊",
      true
    ),
    (
      197,
      (2026, 2, 14),
      "13:30～18:00",
      "林子旺",
      false
    ),
    (
      198,
      (2026, 2, 14),
      "13:30～18:00",
      "曾婷婷",
      false
    ),
    (
      199,
      (2026, 2, 14),
      "13:30～18:00",
      "陈伟强",
      false
    ),
    (
      200,
      (2026, 2, 14),
      "18:00～21:00",
      "林子旺",
      false
    ),
    (
      201,
      (2026, 2, 15),
      "8:00～12:00",
      "林子旺",
      false
    ),
    (
      202,
      (2026, 2, 15),
      "13:30～17:30",
      "林子旺",
      false
    ),
    (
      203,
      (2026, 2, 15),
      "17:30～21:30",
      "林子旺",
      false
    )
  ];

  ROWS
    .iter()
    .filter_map(
      |&(id, (y, m, d), slot, name, core)| {
        NaiveDate::from_ymd_opt(y, m, d)
          .map(|date| {
            RosterEntry::new(
              id, date, slot, name, core
            )
          })
      }
    )
    .collect()
}
