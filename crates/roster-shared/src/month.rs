use anyhow::{
  Context,
  anyhow
};
use chrono::{
  Datelike,
  Duration,
  NaiveDate,
  Weekday
};

/// The month a calendar view is focused
/// on. Holds a full reference date so
/// the day survives navigation where it
/// fits in the target month.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct ViewState {
  reference: NaiveDate
}

impl ViewState {
  pub fn new(
    reference: NaiveDate
  ) -> Self {
    Self { reference }
  }

  pub fn reference(&self) -> NaiveDate {
    self.reference
  }

  pub fn year(&self) -> i32 {
    self.reference.year()
  }

  pub fn month(&self) -> u32 {
    self.reference.month()
  }

  /// `YYYY-MM`, the value format of a
  /// month picker input.
  pub fn month_key(&self) -> String {
    format!(
      "{:04}-{:02}",
      self.year(),
      self.month()
    )
  }

  pub fn set_month(
    &mut self,
    year: i32,
    month: u32
  ) -> anyhow::Result<()> {
    if month_window(year, month).is_none()
    {
      return Err(anyhow!(
        "invalid month {year}-{month}"
      ));
    }
    self.reference = first_day_of_month(
      year, month
    );
    Ok(())
  }

  /// Focuses the month containing
  /// `date`, keeping its day.
  pub fn set_reference(
    &mut self,
    date: NaiveDate
  ) -> anyhow::Result<()> {
    if month_window(
      date.year(),
      date.month()
    )
    .is_none()
    {
      return Err(anyhow!(
        "date {date} is outside the \
         displayable range"
      ));
    }
    self.reference = date;
    Ok(())
  }

  /// Moves by `months`. Stays put when
  /// the target month cannot be shown.
  pub fn shift(&mut self, months: i32) {
    let target =
      shift_months(self.reference, months);
    if month_window(
      target.year(),
      target.month()
    )
    .is_none()
    {
      tracing::warn!(
        from = %self.reference,
        months,
        "month out of displayable range"
      );
      return;
    }
    self.reference = target;
  }

  pub fn first_day(&self) -> NaiveDate {
    first_day_of_month(
      self.year(),
      self.month()
    )
  }

  pub fn last_day(&self) -> NaiveDate {
    last_day_of_month(
      self.year(),
      self.month()
    )
  }

  /// Every day of the whole weeks that
  /// cover the month, Sunday first.
  pub fn display_window(
    &self
  ) -> Vec<NaiveDate> {
    let Some((start, end)) = month_window(
      self.year(),
      self.month()
    ) else {
      return Vec::new();
    };
    start
      .iter_days()
      .take_while(|day| *day <= end)
      .collect()
  }
}

/// First and last day of the Sunday-first
/// weeks covering a month. `None` when
/// any of those days falls outside
/// chrono's date range.
pub fn month_window(
  year: i32,
  month: u32
) -> Option<(NaiveDate, NaiveDate)> {
  let first =
    NaiveDate::from_ymd_opt(year, month, 1)?;
  let next = if month >= 12 {
    NaiveDate::from_ymd_opt(
      year.checked_add(1)?,
      1,
      1
    )?
  } else {
    NaiveDate::from_ymd_opt(
      year,
      month + 1,
      1
    )?
  };
  let last = next.pred_opt()?;
  let lead = first
    .weekday()
    .num_days_from_sunday();
  let trail = 6 - last
    .weekday()
    .num_days_from_sunday();
  let start = first.checked_sub_signed(
    Duration::days(i64::from(lead))
  )?;
  let end = last.checked_add_signed(
    Duration::days(i64::from(trail))
  )?;
  Some((start, end))
}

/// Parses a month picker value
/// (`YYYY-MM`).
pub fn parse_month_key(
  raw: &str
) -> anyhow::Result<(i32, u32)> {
  let (year, month) = raw
    .trim()
    .split_once('-')
    .ok_or_else(|| {
      anyhow!(
        "expected YYYY-MM, got: {raw}"
      )
    })?;
  let year = year
    .parse::<i32>()
    .with_context(|| {
      format!("invalid year in {raw}")
    })?;
  let month = month
    .parse::<u32>()
    .with_context(|| {
      format!("invalid month in {raw}")
    })?;
  if !(1..=12).contains(&month) {
    return Err(anyhow!(
      "month out of range in {raw}"
    ));
  }
  Ok((year, month))
}

pub fn shift_months(
  date: NaiveDate,
  months: i32
) -> NaiveDate {
  let mut year = date.year();
  let mut month =
    date.month() as i32 + months;

  while month < 1 {
    month += 12;
    year = year.saturating_sub(1);
  }
  while month > 12 {
    month -= 12;
    year = year.saturating_add(1);
  }

  let month = month as u32;
  let day = date
    .day()
    .min(days_in_month(year, month));
  NaiveDate::from_ymd_opt(
    year, month, day
  )
  .unwrap_or(date)
}

pub fn first_day_of_month(
  year: i32,
  month: u32
) -> NaiveDate {
  NaiveDate::from_ymd_opt(
    year, month, 1
  )
  .unwrap_or(NaiveDate::MIN)
}

pub fn last_day_of_month(
  year: i32,
  month: u32
) -> NaiveDate {
  let (next_year, next_month) =
    if month >= 12 {
      (year.saturating_add(1), 1_u32)
    } else {
      (year, month + 1)
    };
  add_days(
    first_day_of_month(
      next_year, next_month
    ),
    -1
  )
}

pub fn days_in_month(
  year: i32,
  month: u32
) -> u32 {
  last_day_of_month(year, month).day()
}

pub fn add_days(
  date: NaiveDate,
  days: i64
) -> NaiveDate {
  date
    .checked_add_signed(Duration::days(
      days
    ))
    .unwrap_or(date)
}

pub fn is_weekend(
  date: NaiveDate
) -> bool {
  matches!(
    date.weekday(),
    Weekday::Sat | Weekday::Sun
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn february_window_covers_whole_weeks(
  ) {
    let view =
      ViewState::new(ymd(2026, 2, 14));
    let window = view.display_window();

    // 2026-02-01 is a Sunday and
    // 2026-02-28 a Saturday.
    assert_eq!(window.len(), 28);
    assert_eq!(window[0], ymd(2026, 2, 1));
    assert_eq!(
      window.last().copied(),
      Some(ymd(2026, 2, 28))
    );
  }

  #[test]
  fn window_spans_sunday_to_saturday_for_every_month(
  ) {
    for month in 1..=12 {
      let view =
        ViewState::new(ymd(2026, month, 1));
      let window =
        view.display_window();
      assert_eq!(window.len() % 7, 0);
      assert_eq!(
        window[0].weekday(),
        Weekday::Sun
      );
      assert_eq!(
        window
          .last()
          .map(|day| day.weekday()),
        Some(Weekday::Sat)
      );
      assert!(window[0] <= view.first_day());
      assert!(
        window[0]
          > add_days(view.first_day(), -7)
      );
      assert!(window.contains(
        &view.last_day()
      ));
      assert!(window.windows(2).all(
        |pair| pair[1]
          == add_days(pair[0], 1)
      ));
    }
  }

  #[test]
  fn month_navigation_rolls_over_years() {
    let mut view =
      ViewState::new(ymd(2026, 2, 14));
    view.shift(1);
    assert_eq!(view.month_key(), "2026-03");
    view.shift(-1);
    assert_eq!(view.month_key(), "2026-02");

    let mut view =
      ViewState::new(ymd(2025, 12, 31));
    view.shift(1);
    assert_eq!(
      view.reference(),
      ymd(2026, 1, 31)
    );
    view.shift(1);
    assert_eq!(
      view.reference(),
      ymd(2026, 2, 28)
    );
    view.shift(-2);
    assert_eq!(
      view.reference(),
      ymd(2025, 12, 28)
    );
  }

  #[test]
  fn months_at_the_date_limits_are_refused(
  ) {
    let max = NaiveDate::MAX;
    assert!(
      month_window(max.year(), max.month())
        .is_none()
    );
    assert!(
      month_window(
        NaiveDate::MIN.year(),
        NaiveDate::MIN.month()
      )
      .is_none()
    );

    let mut view =
      ViewState::new(ymd(2026, 2, 14));
    assert!(
      view
        .set_month(max.year(), max.month())
        .is_err()
    );
    assert!(view.set_reference(max).is_err());
    assert_eq!(
      view.reference(),
      ymd(2026, 2, 14)
    );

    let mut edge =
      ViewState::new(ymd(2026, 1, 1));
    edge
      .set_month(max.year(), 11)
      .expect("month before the limit");
    edge.shift(1);
    assert_eq!(edge.month(), 11);
    assert_eq!(
      edge.display_window().len() % 7,
      0
    );
  }

  #[test]
  fn month_key_parsing() {
    assert_eq!(
      parse_month_key("2026-03")
        .expect("parse"),
      (2026, 3)
    );
    assert!(parse_month_key("2026").is_err());
    assert!(
      parse_month_key("2026-13").is_err()
    );
    assert!(
      parse_month_key("abcd-01").is_err()
    );
  }
}
