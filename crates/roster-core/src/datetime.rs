use anyhow::{
  Context,
  anyhow
};
use chrono::{
  NaiveDate,
  Utc
};
use chrono_tz::Tz;
use roster_shared::month::parse_month_key;
use tracing::warn;

use crate::config::Config;

pub const DEFAULT_TIMEZONE: &str =
  "Asia/Shanghai";

pub fn resolve_timezone(
  cfg: &Config
) -> Tz {
  let raw = cfg
    .get("timezone")
    .unwrap_or_else(|| {
      DEFAULT_TIMEZONE.to_string()
    });
  match raw.trim().parse::<Tz>() {
    | Ok(tz) => tz,
    | Err(error) => {
      warn!(timezone = %raw, %error, "invalid timezone; falling back to default");
      DEFAULT_TIMEZONE
        .parse::<Tz>()
        .unwrap_or(chrono_tz::UTC)
    }
  }
}

pub fn today_in(tz: Tz) -> NaiveDate {
  Utc::now().with_timezone(&tz).date_naive()
}

/// `today`, `YYYY-MM` or `YYYY-MM-DD`
/// to a reference date.
pub fn parse_month_arg(
  raw: &str,
  tz: Tz
) -> anyhow::Result<NaiveDate> {
  let raw = raw.trim();
  if raw.eq_ignore_ascii_case("today") {
    return Ok(today_in(tz));
  }
  if let Ok(date) =
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
  {
    return Ok(date);
  }
  let (year, month) = parse_month_key(raw)?;
  NaiveDate::from_ymd_opt(year, month, 1)
    .ok_or_else(|| {
      anyhow!("invalid month: {raw}")
    })
}

pub fn parse_date_arg(
  raw: &str,
  tz: Tz
) -> anyhow::Result<NaiveDate> {
  let raw = raw.trim();
  if raw.eq_ignore_ascii_case("today") {
    return Ok(today_in(tz));
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .with_context(|| {
      format!(
        "expected YYYY-MM-DD, got: {raw}"
      )
    })
}
