use std::collections::{
  HashMap,
  HashSet
};
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use roster_shared::ScheduleConfig;
use tracing::{
  debug,
  info,
  trace,
  warn
};

#[derive(Debug, Clone)]
pub struct Config {
  map:              HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Config {
  #[tracing::instrument(skip(
    rosterrc_override
  ))]
  pub fn load(
    rosterrc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::defaults();

    let rosterrc = resolve_rosterrc_path(
      rosterrc_override
    )?;
    if let Some(path) = rosterrc {
      info!(rosterrc = %path.display(), "loading rosterrc");
      cfg.load_file(
        &path,
        &mut HashSet::new()
      )?;
    } else {
      warn!(
        "no rosterrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  pub fn defaults() -> Self {
    let mut cfg = Config {
      map:          HashMap::new(),
      loaded_files: vec![]
    };

    cfg.map.insert(
      "color".to_string(),
      "on".to_string()
    );
    cfg.map.insert(
      "timezone".to_string(),
      "Asia/Shanghai".to_string()
    );
    cfg
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  /// Errors when the value is not a
  /// recognised boolean word.
  pub fn get_bool(
    &self,
    key: &str
  ) -> anyhow::Result<Option<bool>> {
    let Some(raw) = self.map.get(key)
    else {
      return Ok(None);
    };
    parse_bool(raw)
      .map(Some)
      .ok_or_else(|| {
        anyhow!(
          "invalid {key} setting: {raw}"
        )
      })
  }

  pub fn get_path(
    &self,
    key: &str
  ) -> Option<PathBuf> {
    self
      .map
      .get(key)
      .filter(|v| !v.trim().is_empty())
      .map(|v| expand_tilde(Path::new(v)))
  }

  #[tracing::instrument(skip(
    self, visiting
  ))]
  fn load_file(
    &mut self,
    path: &Path,
    visiting: &mut HashSet<PathBuf>
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let canonical =
      fs::canonicalize(&path)
        .with_context(|| {
          format!(
            "failed to resolve {}",
            path.display()
          )
        })?;
    if !visiting.insert(canonical.clone())
    {
      return Err(anyhow!(
        "include cycle at {}",
        path.display()
      ));
    }

    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if line.is_empty()
        || line.starts_with('#')
      {
        continue;
      }

      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          self.load_file(
            &include_path,
            visiting
          )?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    visiting.remove(&canonical);
    Ok(())
  }
}

/// Schedule from `--schedule`, then
/// `schedule.file`, then the embedded
/// default.
#[tracing::instrument(skip(
  cfg,
  override_path
))]
pub fn resolve_schedule(
  cfg: &Config,
  override_path: Option<&Path>
) -> anyhow::Result<ScheduleConfig> {
  let path = override_path
    .map(Path::to_path_buf)
    .or_else(|| {
      cfg.get_path("schedule.file")
    });

  let Some(path) = path else {
    debug!("using embedded schedule");
    return Ok(ScheduleConfig::embedded());
  };

  let text = fs::read_to_string(&path)
    .with_context(|| {
      format!(
        "failed to read {}",
        path.display()
      )
    })?;
  let schedule =
    ScheduleConfig::from_toml(&text)
      .with_context(|| {
        format!(
          "invalid schedule {}",
          path.display()
        )
      })?;
  info!(
    schedule = %path.display(),
    slots = schedule.time_slots.len(),
    holidays = schedule.holidays.len(),
    "loaded schedule file"
  );
  Ok(schedule)
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rosterrc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rosterrc_env) =
    std::env::var("ROSTERRC")
  {
    if rosterrc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rosterrc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    warn!(
      "cannot determine home \
       directory"
    );
    return Ok(None);
  };
  let candidate =
    home.join(".rosterrc");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Some(true),
    | "0" | "n" | "no" | "off"
    | "false" => Some(false),
    | _ => None
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn rosterrc_includes_and_overrides() {
    let dir = tempdir().expect("tempdir");
    let extra = dir.path().join("extra.rc");
    fs::write(&extra, "month = 2026-03\n")
      .expect("write include");
    let main = dir.path().join("rosterrc");
    fs::write(
      &main,
      "# roster settings\ncolor = off # plain\ninclude extra.rc\n"
    )
    .expect("write rosterrc");

    let mut cfg = Config::load(Some(&main))
      .expect("load config");
    assert_eq!(
      cfg.get_bool("color").expect("bool"),
      Some(false)
    );
    assert_eq!(
      cfg.get("month").as_deref(),
      Some("2026-03")
    );
    assert_eq!(cfg.loaded_files.len(), 2);

    cfg.apply_overrides([(
      "rc.month".to_string(),
      "2026-04".to_string()
    )]);
    assert_eq!(
      cfg.get("month").as_deref(),
      Some("2026-04")
    );
    assert_eq!(
      cfg.get("timezone").as_deref(),
      Some("Asia/Shanghai")
    );
  }

  #[test]
  fn include_cycles_are_reported() {
    let dir = tempdir().expect("tempdir");
    let main = dir.path().join("rosterrc");
    fs::write(&main, "include rosterrc\n")
      .expect("write rosterrc");
    let err = Config::load(Some(&main))
      .expect_err("self include");
    assert!(
      format!("{err:#}")
        .contains("include cycle")
    );

    let first = dir.path().join("a.rc");
    let second = dir.path().join("b.rc");
    fs::write(&first, "include b.rc\n")
      .expect("write a.rc");
    fs::write(&second, "include a.rc\n")
      .expect("write b.rc");
    assert!(Config::load(Some(&first)).is_err());
  }

  #[test]
  fn shared_include_is_not_a_cycle() {
    let dir = tempdir().expect("tempdir");
    let common = dir.path().join("common.rc");
    fs::write(&common, "color = off\n")
      .expect("write common");
    let main = dir.path().join("rosterrc");
    fs::write(
      &main,
      "include common.rc\ninclude common.rc\n"
    )
    .expect("write rosterrc");
    let cfg = Config::load(Some(&main))
      .expect("repeated include");
    assert_eq!(cfg.loaded_files.len(), 3);
  }

  #[test]
  fn bool_settings_are_strict() {
    let mut cfg = Config::defaults();
    cfg.apply_overrides([
      ("color".to_string(), "y".to_string()),
      ("month".to_string(), "2026-03".to_string())
    ]);
    assert_eq!(
      cfg.get_bool("color").expect("bool"),
      Some(true)
    );
    assert!(cfg.get_bool("month").is_err());
    assert_eq!(
      cfg.get_bool("missing").expect("bool"),
      None
    );
  }

  #[test]
  fn malformed_line_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let main = dir.path().join("rosterrc");
    fs::write(&main, "color\n")
      .expect("write rosterrc");
    assert!(Config::load(Some(&main)).is_err());
  }

  #[test]
  fn schedule_file_overrides_embedded() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("schedule.toml");
    fs::write(
      &path,
      "initial_date = \"2026-05-01\"\ntime_slots = [\"早班\", \"晚班\"]\nholidays = [\"2026-05-01\"]\n"
    )
    .expect("write schedule");

    let cfg = Config::defaults();
    let schedule =
      resolve_schedule(&cfg, Some(&path))
        .expect("schedule");
    assert_eq!(schedule.time_slots.len(), 2);
    assert!(schedule.is_holiday("2026-05-01"));

    let embedded = resolve_schedule(&cfg, None)
      .expect("embedded schedule");
    assert_eq!(embedded.time_slots.len(), 7);
  }
}
