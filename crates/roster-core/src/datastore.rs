use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use roster_shared::RosterEntry;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// A roster data file: a JSON array, or one JSON entry per line for `.jsonl`.
#[derive(Debug)]
pub struct RosterFile {
    pub path: PathBuf,
}

impl RosterFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> anyhow::Result<Vec<RosterEntry>> {
        let entries = if is_jsonl(&self.path) {
            load_jsonl(&self.path)?
        } else {
            load_json(&self.path)?
        };

        info!(
            file = %self.path.display(),
            entries = entries.len(),
            "loaded roster file"
        );
        Ok(entries)
    }
}

fn is_jsonl(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"))
}

fn load_json(path: &Path) -> anyhow::Result<Vec<RosterEntry>> {
    debug!(file = %path.display(), "loading json");
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed parsing {}", path.display()))
}

fn load_jsonl(path: &Path) -> anyhow::Result<Vec<RosterEntry>> {
    debug!(file = %path.display(), "loading jsonl");
    let file =
        fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let entry: RosterEntry = serde_json::from_str(trimmed)
            .with_context(|| format!("failed parsing {} line {}", path.display(), idx + 1))?;
        out.push(entry);
    }

    debug!(count = out.len(), "loaded entries from jsonl");
    Ok(out)
}

/// Writes `contents` through a temp file in the target directory so readers
/// never see a partial export.
#[tracing::instrument(skip(path, contents))]
pub fn write_atomic(path: &Path, contents: &str) -> anyhow::Result<()> {
    debug!(file = %path.display(), bytes = contents.len(), "writing file atomically");

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}
