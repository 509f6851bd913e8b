use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::types::{validate_snapshot, EventSnapshot, LoadedEvent};
use crate::config::Config;
use crate::scoring::cohort::{CohortSnapshot, COHORT_SNAPSHOT_VERSION};

/// Get the default frozen cohort path (~/.config/pitchrank/cohort-{event}.json)
pub fn default_cohort_path(event_id: &str) -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join(format!("cohort-{}.json", event_id)))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Load an event snapshot from a JSON or YAML file (chosen by extension) and
/// validate it.
///
/// Validation problems are reported together in one error.
pub fn load_event_snapshot(path: &Path, config: &Config) -> Result<LoadedEvent> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event snapshot at {}", path.display()))?;

    let snapshot: EventSnapshot = if is_yaml(path) {
        serde_saphyr::from_str(&content).with_context(|| {
            format!("Failed to parse event snapshot: invalid YAML in {}", path.display())
        })?
    } else {
        serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse event snapshot: invalid JSON in {}", path.display())
        })?
    };

    let loaded = validate_snapshot(snapshot, config).map_err(|errors| {
        anyhow::anyhow!(
            "Invalid event snapshot {}:\n  - {}",
            path.display(),
            errors.join("\n  - ")
        )
    })?;

    tracing::debug!(
        event_id = %loaded.event.id,
        teams = loaded.teams.len(),
        judges = loaded.judges.len(),
        scores = loaded.scores.len(),
        "loaded event snapshot"
    );
    Ok(loaded)
}

/// Load a frozen cohort from a JSON file
///
/// If the file exists but has an unsupported version, returns an error.
pub fn load_cohort_snapshot(path: &Path) -> Result<CohortSnapshot> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open cohort snapshot at {}", path.display()))?;

    let snapshot: CohortSnapshot =
        serde_json::from_reader(file).context("Failed to load cohort snapshot")?;

    if snapshot.version != COHORT_SNAPSHOT_VERSION {
        anyhow::bail!("Unsupported cohort snapshot version: {}", snapshot.version);
    }

    Ok(snapshot)
}

/// Save a frozen cohort to a JSON file atomically
///
/// Uses atomic-write-file so a reader never sees a half-written cohort.
/// Creates the parent directory if it doesn't exist.
pub fn save_cohort_snapshot(path: &Path, snapshot: &CohortSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, snapshot)
        .context("Failed to serialize cohort snapshot")?;

    file.commit().context("Failed to save cohort snapshot")?;

    Ok(())
}
