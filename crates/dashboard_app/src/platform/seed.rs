//! Loads the server-provided job seed at startup.
//!
//! The seed is a JSON array of `{ "id", "filename"?, "status"? }` objects
//! describing jobs that already existed server-side when the page loaded.

use std::fs;
use std::path::Path;

use dashboard_core::JobSeed;
use dashboard_logging::{dash_info, dash_warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct SeedEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Reads a seed file. Any problem degrades to an empty seed with a
/// warning so a bad snapshot never blocks startup.
pub(crate) fn load_seed(path: &Path) -> Vec<JobSeed> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            dash_warn!("Failed to read seed file {:?}: {}", path, err);
            return Vec::new();
        }
    };

    let entries: Vec<SeedEntry> = match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(err) => {
            dash_warn!("Failed to parse seed file {:?}: {}", path, err);
            return Vec::new();
        }
    };

    let mut seeds = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.id.is_empty() {
            dash_warn!("Skipping seed entry without an id in {:?}", path);
            continue;
        }
        seeds.push(JobSeed {
            id: entry.id,
            filename: entry.filename,
            status: entry.status,
        });
    }

    dash_info!("Loaded {} seeded job(s) from {:?}", seeds.len(), path);
    seeds
}
