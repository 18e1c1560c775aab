//! Project files
//!
//! A project is the three keypoint tracks plus the id counter, stored as
//! pretty-printed JSON with a format version.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spinframe_animation::KeypointStore;
use std::fs;
use std::path::Path;

/// Current project file format
pub const PROJECT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct ProjectFile {
    version: u32,
    keypoints: KeypointStore,
}

/// Parse a project from JSON
pub fn from_json(content: &str) -> Result<KeypointStore> {
    let file: ProjectFile = serde_json::from_str(content).context("Failed to parse project")?;
    if file.version > PROJECT_VERSION {
        anyhow::bail!(
            "Project format version {} is newer than supported version {}",
            file.version,
            PROJECT_VERSION
        );
    }
    let mut store = file.keypoints;
    store.normalize();
    Ok(store)
}

/// Serialize a project to JSON
pub fn to_json(store: &KeypointStore) -> Result<String> {
    let file = ProjectFile {
        version: PROJECT_VERSION,
        keypoints: store.clone(),
    };
    serde_json::to_string_pretty(&file).context("Failed to serialize project")
}

/// Load a project file
pub fn load_project(path: &Path) -> Result<KeypointStore> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let store = from_json(&content).with_context(|| format!("Invalid project {}", path.display()))?;
    tracing::debug!(path = %path.display(), keypoints = store.total_keypoints(), "project loaded");
    Ok(store)
}

/// Write a project file
pub fn save_project(path: &Path, store: &KeypointStore) -> Result<()> {
    let content = to_json(store)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "project saved");
    Ok(())
}
