//! JSON persistence for waypoint paths

use super::path::WaypointPath;
use crate::core::types::PilotResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Loads and saves a path as a JSON array of `[x, y]` pairs
#[derive(Debug, Clone)]
pub struct PathStore {
    file: PathBuf,
}

impl PathStore {
    pub fn new<P: AsRef<Path>>(file: P) -> Self {
        PathStore {
            file: file.as_ref().to_path_buf(),
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Read the whole file into memory
    pub fn load(&self) -> PilotResult<WaypointPath> {
        let contents = fs::read_to_string(&self.file)?;
        let path: WaypointPath = serde_json::from_str(&contents)?;
        info!("Loaded {} waypoint(s) from {}", path.len(), self.file.display());
        Ok(path)
    }

    /// Truncate the file and write the whole path
    pub fn save(&self, path: &WaypointPath) -> PilotResult<()> {
        let contents = serde_json::to_string_pretty(path)?;
        fs::write(&self.file, contents)?;
        info!("Saved {} waypoint(s) to {}", path.len(), self.file.display());
        Ok(())
    }
}
