use chrono::NaiveDateTime;
use log::error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use utoipa::ToSchema;

use crate::track::{Sample, TrackMetadata};

const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// A track as kept on disk: its metadata and ordered samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TrackDocument {
    #[serde(default)]
    pub metadata: TrackMetadata,
    #[serde(default)]
    pub points: Vec<Sample>,
}

impl TrackDocument {
    /// Parse a YAML or JSON document. JSON is a subset of YAML.
    pub fn from_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn from_file(path: &Path) -> Result<Self, StorageError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_str(&content)?)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrackEntry {
    pub id: String,
    pub name: String,
    pub point_count: usize,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Track not found: {0}")]
    NotFound(String),
}

/// Read-only view over a folder of track documents, one file per track.
pub struct Storage {
    base: PathBuf,
}

impl Storage {
    pub fn new(base: PathBuf) -> Self {
        Storage { base }
    }

    fn track_path(&self, id: &str) -> Option<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return None;
        }
        EXTENSIONS
            .iter()
            .map(|ext| self.base.join(format!("{}.{}", id, ext)))
            .find(|path| path.is_file())
    }

    pub fn list_tracks(&self) -> Result<Vec<TrackEntry>, StorageError> {
        if !self.base.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in self.base.read_dir()? {
            let entry = entry?;
            let entry_path = entry.path();

            if !entry_path.is_file() || !has_track_extension(&entry_path) {
                continue;
            }

            let id = entry_path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(String::from)
                .unwrap_or_default();

            let document = match TrackDocument::from_file(&entry_path) {
                Ok(document) => document,
                Err(e) => {
                    error!("Failed to load track {}: {}", entry_path.display(), e);
                    continue;
                }
            };

            entries.push(TrackEntry {
                id,
                name: document.metadata.display_name().to_string(),
                point_count: document.points.len(),
                start_time: document.metadata.start_time,
                end_time: document.metadata.end_time,
            });
        }

        entries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(entries)
    }

    pub fn get_track(&self, id: &str) -> Result<TrackDocument, StorageError> {
        let path = self
            .track_path(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        TrackDocument::from_file(&path)
    }
}

fn has_track_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const RUN_YAML: &str = r#"
metadata:
  name: Evening Run
  start_time: 2024-01-01 10:00:00
  end_time: 2024-01-01 10:30:00
points:
  - longitude: 116.397128
    latitude: 39.916527
    altitude: 50.5
    speed: 5.2
    captured_at: 2024-01-01 10:00:00
  - longitude: 116.398
    latitude: 39.917
"#;

    const RIDE_JSON: &str = r#"{"metadata": {"name": ""}, "points": [{"latitude": 1.0}]}"#;

    fn fixture() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("run.yaml"), RUN_YAML).unwrap();
        fs::write(dir.path().join("ride.json"), RIDE_JSON).unwrap();
        fs::write(dir.path().join("broken.yaml"), "points: [").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test]
    fn lists_parseable_tracks_sorted() {
        let (_dir, storage) = fixture();
        let tracks = storage.list_tracks().unwrap();

        let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["ride", "run"]);
        assert_eq!(tracks[0].name, "Untitled Track");
        assert_eq!(tracks[1].point_count, 2);
        assert!(tracks[1].start_time.is_some());
    }

    #[test]
    fn loads_track_by_id() {
        let (_dir, storage) = fixture();
        let doc = storage.get_track("run").unwrap();
        assert_eq!(doc.metadata.name.as_deref(), Some("Evening Run"));
        assert_eq!(doc.points[0].altitude, Some(50.5));
        assert_eq!(doc.points[1].speed, None);
    }

    #[test]
    fn missing_and_traversal_ids_are_not_found() {
        let (_dir, storage) = fixture();
        assert!(matches!(storage.get_track("nope"), Err(StorageError::NotFound(_))));
        assert!(matches!(storage.get_track("../run"), Err(StorageError::NotFound(_))));
        assert!(matches!(storage.get_track("broken"), Err(StorageError::Parse(_))));
    }

    #[test]
    fn missing_folder_lists_nothing() {
        let storage = Storage::new(PathBuf::from("/nonexistent/tracks"));
        assert!(storage.list_tracks().unwrap().is_empty());
    }
}
