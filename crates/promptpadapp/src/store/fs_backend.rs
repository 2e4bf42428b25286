use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use uuid::Uuid;

use super::backend::{Snapshot, StorageBackend};
use crate::error::{PromptpadError, Result};

const DATA_FILE: &str = "data.json";

/// Filesystem persistence: a single JSON snapshot file in the data
/// directory, written atomically (tmp file + rename).
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// OS-appropriate default data directory.
    pub fn default_root() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "promptpad", "promptpad").ok_or_else(|| {
            PromptpadError::Store("Could not determine a data directory".to_string())
        })?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(PromptpadError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Option<Snapshot>> {
        let path = self.data_file();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(PromptpadError::Io)?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(PromptpadError::Serialization)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.ensure_dir()?;
        let content =
            serde_json::to_string_pretty(snapshot).map_err(PromptpadError::Serialization)?;

        let tmp_file = self.root.join(format!(".data-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(PromptpadError::Io)?;
        fs::rename(&tmp_file, self.data_file()).map_err(PromptpadError::Io)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewPrompt, Prompt};
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().join("store"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_reconstructs_dates() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());

        let mut snapshot = Snapshot::default();
        snapshot.state.prompts.push(Prompt::new(NewPrompt {
            title: "T".to_string(),
            content: "c".to_string(),
            ..Default::default()
        }));

        backend.save(&snapshot).unwrap();
        let loaded = backend.load().unwrap().unwrap();

        assert_eq!(loaded, snapshot);
        assert_eq!(
            loaded.state.prompts[0].created_at,
            snapshot.state.prompts[0].created_at
        );
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().join("nested").join("store"));
        backend.save(&Snapshot::default()).unwrap();
        assert!(backend.load().unwrap().is_some());
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());
        fs::write(dir.path().join(DATA_FILE), "{ not valid json").unwrap();
        assert!(backend.load().is_err());
    }

    #[test]
    fn test_save_leaves_no_tmp_files() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().to_path_buf());
        backend.save(&Snapshot::default()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
