use crate::core::GroupStore;
use crate::utils::error::{BuddyError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Group store kept as a single JSON object (`{ "<run id>": "<channel>" }`) on disk.
#[derive(Debug, Clone)]
pub struct LocalGroupStore {
    path: PathBuf,
}

impl LocalGroupStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(data) if data.is_empty() => Ok(BTreeMap::new()),
            Ok(data) => serde_json::from_slice(&data).map_err(|e| BuddyError::StoreError {
                message: format!("{} is not a valid group store: {}", self.path.display(), e),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(BuddyError::IoError(e)),
        }
    }
}

impl GroupStore for LocalGroupStore {
    async fn get_group(&self, run_id: &str) -> Result<Option<String>> {
        Ok(self.read_all().await?.remove(run_id))
    }

    async fn set_group(&self, run_id: &str, group_id: &str) -> Result<()> {
        let mut groups = self.read_all().await?;
        groups.insert(run_id.to_string(), group_id.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(&groups)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}
