use crate::core::GroupStore;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local group store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryGroupStore {
    groups: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupStore for MemoryGroupStore {
    async fn get_group(&self, run_id: &str) -> Result<Option<String>> {
        Ok(self.groups.read().await.get(run_id).cloned())
    }

    async fn set_group(&self, run_id: &str, group_id: &str) -> Result<()> {
        self.groups
            .write()
            .await
            .insert(run_id.to_string(), group_id.to_string());
        Ok(())
    }
}
