use crate::core::GroupStore;
use crate::utils::error::{BuddyError, Result};

/// Remembers the group picked for a workflow run.
pub async fn save_group_for_run<G: GroupStore>(
    store: &G,
    run_id: &str,
    group_id: &str,
) -> Result<()> {
    tracing::info!("Setting key: {} with value: {}", run_id, group_id);
    store.set_group(run_id, group_id).await
}

pub async fn resolve_group_for_run<G: GroupStore>(store: &G, run_id: &str) -> Result<String> {
    let group_id = store
        .get_group(run_id)
        .await?
        .ok_or_else(|| BuddyError::GroupNotConfigured {
            run_id: run_id.to_string(),
        })?;

    tracing::info!("Getting key: {} with value: {}", run_id, group_id);
    Ok(group_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryGroupStore;

    #[tokio::test]
    async fn test_resolve_returns_last_saved_group() {
        let store = MemoryGroupStore::new();

        save_group_for_run(&store, "Wf01", "C1").await.unwrap();
        save_group_for_run(&store, "Wf01", "C2").await.unwrap();

        assert_eq!(resolve_group_for_run(&store, "Wf01").await.unwrap(), "C2");
    }

    #[tokio::test]
    async fn test_resolve_unknown_run_fails() {
        let store = MemoryGroupStore::new();

        let err = resolve_group_for_run(&store, "Wf404").await.unwrap_err();

        assert!(matches!(err, BuddyError::GroupNotConfigured { run_id } if run_id == "Wf404"));
    }
}
