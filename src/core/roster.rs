use crate::core::{ConfigProvider, MemberDirectory, Participant, ProfileErrorPolicy, Roster};
use crate::utils::error::{BuddyError, Result};
use futures::stream::{self, StreamExt};

pub struct RosterLoader<D: MemberDirectory> {
    directory: D,
    concurrent_requests: usize,
    policy: ProfileErrorPolicy,
}

impl<D: MemberDirectory> RosterLoader<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            concurrent_requests: 1,
            policy: ProfileErrorPolicy::Abort,
        }
    }

    pub fn from_config<C: ConfigProvider>(directory: D, config: &C) -> Self {
        Self::new(directory)
            .with_concurrency(config.concurrent_requests())
            .with_policy(config.profile_error_policy())
    }

    pub fn with_concurrency(mut self, concurrent_requests: usize) -> Self {
        self.concurrent_requests = concurrent_requests.max(1);
        self
    }

    pub fn with_policy(mut self, policy: ProfileErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Enumerates the group and resolves every member, dropping bots.
    /// The roster keeps enumeration order no matter which lookup finishes first.
    pub async fn load(&self, group_id: &str) -> Result<Roster> {
        let member_ids = self
            .directory
            .list_members(group_id)
            .await
            .map_err(|e| BuddyError::roster_unavailable(group_id, e))?;

        tracing::debug!(
            "Resolving {} member profiles for {} ({} at a time)",
            member_ids.len(),
            group_id,
            self.concurrent_requests
        );

        // buffered() 依輸入順序回傳結果；Abort 時遇到第一個失敗就停止送出查詢
        let mut lookups = std::pin::pin!(stream::iter(member_ids)
            .map(|member_id| async move {
                let profile = self.directory.fetch_profile(&member_id).await;
                (member_id, profile)
            })
            .buffered(self.concurrent_requests));

        let mut participants = Vec::new();
        let mut bots = 0usize;

        while let Some((member_id, lookup)) = lookups.next().await {
            let profile = match lookup {
                Ok(profile) => profile,
                Err(e) => match self.policy {
                    ProfileErrorPolicy::Abort => {
                        return Err(BuddyError::roster_unavailable(
                            group_id,
                            format!("profile lookup for {} failed: {}", member_id, e),
                        ));
                    }
                    ProfileErrorPolicy::Skip => {
                        tracing::warn!("Skipping member {}: {}", member_id, e);
                        continue;
                    }
                },
            };

            if profile.is_bot {
                bots += 1;
                continue;
            }
            participants.push(Participant::from(profile));
        }

        tracing::info!(
            "{} user profiles found in {} ({} bots excluded)",
            participants.len(),
            group_id,
            bots
        );

        Ok(Roster::new(participants))
    }
}
