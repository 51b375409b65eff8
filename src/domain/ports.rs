use crate::domain::model::{MemberProfile, ProfileErrorPolicy};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Run id -> group id mapping used by the workflow trigger. Last write wins.
pub trait GroupStore: Send + Sync {
    fn get_group(
        &self,
        run_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_group(
        &self,
        run_id: &str,
        group_id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn bot_token(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn concurrent_requests(&self) -> usize;
    fn profile_error_policy(&self) -> ProfileErrorPolicy;
}

#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn list_members(&self, group_id: &str) -> Result<Vec<String>>;
    async fn fetch_profile(&self, member_id: &str) -> Result<MemberProfile>;
}

#[async_trait]
pub trait ReportSender: Send + Sync {
    async fn send(&self, group_id: &str, text: &str) -> Result<()>;
}
