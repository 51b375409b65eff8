pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::slack::DEFAULT_API_BASE_URL;
#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, ProfileErrorPolicy};
#[cfg(feature = "cli")]
use crate::utils::error::{BuddyError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Clone, Serialize, Deserialize, Parser)]
#[command(name = "buddy-up")]
#[command(about = "Pair up channel members for 1-1s, ordered by timezone")]
pub struct CliConfig {
    #[arg(long, help = "Channel whose members should be paired")]
    pub channel: Option<String>,

    #[arg(long, help = "Workflow id whose saved channel should be paired")]
    pub workflow_id: Option<String>,

    #[arg(long, help = "Save --channel for --workflow-id instead of pairing")]
    pub remember: bool,

    #[arg(long, help = "Print the report instead of posting it")]
    pub dry_run: bool,

    #[arg(long, help = "TOML file with Slack and roster settings")]
    pub config: Option<String>,

    #[serde(skip_serializing, default)]
    #[arg(long, env = "SLACK_BOT_TOKEN", default_value = "", hide_env_values = true)]
    pub bot_token: String,

    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, default_value = "./buddy-groups.json")]
    pub store_path: String,

    #[arg(long, default_value = "5")]
    pub concurrent_requests: usize,

    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Leave out members whose profile cannot be fetched")]
    pub skip_unresolved_profiles: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("channel", &self.channel)
            .field("workflow_id", &self.workflow_id)
            .field("remember", &self.remember)
            .field("dry_run", &self.dry_run)
            .field("config", &self.config)
            .field("api_base_url", &self.api_base_url)
            .field("store_path", &self.store_path)
            .field("concurrent_requests", &self.concurrent_requests)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("skip_unresolved_profiles", &self.skip_unresolved_profiles)
            .finish_non_exhaustive()
    }
}

/// What a CLI invocation asks for.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    Channel(String),
    Workflow { run_id: String },
    Remember { run_id: String, channel: String },
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn target(&self) -> Result<RunTarget> {
        match (&self.channel, &self.workflow_id, self.remember) {
            (Some(channel), Some(run_id), true) => Ok(RunTarget::Remember {
                run_id: run_id.clone(),
                channel: channel.clone(),
            }),
            (_, _, true) => Err(BuddyError::ConfigValidationError {
                field: "remember".to_string(),
                message: "--remember needs both --channel and --workflow-id".to_string(),
            }),
            (Some(channel), None, false) => Ok(RunTarget::Channel(channel.clone())),
            (None, Some(run_id), false) => Ok(RunTarget::Workflow {
                run_id: run_id.clone(),
            }),
            (Some(_), Some(_), false) => Err(BuddyError::ConfigValidationError {
                field: "channel".to_string(),
                message: "pass --remember to save the channel for the workflow".to_string(),
            }),
            (None, None, false) => Err(BuddyError::MissingConfigError {
                field: "channel or workflow_id".to_string(),
            }),
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn bot_token(&self) -> &str {
        &self.bot_token
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn profile_error_policy(&self) -> ProfileErrorPolicy {
        if self.skip_unresolved_profiles {
            ProfileErrorPolicy::Skip
        } else {
            ProfileErrorPolicy::Abort
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let target = self.target()?;
        if let RunTarget::Channel(channel) | RunTarget::Remember { channel, .. } = &target {
            validation::validate_slack_id("channel", channel)?;
        }

        // --remember 不呼叫 Slack；--config 提供的設定會另外驗證
        let calls_slack = !matches!(target, RunTarget::Remember { .. });
        if calls_slack && self.config.is_none() {
            validation::validate_non_empty_string("bot_token", &self.bot_token)?;
            validation::validate_url("api_base_url", &self.api_base_url)?;
            validation::validate_range("concurrent_requests", self.concurrent_requests, 1, 50)?;
            validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        }
        validation::validate_path("store_path", &self.store_path)?;

        Ok(())
    }
}
