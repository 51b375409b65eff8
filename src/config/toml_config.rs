use crate::adapters::slack::DEFAULT_API_BASE_URL;
use crate::core::{ConfigProvider, ProfileErrorPolicy};
use crate::utils::error::{BuddyError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_CONCURRENT_REQUESTS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub slack: SlackConfig,
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub store: Option<StoreConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    pub api_base_url: Option<String>,
    #[serde(skip_serializing)]
    pub bot_token: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    pub concurrent_requests: Option<usize>,
    pub on_profile_error: Option<ProfileErrorPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BuddyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BuddyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SLACK_BOT_TOKEN})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("slack.api_base_url", self.api_base_url())?;

        if env_var_pattern().is_match(&self.slack.bot_token) {
            return Err(BuddyError::MissingConfigError {
                field: format!("slack.bot_token ({})", self.slack.bot_token),
            });
        }
        validate_non_empty_string("slack.bot_token", &self.slack.bot_token)?;

        validate_range("slack.timeout_seconds", self.timeout_seconds(), 1, 300)?;
        validate_range(
            "roster.concurrent_requests",
            self.concurrent_requests(),
            1,
            50,
        )?;

        if let Some(store) = &self.store {
            validate_path("store.path", &store.path)?;
        }

        Ok(())
    }

    pub fn store_path(&self) -> Option<&str> {
        self.store.as_ref().map(|s| s.path.as_str())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        self.slack
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    fn bot_token(&self) -> &str {
        &self.slack.bot_token
    }

    fn timeout_seconds(&self) -> u64 {
        self.slack.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn concurrent_requests(&self) -> usize {
        self.roster
            .concurrent_requests
            .unwrap_or(DEFAULT_CONCURRENT_REQUESTS)
    }

    fn profile_error_policy(&self) -> ProfileErrorPolicy {
        self.roster.on_profile_error.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
