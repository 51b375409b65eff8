use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuddyError {
    #[error("Roster unavailable for group {group_id}: {reason}")]
    RosterUnavailable { group_id: String, reason: String },

    #[error("Failed to deliver report to group {group_id}: {reason}")]
    DeliveryError { group_id: String, reason: String },

    #[error("No group configured for run: {run_id}")]
    GroupNotConfigured { run_id: String },

    #[error("Slack API method {method} returned error: {error}")]
    SlackApiError { method: String, error: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Group store error: {message}")]
    StoreError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Roster,
    Delivery,
    Network,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BuddyError {
    pub fn roster_unavailable(group_id: &str, reason: impl ToString) -> Self {
        Self::RosterUnavailable {
            group_id: group_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn delivery(group_id: &str, reason: impl ToString) -> Self {
        Self::DeliveryError {
            group_id: group_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RosterUnavailable { .. } => ErrorCategory::Roster,
            Self::DeliveryError { .. } => ErrorCategory::Delivery,
            Self::SlackApiError { .. } | Self::ApiError(_) => ErrorCategory::Network,
            Self::GroupNotConfigured { .. }
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) | Self::StoreError { .. } => {
                ErrorCategory::Storage
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Roster | ErrorCategory::Delivery | ErrorCategory::Network => {
                ErrorSeverity::Medium
            }
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::RosterUnavailable { .. } => {
                "Check that the bot is a member of the channel and has users:read scope"
            }
            Self::DeliveryError { .. } => "Check that the bot can post to the channel (chat:write)",
            Self::GroupNotConfigured { .. } => {
                "Pick a channel for this workflow first (--workflow-id with --channel --remember)"
            }
            Self::SlackApiError { .. } | Self::ApiError(_) => {
                "Check the bot token and Slack API base URL, then run again"
            }
            Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. }
            | Self::ConfigError { .. } => "Fix the configuration value and run again",
            Self::IoError(_) | Self::SerializationError(_) | Self::StoreError { .. } => {
                "Check the group store location is readable and writable"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::RosterUnavailable { group_id, .. } => {
                format!("Could not read the members of {}", group_id)
            }
            Self::DeliveryError { group_id, .. } => {
                format!("Pairs were computed but could not be posted to {}", group_id)
            }
            Self::GroupNotConfigured { run_id } => {
                format!("No channel has been selected for workflow {}", run_id)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuddyError>;
