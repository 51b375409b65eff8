#[cfg(feature = "lambda")]
use crate::adapters::slack::DEFAULT_API_BASE_URL;
#[cfg(feature = "lambda")]
use crate::core::{ConfigProvider, GroupStore, ProfileErrorPolicy};
#[cfg(feature = "lambda")]
use crate::utils::error::{BuddyError, Result};
#[cfg(feature = "lambda")]
use aws_sdk_s3::operation::get_object::GetObjectError;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Clone)]
pub struct LambdaConfig {
    pub bot_token: String,
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub group_store_bucket: String,
    pub group_store_prefix: String,
    pub s3_region: String,
    pub concurrent_requests: usize,
    pub on_profile_error: ProfileErrorPolicy,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| BuddyError::ConfigError {
                message: format!("{} environment variable is required", name),
            })
        };

        Ok(Self {
            bot_token: required("SLACK_BOT_TOKEN")?,
            api_base_url: lookup("SLACK_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            timeout_seconds: parse_or(&lookup, "SLACK_TIMEOUT_SECONDS", 10)?,
            group_store_bucket: required("GROUP_STORE_BUCKET")?,
            group_store_prefix: lookup("GROUP_STORE_PREFIX")
                .unwrap_or_else(|| "buddy-up/groups".to_string()),
            s3_region: lookup("S3_REGION").unwrap_or_else(|| "ap-southeast-2".to_string()),
            concurrent_requests: parse_or(&lookup, "CONCURRENT_REQUESTS", 5)?,
            on_profile_error: parse_or(&lookup, "ON_PROFILE_ERROR", ProfileErrorPolicy::default())?,
        })
    }
}

/// Unset falls back to `default`; a value that does not parse is a config error.
#[cfg(feature = "lambda")]
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|e: T::Err| BuddyError::InvalidConfigValueError {
                field: name.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}

#[cfg(feature = "lambda")]
impl std::fmt::Debug for LambdaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LambdaConfig")
            .field("api_base_url", &self.api_base_url)
            .field("group_store_bucket", &self.group_store_bucket)
            .field("group_store_prefix", &self.group_store_prefix)
            .field("s3_region", &self.s3_region)
            .field("concurrent_requests", &self.concurrent_requests)
            .field("on_profile_error", &self.on_profile_error)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
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
        self.on_profile_error
    }
}

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("SLACK_API_BASE_URL", &self.api_base_url)?;
        validate_non_empty_string("SLACK_BOT_TOKEN", &self.bot_token)?;
        validate_s3_bucket_name("GROUP_STORE_BUCKET", &self.group_store_bucket)?;
        validate_non_empty_string("GROUP_STORE_PREFIX", &self.group_store_prefix)?;
        validate_aws_region("S3_REGION", &self.s3_region)?;
        validate_range("SLACK_TIMEOUT_SECONDS", self.timeout_seconds, 1, 300)?;
        validate_range("CONCURRENT_REQUESTS", self.concurrent_requests, 1, 50)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let invalid = |reason: &str| BuddyError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: bucket_name.to_string(),
        reason: reason.to_string(),
    };

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid("S3 bucket name must be between 3 and 63 characters"));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(invalid("S3 bucket name cannot start or end with a hyphen"));
    }

    Ok(())
}

#[cfg(feature = "lambda")]
fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    crate::utils::validation::validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(BuddyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

/// Group store with one S3 object per workflow id; the object body is the channel id.
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3GroupStore {
    client: S3Client,
    bucket: String,
    prefix: String,
}

#[cfg(feature = "lambda")]
impl S3GroupStore {
    pub fn new(client: S3Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
        }
    }

    fn key(&self, run_id: &str) -> String {
        format!("{}/{}", self.prefix.trim_end_matches('/'), run_id)
    }
}

#[cfg(feature = "lambda")]
impl GroupStore for S3GroupStore {
    async fn get_group(&self, run_id: &str) -> Result<Option<String>> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(self.key(run_id))
            .send()
            .await;

        let resp = match result {
            Ok(resp) => resp,
            Err(err) => {
                return match err.into_service_error() {
                    GetObjectError::NoSuchKey(_) => Ok(None),
                    err => Err(BuddyError::StoreError {
                        message: format!("Failed to read from S3: {}", err),
                    }),
                };
            }
        };

        let data = resp.body.collect().await.map_err(|e| BuddyError::StoreError {
            message: format!("Failed to collect S3 data: {}", e),
        })?;

        let group_id = String::from_utf8(data.into_bytes().to_vec()).map_err(|e| {
            BuddyError::StoreError {
                message: format!("Stored group for {} is not UTF-8: {}", run_id, e),
            }
        })?;

        let group_id = group_id.trim();
        Ok((!group_id.is_empty()).then(|| group_id.to_string()))
    }

    async fn set_group(&self, run_id: &str, group_id: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(self.key(run_id))
            .content_type("text/plain")
            .body(group_id.as_bytes().to_vec().into())
            .send()
            .await
            .map_err(|e| BuddyError::StoreError {
                message: format!("Failed to write to S3: {}", e.into_service_error()),
            })?;

        Ok(())
    }
}

#[cfg(all(test, feature = "lambda"))]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<LambdaConfig> {
        let vars: HashMap<String, String> = [
            ("SLACK_BOT_TOKEN", "xoxb-lambda"),
            ("GROUP_STORE_BUCKET", "buddy-up-groups"),
        ]
        .iter()
        .chain(vars.iter())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        LambdaConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_optional_vars_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.concurrent_requests, 5);
        assert_eq!(config.on_profile_error, ProfileErrorPolicy::Abort);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let err = LambdaConfig::from_lookup(|name| {
            (name == "GROUP_STORE_BUCKET").then(|| "buddy-up-groups".to_string())
        })
        .unwrap_err();

        assert!(matches!(err, BuddyError::ConfigError { .. }));
    }

    #[test]
    fn test_unparseable_numbers_are_rejected() {
        for field in ["SLACK_TIMEOUT_SECONDS", "CONCURRENT_REQUESTS"] {
            let err = config_from(&[(field, "abc")]).unwrap_err();
            match err {
                BuddyError::InvalidConfigValueError { field: f, value, .. } => {
                    assert_eq!(f, field);
                    assert_eq!(value, "abc");
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_profile_policy_is_rejected() {
        let err = config_from(&[("ON_PROFILE_ERROR", "retry")]).unwrap_err();

        assert!(matches!(
            err,
            BuddyError::InvalidConfigValueError { ref field, .. } if field == "ON_PROFILE_ERROR"
        ));
        let config = config_from(&[("ON_PROFILE_ERROR", "skip")]).unwrap();
        assert_eq!(config.on_profile_error, ProfileErrorPolicy::Skip);
    }

    #[test]
    fn test_timeout_out_of_range_fails_validation() {
        for timeout in ["0", "301"] {
            let config = config_from(&[("SLACK_TIMEOUT_SECONDS", timeout)]).unwrap();
            let err = config.validate().unwrap_err();
            assert!(matches!(
                err,
                BuddyError::InvalidConfigValueError { ref field, .. }
                    if field == "SLACK_TIMEOUT_SECONDS"
            ));
        }

        let config = config_from(&[("SLACK_TIMEOUT_SECONDS", "300")]).unwrap();
        assert!(config.validate().is_ok());
    }
}
