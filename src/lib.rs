pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, RunTarget};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3GroupStore};

pub use adapters::{memory::MemoryGroupStore, slack::SlackClient};
pub use config::{cli::LocalGroupStore, toml_config::TomlConfig};
pub use core::{buddy::BuddyEngine, roster::RosterLoader};
pub use utils::error::{BuddyError, Result};
