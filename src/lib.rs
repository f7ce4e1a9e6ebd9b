// Public modules
pub mod types;
pub mod error;
pub mod config;
pub mod report;
pub mod classifier;
pub mod discord;
pub mod notifier;
pub mod kubernetes;
pub mod monitor;

// Re-export commonly used items
pub use types::*;
pub use error::{ConfigError, FetchError, NotifyError};
pub use config::{load_config, load_config_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use report::Report;
pub use classifier::classify_pods;
pub use discord::{build_discord_payload, send_to_discord, MAX_CONTENT_LENGTH};
pub use notifier::{DispatchOutcome, Notifier};
pub use kubernetes::{create_client, list_all_pods};
pub use monitor::Monitor;
