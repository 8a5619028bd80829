use thiserror::Error;

/// Construction-time failures. No transport is produced when one occurs.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("You have to define Neo4j {0}: endpoint, username and password are required")]
    MissingField(&'static str),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("No Tokio runtime available to drive writes")]
    NoRuntime,
}
