//! Application-wide error types using thiserror.

use parlance_config::ConfigError;
use parlance_i18n::I18nError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Localization error.
    #[error("Localization error: {0}")]
    I18n(#[from] I18nError),
}

/// Result type for the command-line host.
pub type CliResult<T> = Result<T, CliError>;
