//! Widget errors

use thiserror::Error;

/// Errors surfaced by widget operations
///
/// Numeric misconfiguration is never an error: it is floored or defaulted
/// when options are sanitized.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("item index {index} is out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to parse widget options: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WidgetError>;
