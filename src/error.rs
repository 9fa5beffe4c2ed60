use thiserror::Error;

/// Errors raised by the matching core
///
/// Both variants are synchronous input errors; the core never retries or
/// recovers from them on its own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// A player record is missing a field or carries an invalid value
    #[error("Invalid player record '{player_id}': {reason}")]
    InvalidRecord { player_id: String, reason: String },

    /// A ranking argument such as `min_score` or `limit` is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MatchError>;
