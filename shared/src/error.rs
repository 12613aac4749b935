use thiserror::Error;

/// Why a `colspan` value could not be used as a span.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    #[error("span is empty")]
    Empty,
    #[error("span {0:?} is not a number")]
    NotNumeric(String),
    #[error("span {0} must be at least 1")]
    NotPositive(i64),
}

/// Failure to read a table configuration block.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid table config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config field `{field}` must not be empty")]
    EmptyName { field: &'static str },
}
