use thiserror::Error;

/// Error type for splitter configuration and rating store construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("empty data set: {0}")]
    EmptyDataSet(String),
}
