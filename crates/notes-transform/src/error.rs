use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid token pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
