use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to parse {path} at offset {index}: {message}")]
    Parse {
        path: String,
        message: String,
        index: usize,
    },

    #[error("Schema has no query root type")]
    MissingQueryType,
}
