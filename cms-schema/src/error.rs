use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown field '{field}' in object schema")]
    UnknownField { field: String },

    #[error("Expected an object schema, got {0}")]
    NotAnObject(&'static str),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Validated data does not match the target type: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
