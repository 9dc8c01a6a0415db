use std::collections::BTreeSet;
use thiserror::Error;

use crate::utils::validation::Violation;

#[derive(Error, Debug)]
pub enum TestkitError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Invalid argument: {message}")]
    InvalidArgumentError { message: String },

    #[error("Resource not found: {name}")]
    ResourceNotFoundError { name: String },

    #[error("Validation failed with {} violation(s)", .violations.len())]
    ConstraintViolationError { violations: BTreeSet<Violation> },

    #[error("Enum {type_name} declares no variants")]
    EmptyEnumError { type_name: &'static str },
}

pub type Result<T> = std::result::Result<T, TestkitError>;
