use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CategoryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown category {0}")]
    UnknownCategory(CategoryId),
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

impl EngineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::UnknownCategory(_) => ErrorCode::NotFound,
            EngineError::InvalidGrid(_) => ErrorCode::Validation,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(value: EngineError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
