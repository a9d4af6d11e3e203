use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    InvalidEmail,
    DuplicateEmail,
    NotFound,
    StorageError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
