//! Unified application error type.
//! All modules (db, core, face, export, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{0} already exists")]
    DuplicateKey(String),

    // ---------------------------
    // Capture (user-correctable)
    // ---------------------------
    #[error("Please fill all fields and capture photo (missing: {0})")]
    IncompleteSubmission(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("No face detected in the photo")]
    NoFaceDetected,

    #[error("Face detector error: {0}")]
    Detector(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid ID type: {0}")]
    InvalidIdType(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Report / dispatch errors
    // ---------------------------
    #[error("Report error: {0}")]
    Report(String),

    #[error("Error sending email: {0}")]
    Dispatch(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Map a UNIQUE constraint violation to `DuplicateKey`, anything else to `Storage`.
    pub fn from_insert(err: rusqlite::Error, what: impl Into<String>) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                AppError::DuplicateKey(what.into())
            }
            _ => AppError::Storage(err),
        }
    }
}
