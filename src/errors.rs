//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError so that the command
//! dispatcher has a single place where failures are classified and shown.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Invalid date: '{0}' (expected dd-MM-yy)")]
    InvalidDate(String),

    #[error("Invalid {field}: {value} ({reason})")]
    InvalidQuantity {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid record id: {0} (must be a positive number)")]
    InvalidId(i64),

    #[error("{0}")]
    Validation(String),

    // ---------------------------
    // Not found
    // ---------------------------
    #[error("Record #{id} not found in {table}")]
    RecordNotFound { table: &'static str, id: i64 },

    #[error("No records found in {0}")]
    NoData(&'static str),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Unable to create database schema: {0}")]
    Schema(String),

    // ---------------------------
    // Config
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

/// Coarse classification used by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    Unexpected,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidDate(_)
            | AppError::InvalidQuantity { .. }
            | AppError::InvalidId(_)
            | AppError::Validation(_) => ErrorKind::Validation,
            AppError::RecordNotFound { .. } | AppError::NoData(_) => ErrorKind::NotFound,
            AppError::Io(_) | AppError::Db(_) | AppError::Schema(_) => ErrorKind::Storage,
            AppError::Config(_) | AppError::ConfigLoad(_) | AppError::Other(_) => {
                ErrorKind::Unexpected
            }
        }
    }

    /// Only a broken schema stops the whole session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Schema(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
