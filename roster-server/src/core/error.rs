use thiserror::Error;

use crate::AppError;
use crate::db::repository::RepoError;

/// Failures that stop the server from starting or serving
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Startup failed: {0}")]
    Startup(#[from] AppError),

    #[error("Database error: {0}")]
    Database(#[from] RepoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
