//! Error taxonomy for the bootstrap run
//!
//! Three conditions matter to callers: the entity already exists, the
//! administrative connection lacks privilege, or the server is
//! unreachable. Everything else is surfaced with the driver's message.

use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server code for "User ... already exists" from createUser
const USER_ALREADY_EXISTS: i32 = 51003;
/// Server code NamespaceExists from createCollection
const NAMESPACE_EXISTS: i32 = 48;
/// Server code for a duplicate key write
const DUPLICATE_KEY: i32 = 11000;
/// Server code Unauthorized
const UNAUTHORIZED: i32 = 13;
/// Server code AuthenticationFailed
const AUTHENTICATION_FAILED: i32 = 18;

/// Bootstrap errors
#[derive(Debug, Clone, Error)]
pub enum BootstrapError {
    #[error("Entity already exists: {0}")]
    Duplicate(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Database unreachable: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Map a driver error onto the bootstrap taxonomy.
pub fn classify(err: mongodb::error::Error) -> BootstrapError {
    match *err.kind {
        ErrorKind::Command(ref cmd) => classify_code(cmd.code, &cmd.message),
        ErrorKind::Write(WriteFailure::WriteError(ref write)) => {
            classify_code(write.code, &write.message)
        }
        ErrorKind::Authentication { ref message, .. } => {
            BootstrapError::PermissionDenied(message.clone())
        }
        ErrorKind::ServerSelection { ref message, .. } => {
            BootstrapError::Connection(message.clone())
        }
        ErrorKind::Io(ref io) => BootstrapError::Connection(io.to_string()),
        _ => BootstrapError::Database(err.to_string()),
    }
}

/// Classification by server error code, shared by the command and write paths.
fn classify_code(code: i32, message: &str) -> BootstrapError {
    match code {
        USER_ALREADY_EXISTS | NAMESPACE_EXISTS | DUPLICATE_KEY => {
            BootstrapError::Duplicate(message.to_string())
        }
        UNAUTHORIZED | AUTHENTICATION_FAILED => {
            BootstrapError::PermissionDenied(message.to_string())
        }
        _ => BootstrapError::Database(message.to_string()),
    }
}
