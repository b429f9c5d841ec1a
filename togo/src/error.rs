//! Error types for Togo.
//!
//! Store failures are recovered inside the [`store`](crate::store) module and
//! never surface here; everything in this module is something the caller has
//! to act on.

use thiserror::Error;

use crate::session::LoginError;

/// Errors returned by [`Todo`](crate::todo::Todo) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TogoError {
    /// Login was refused.
    #[error("login failed: {0}")]
    Login(#[from] LoginError),

    /// Input was rejected before any state changed.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Input rejected before it reaches the ledgers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// To-do title is empty after trimming.
    #[error("todo title cannot be empty")]
    EmptyTitle,

    /// Import content has nothing but whitespace.
    #[error("import content is empty")]
    EmptyImport,
}

/// A specialized `Result` type for Togo operations.
pub type Result<T> = std::result::Result<T, TogoError>;
