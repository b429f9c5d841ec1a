//! Togo - a personal command-line to-do tracker.
//!
//! Items are recorded with a title, status, and timestamps, optionally owned
//! by a logged-in author, and persisted as flat JSON documents in the user's
//! home directory.
//!
//! # Overview
//!
//! Two JSON files back the tracker: a to-do store (`~/.togo.store`) and an
//! identity ledger (`~/.togo.config`). The [`Todo`] facade loads both once and
//! writes each back after every change to it. All item operations are scoped
//! to the logged-in author, or to "nobody" when logged out.
//!
//! # Modules
//!
//! - [`types`]: Record types shared by both stores
//! - [`store`]: Forgiving JSON file persistence
//! - [`session`]: Identity ledger with a single active session
//! - [`ledger`]: To-do ledger and display index resolution
//! - [`todo`]: Facade exposing the CLI operation set
//! - [`credentials`]: Password hashing for the login command
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Error types for Togo operations

pub mod config;
pub mod credentials;
pub mod error;
pub mod ledger;
pub mod session;
pub mod store;
pub mod todo;
pub mod types;

pub use config::{Config, ConfigError};
pub use error::{Result, TogoError, ValidationError};
pub use ledger::TodoLedger;
pub use session::{LoginError, SessionLedger};
pub use store::{JsonStore, StoreError};
pub use todo::Todo;
pub use types::{Identity, IdentityId, TodoId, TodoRecord, TodoStatus};
