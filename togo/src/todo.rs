//! The `Todo` facade consumed by the CLI.
//!
//! [`Todo`] owns the to-do ledger, the identity ledger, and one
//! [`JsonStore`] for each. Both files are loaded once on open; every mutation
//! writes the affected ledger back to disk before returning.
//!
//! # Example
//!
//! ```no_run
//! use togo::config::Config;
//! use togo::todo::Todo;
//!
//! let config = Config::from_env().unwrap();
//! let mut todo = Todo::open(&config);
//!
//! todo.add("coding 10 minutes").unwrap();
//! todo.done(1);
//! for (index, title) in todo.export() {
//!     println!("{index}. {title}");
//! }
//! ```

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, ValidationError};
use crate::ledger::TodoLedger;
use crate::session::SessionLedger;
use crate::store::JsonStore;
use crate::types::{Identity, IdentityId, TodoId, TodoRecord, TodoStatus};

/// Personal to-do tracker backed by two JSON files.
#[derive(Debug)]
pub struct Todo {
    todos: TodoLedger,
    sessions: SessionLedger,
    todo_store: JsonStore<TodoRecord>,
    session_store: JsonStore<Identity>,
}

impl Todo {
    /// Opens the stores named by `config`, creating missing files.
    #[must_use]
    pub fn open(config: &Config) -> Self {
        Self::with_paths(config.store_path.clone(), config.session_path.clone())
    }

    /// Opens the stores at explicit paths, creating missing files.
    #[must_use]
    pub fn with_paths(store_path: impl Into<PathBuf>, session_path: impl Into<PathBuf>) -> Self {
        let todo_store = JsonStore::new(store_path);
        let session_store = JsonStore::new(session_path);

        let todos = TodoLedger::new(todo_store.load());
        let sessions = SessionLedger::new(session_store.load());

        debug!(
            store = %todo_store.path().display(),
            sessions = %session_store.path().display(),
            todos = todos.records().len(),
            authors = sessions.all().len(),
            "Opened stores"
        );

        Self {
            todos,
            sessions,
            todo_store,
            session_store,
        }
    }

    /// Adds an item under the current author.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyTitle` if `title` is blank.
    pub fn add(&mut self, title: &str) -> Result<TodoId> {
        let context = self.context();
        let id = self.todos.add(context.as_ref(), title)?;
        self.flush_todos();
        Ok(id)
    }

    /// Completes the item at display `index`.
    ///
    /// Returns `None` if no item is shown at `index`; nothing changes then.
    pub fn done(&mut self, index: usize) -> Option<TodoId> {
        let context = self.context();
        let id = self.todos.complete(context.as_ref(), index)?;
        self.flush_todos();
        Some(id)
    }

    /// Soft-deletes the item at display `index`.
    ///
    /// Returns `None` if no item is shown at `index`; nothing changes then.
    pub fn del(&mut self, index: usize) -> Option<TodoId> {
        let context = self.context();
        let id = self.todos.delete(context.as_ref(), index)?;
        self.flush_todos();
        Some(id)
    }

    /// Lists the current author's items; see [`TodoLedger::list`].
    #[must_use]
    pub fn list(&self, all: bool) -> Vec<&TodoRecord> {
        self.todos.list(self.context().as_ref(), all)
    }

    /// Lists the current author's items with their display indices.
    #[must_use]
    pub fn entries(&self, all: bool) -> Vec<(usize, &TodoRecord)> {
        self.todos.entries(self.context().as_ref(), all)
    }

    /// Returns the item shown at `index`, done or not.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&TodoRecord> {
        self.todos.get(self.context().as_ref(), index)
    }

    /// Returns the status of the item shown at `index`.
    #[must_use]
    pub fn item_status(&self, index: usize) -> Option<TodoStatus> {
        self.item(index).map(|record| record.status)
    }

    /// Discards every item of every author.
    pub fn clear(&mut self) {
        self.todos.clear();
        self.flush_todos();
        info!("Cleared todo store");
    }

    /// Logs in as `username`, registering the name on first use.
    ///
    /// The identity ledger is written back even when the login is refused,
    /// since every author has been logged out by then.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::InvalidCredentials` if `username` is registered
    /// with a different password hash.
    pub fn login(&mut self, username: &str, password_hash: &str) -> Result<IdentityId> {
        let result = self.sessions.login(username, password_hash);
        self.flush_sessions();
        let id = result?;
        info!(username, %id, "Logged in");
        Ok(id)
    }

    /// Logs out whoever is logged in.
    pub fn logout(&mut self) {
        self.sessions.logout();
        self.flush_sessions();
    }

    /// Returns every registered author.
    #[must_use]
    pub fn authors(&self) -> &[Identity] {
        self.sessions.all()
    }

    /// Returns the logged-in author, if any.
    #[must_use]
    pub fn current_author(&self) -> Option<&Identity> {
        self.sessions.active()
    }

    /// Returns `(index, title)` for every doing and done item.
    #[must_use]
    pub fn export(&self) -> Vec<(usize, String)> {
        self.entries(true)
            .into_iter()
            .map(|(index, record)| (index, record.title.clone()))
            .collect()
    }

    /// Renders [`export`](Self::export) as `<index>. <title>` lines, the
    /// format [`import`](Self::import) reads back.
    #[must_use]
    pub fn render_export(&self) -> String {
        self.export()
            .into_iter()
            .map(|(index, title)| format!("{index}. {title}\n"))
            .collect()
    }

    /// Adds one item per `<number>. <title>` line in `content`.
    ///
    /// Lines without the numbered prefix, or with a blank title, are skipped.
    /// The store is written once, after every line has been added. Returns the
    /// number of items added.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyImport` if `content` is blank.
    pub fn import(&mut self, content: &str) -> Result<usize> {
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyImport.into());
        }

        let context = self.context();
        let mut added = 0;
        for line in content.lines() {
            match parse_import_line(line) {
                // Parsed titles are never blank, so the ledger accepts them.
                Some(title) => {
                    self.todos.add(context.as_ref(), title)?;
                    added += 1;
                }
                None => debug!(line, "Skipping import line"),
            }
        }

        if added > 0 {
            self.flush_todos();
        }
        info!(added, "Imported todos");
        Ok(added)
    }

    fn context(&self) -> Option<IdentityId> {
        self.sessions.active().map(|identity| identity.id)
    }

    fn flush_todos(&self) {
        self.todo_store.save(self.todos.records());
    }

    fn flush_sessions(&self) {
        self.session_store.save(self.sessions.all());
    }
}

/// Extracts the title from a `<number>. <title>` line.
fn parse_import_line(line: &str) -> Option<&str> {
    let (number, rest) = line.trim_start().split_once('.')?;
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let title = rest.trim();
    (!title.is_empty()).then_some(title)
}
