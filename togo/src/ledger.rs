//! In-memory to-do ledger.
//!
//! Every operation is scoped to a context: the active identity, or `None` when
//! nobody is logged in. Display indices are never stored. They are the 1-based
//! position of a record among the context's non-deleted records, in insertion
//! order, and shift whenever an earlier record is deleted.

use tracing::debug;

use crate::error::ValidationError;
use crate::types::{IdentityId, TodoId, TodoRecord, TodoStatus};

/// Ordered list of to-do records across all contexts.
#[derive(Debug, Clone, Default)]
pub struct TodoLedger {
    records: Vec<TodoRecord>,
}

impl TodoLedger {
    #[must_use]
    pub fn new(records: Vec<TodoRecord>) -> Self {
        Self { records }
    }

    /// Appends a `doing` record owned by `context`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyTitle` if `title` is blank after trimming.
    pub fn add(
        &mut self,
        context: Option<&IdentityId>,
        title: &str,
    ) -> Result<TodoId, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let record = TodoRecord::new(title, context.copied());
        let id = record.id;
        self.records.push(record);
        debug!(%id, title, "Added todo");
        Ok(id)
    }

    /// Marks the record at `index` as done.
    ///
    /// Returns `None` and changes nothing if `index` does not resolve.
    pub fn complete(&mut self, context: Option<&IdentityId>, index: usize) -> Option<TodoId> {
        let record = self.resolve_mut(context, index)?;
        record.mark_done();
        debug!(id = %record.id, index, "Completed todo");
        Some(record.id)
    }

    /// Soft-deletes the record at `index`.
    ///
    /// Returns `None` and changes nothing if `index` does not resolve.
    pub fn delete(&mut self, context: Option<&IdentityId>, index: usize) -> Option<TodoId> {
        let record = self.resolve_mut(context, index)?;
        record.mark_deleted();
        debug!(id = %record.id, index, "Deleted todo");
        Some(record.id)
    }

    /// Lists the context's records in insertion order.
    ///
    /// Only `doing` records are returned unless `include_completed` is set, in
    /// which case `done` records are included too. Deleted records never are.
    #[must_use]
    pub fn list(
        &self,
        context: Option<&IdentityId>,
        include_completed: bool,
    ) -> Vec<&TodoRecord> {
        self.entries(context, include_completed)
            .into_iter()
            .map(|(_, record)| record)
            .collect()
    }

    /// Like [`list`](Self::list), paired with each record's display index.
    #[must_use]
    pub fn entries(
        &self,
        context: Option<&IdentityId>,
        include_completed: bool,
    ) -> Vec<(usize, &TodoRecord)> {
        self.visible(context)
            .enumerate()
            .map(|(i, record)| (i + 1, record))
            .filter(|(_, record)| include_completed || record.status == TodoStatus::Doing)
            .collect()
    }

    /// Returns the record shown at `index`, if any.
    #[must_use]
    pub fn get(&self, context: Option<&IdentityId>, index: usize) -> Option<&TodoRecord> {
        let position = index.checked_sub(1)?;
        self.visible(context).nth(position)
    }

    /// Removes every record for every context.
    pub fn clear(&mut self) {
        debug!(count = self.records.len(), "Cleared all todos");
        self.records.clear();
    }

    /// All records, including deleted ones and those of other contexts.
    #[must_use]
    pub fn records(&self) -> &[TodoRecord] {
        &self.records
    }

    fn visible(&self, context: Option<&IdentityId>) -> impl Iterator<Item = &TodoRecord> + '_ {
        let context = context.copied();
        self.records
            .iter()
            .filter(move |r| r.is_visible_in(context.as_ref()))
    }

    fn resolve_mut(
        &mut self,
        context: Option<&IdentityId>,
        index: usize,
    ) -> Option<&mut TodoRecord> {
        let position = index.checked_sub(1)?;
        self.records
            .iter_mut()
            .filter(|r| r.is_visible_in(context))
            .nth(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(records: &[&TodoRecord]) -> Vec<String> {
        records.iter().map(|r| r.title.clone()).collect()
    }

    fn ledger_with(titles: &[&str]) -> TodoLedger {
        let mut ledger = TodoLedger::default();
        for title in titles {
            ledger.add(None, title).unwrap();
        }
        ledger
    }

    #[test]
    fn test_add_creates_doing_records() {
        let ledger = ledger_with(&["coding 10 minutes", "go home", "eating"]);

        let listed = ledger.list(None, false);
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().all(|r| r.status == TodoStatus::Doing));
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let mut ledger = TodoLedger::default();

        assert_eq!(ledger.add(None, "   "), Err(ValidationError::EmptyTitle));
        assert_eq!(ledger.add(None, ""), Err(ValidationError::EmptyTitle));
        assert!(ledger.records().is_empty());
    }

    #[test]
    fn test_add_trims_title() {
        let mut ledger = TodoLedger::default();
        ledger.add(None, "  go home \n").unwrap();

        assert_eq!(ledger.records()[0].title, "go home");
    }

    #[test]
    fn test_complete_hides_from_default_list() {
        let mut ledger = ledger_with(&["coding 10 minutes", "go home", "eating"]);

        assert!(ledger.complete(None, 2).is_some());

        assert_eq!(
            titles(&ledger.list(None, false)),
            vec!["coding 10 minutes", "eating"]
        );
        let all = ledger.list(None, true);
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].status, TodoStatus::Done);
    }

    #[test]
    fn test_done_item_keeps_display_index() {
        let mut ledger = ledger_with(&["a", "b", "c"]);
        ledger.complete(None, 2);

        let entries = ledger.entries(None, false);
        let indices: Vec<usize> = entries.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![1, 3]);
        assert_eq!(ledger.get(None, 2).unwrap().status, TodoStatus::Done);
    }

    #[test]
    fn test_delete_excluded_from_all_listings() {
        let mut ledger = ledger_with(&["coding 10 minutes", "go home", "eating", "writing"]);

        ledger.complete(None, 2);
        ledger.delete(None, 3);

        assert_eq!(
            titles(&ledger.list(None, true)),
            vec!["coding 10 minutes", "go home", "writing"]
        );
        assert_eq!(
            titles(&ledger.list(None, false)),
            vec!["coding 10 minutes", "writing"]
        );
        assert_eq!(ledger.records().len(), 4);
    }

    #[test]
    fn test_consecutive_deletes_hit_different_records() {
        let mut ledger = ledger_with(&["first", "second", "third"]);

        let a = ledger.delete(None, 1).unwrap();
        let b = ledger.delete(None, 1).unwrap();

        assert_ne!(a, b);
        assert_eq!(titles(&ledger.list(None, true)), vec!["third"]);
    }

    #[test]
    fn test_listed_indices_resolve_to_listed_records() {
        let alice = IdentityId::new();
        let mut ledger = TodoLedger::default();
        for title in ["a", "b", "c", "d"] {
            ledger.add(Some(&alice), title).unwrap();
        }
        ledger.add(None, "anonymous").unwrap();
        ledger.complete(Some(&alice), 1);
        ledger.delete(Some(&alice), 2);

        let listed: Vec<_> = ledger
            .entries(Some(&alice), true)
            .into_iter()
            .map(|(index, record)| (index, record.id))
            .collect();
        assert_eq!(listed.len(), 3);

        for (index, id) in listed {
            assert_eq!(ledger.get(Some(&alice), index).map(|r| r.id), Some(id));
            assert_eq!(ledger.complete(Some(&alice), index), Some(id));
        }
    }

    #[test]
    fn test_unresolved_index_is_noop() {
        let mut ledger = ledger_with(&["only"]);

        assert!(ledger.complete(None, 0).is_none());
        assert!(ledger.complete(None, 2).is_none());
        assert!(ledger.delete(None, 5).is_none());
        assert_eq!(ledger.list(None, false).len(), 1);
    }

    #[test]
    fn test_indices_are_context_scoped() {
        let alice = IdentityId::new();
        let mut ledger = TodoLedger::default();

        ledger.add(None, "anonymous").unwrap();
        ledger.add(Some(&alice), "alice's").unwrap();

        assert_eq!(ledger.get(None, 1).unwrap().title, "anonymous");
        assert_eq!(ledger.get(Some(&alice), 1).unwrap().title, "alice's");
        assert!(ledger.get(None, 2).is_none());

        ledger.complete(Some(&alice), 1);
        assert_eq!(ledger.get(None, 1).unwrap().status, TodoStatus::Doing);
    }

    #[test]
    fn test_clear_removes_every_context() {
        let alice = IdentityId::new();
        let mut ledger = TodoLedger::default();
        ledger.add(None, "anonymous").unwrap();
        ledger.add(Some(&alice), "alice's").unwrap();

        ledger.clear();

        assert!(ledger.records().is_empty());
    }
}
