//! Budget item store
//!
//! Owns the ordered sequence of budget items and mediates every mutation
//! against the remote budget service. Items are addressed by their stable
//! local key; the displayed list (filtered or not) and the backing sequence
//! can never disagree about which item an operation targets.
//!
//! A freshly added item is appended optimistically and sits in a pending
//! state (`remote_id: None`) around the create call; the call's outcome
//! either confirms it with the service-assigned identity or rolls the
//! append back, so a failed create leaves the sequence unchanged.
//!
//! Every remote failure is recorded in the journal and returned to the
//! caller; the sequence is never left half-mutated.

use crate::api::BudgetService;
use crate::error::{BudgetError, BudgetResult};
use crate::journal::{Journal, Operation};
use crate::models::{BudgetItem, BudgetItemId, NewBudgetItem};

/// In-memory store of budget items, synchronized with the remote service
#[derive(Debug, Default)]
pub struct BudgetItemStore {
    /// Insertion order is display order
    items: Vec<BudgetItem>,
}

impl BudgetItemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// All items in insertion order
    pub fn items(&self) -> &[BudgetItem] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by key
    pub fn get(&self, key: BudgetItemId) -> Option<&BudgetItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Fetch the full item list from the service, replacing local state
    /// wholesale. On failure the list is left empty; the error is journaled
    /// and returned. No retry.
    pub fn load(&mut self, service: &impl BudgetService, journal: &Journal) -> BudgetResult<()> {
        match service.fetch_items() {
            Ok(items) => {
                self.items = items;
                journal.record_success(Operation::Load, Some(format!("{} items", self.len())));
                Ok(())
            }
            Err(err) => {
                self.items.clear();
                journal.record_failure(Operation::Load, None, &err);
                Err(err)
            }
        }
    }

    /// Add a new item built from `candidate`.
    ///
    /// The item is appended in a pending state, then posted. Success records
    /// the identity the service assigned (when the response carries one);
    /// failure rolls the append back so the sequence is exactly as before.
    pub fn add(
        &mut self,
        service: &impl BudgetService,
        journal: &Journal,
        candidate: NewBudgetItem,
    ) -> BudgetResult<BudgetItemId> {
        candidate
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let item = BudgetItem::from_candidate(candidate.clone());
        let key = item.key;
        let creation_date = item.creation_date;
        self.items.push(item);

        match service.create_item(&candidate, creation_date) {
            Ok(remote_id) => {
                if let Some(id) = remote_id {
                    if let Some(item) = self.items.iter_mut().find(|i| i.key == key) {
                        item.confirm(id);
                    }
                }
                journal.record_success(Operation::Create, Some(key.to_string()));
                Ok(key)
            }
            Err(err) => {
                self.items.retain(|i| i.key != key);
                journal.record_failure(Operation::Create, Some(key.to_string()), &err);
                Err(err)
            }
        }
    }

    /// Delete the item with the given key.
    ///
    /// Confirmed items are removed locally only after the remote delete
    /// succeeds. An item the service never confirmed has no identity to
    /// address, so it is dropped without a remote call.
    pub fn delete(
        &mut self,
        service: &impl BudgetService,
        journal: &Journal,
        key: BudgetItemId,
    ) -> BudgetResult<()> {
        let item = self
            .get(key)
            .ok_or_else(|| BudgetError::item_not_found(key.to_string()))?;

        if let Some(remote_id) = item.remote_id.clone() {
            if let Err(err) = service.delete_item(&remote_id) {
                journal.record_failure(Operation::Delete, Some(remote_id), &err);
                return Err(err);
            }
        }

        self.items.retain(|i| i.key != key);
        journal.record_success(Operation::Delete, Some(key.to_string()));
        Ok(())
    }

    /// Toggle the favorite flag of the item with the given key; returns the
    /// new value.
    ///
    /// The service owns the flip for confirmed items: the local flag only
    /// changes after the remote call succeeds. Unconfirmed items flip
    /// locally.
    pub fn toggle_favorite(
        &mut self,
        service: &impl BudgetService,
        journal: &Journal,
        key: BudgetItemId,
    ) -> BudgetResult<bool> {
        let pos = self
            .items
            .iter()
            .position(|i| i.key == key)
            .ok_or_else(|| BudgetError::item_not_found(key.to_string()))?;

        if let Some(remote_id) = self.items[pos].remote_id.clone() {
            if let Err(err) = service.toggle_favorite(&remote_id) {
                journal.record_failure(Operation::Favorite, Some(remote_id), &err);
                return Err(err);
            }
        }

        let item = &mut self.items[pos];
        item.toggle_favorite();
        journal.record_success(Operation::Favorite, Some(key.to_string()));
        Ok(item.favorite)
    }

    /// Lazy view over the items: the whole sequence, or only the favorites,
    /// in insertion order. Restart by calling again.
    pub fn filtered_view(&self, favorites_only: bool) -> impl Iterator<Item = &BudgetItem> {
        self.items
            .iter()
            .filter(move |item| !favorites_only || item.favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, PaymentType};
    use chrono::Local;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Mock service that records every call and can be told to fail
    #[derive(Default)]
    struct MockBudgetService {
        fetch_result: RefCell<Option<BudgetResult<Vec<BudgetItem>>>>,
        fail_mutations: bool,
        assigned_id: Option<String>,
        calls: RefCell<Vec<String>>,
    }

    impl MockBudgetService {
        fn new() -> Self {
            Self {
                assigned_id: Some("remote-1".into()),
                ..Self::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail_mutations: true,
                ..Self::new()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl BudgetService for MockBudgetService {
        fn fetch_items(&self) -> BudgetResult<Vec<BudgetItem>> {
            self.calls.borrow_mut().push("fetch".into());
            match self.fetch_result.borrow_mut().take() {
                Some(result) => result,
                None => Ok(Vec::new()),
            }
        }

        fn create_item(
            &self,
            _candidate: &NewBudgetItem,
            _creation_date: chrono::NaiveDate,
        ) -> BudgetResult<Option<String>> {
            self.calls.borrow_mut().push("create".into());
            if self.fail_mutations {
                return Err(BudgetError::rejected(500));
            }
            Ok(self.assigned_id.clone())
        }

        fn delete_item(&self, remote_id: &str) -> BudgetResult<()> {
            self.calls.borrow_mut().push(format!("delete {}", remote_id));
            if self.fail_mutations {
                return Err(BudgetError::Http("connection refused".into()));
            }
            Ok(())
        }

        fn toggle_favorite(&self, remote_id: &str) -> BudgetResult<()> {
            self.calls
                .borrow_mut()
                .push(format!("favorite {}", remote_id));
            if self.fail_mutations {
                return Err(BudgetError::Http("connection refused".into()));
            }
            Ok(())
        }
    }

    fn test_journal() -> (Journal, TempDir) {
        let temp = TempDir::new().unwrap();
        (Journal::new(temp.path().join("journal.log")), temp)
    }

    fn groceries() -> NewBudgetItem {
        NewBudgetItem::new(Category::Expense, "Groceries", PaymentType::Card, 42.0)
    }

    fn rental() -> NewBudgetItem {
        NewBudgetItem::new(Category::Income, "Rental Income", PaymentType::Cash, 900.0)
    }

    #[test]
    fn test_add_appends_as_last_element() {
        let service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        store.add(&service, &journal, rental()).unwrap();
        let key = store.add(&service, &journal, groceries()).unwrap();

        let all: Vec<_> = store.filtered_view(false).collect();
        assert_eq!(all.len(), 2);

        let last = all.last().unwrap();
        assert_eq!(last.key, key);
        assert!(!last.favorite);
        assert_eq!(last.creation_date, Local::now().date_naive());
    }

    #[test]
    fn test_add_confirms_with_remote_identity() {
        let service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let key = store.add(&service, &journal, groceries()).unwrap();
        assert_eq!(store.get(key).unwrap().remote_id.as_deref(), Some("remote-1"));
    }

    #[test]
    fn test_failed_add_leaves_list_unchanged() {
        let service = MockBudgetService::failing();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let result = store.add(&service, &journal, groceries());
        assert!(result.is_err());
        assert!(store.is_empty());

        // The failure is journaled, not silently dropped
        let entries = journal.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
    }

    #[test]
    fn test_invalid_candidate_never_reaches_service() {
        let service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let crossed = NewBudgetItem::new(Category::Income, "Groceries", PaymentType::Cash, 1.0);
        let result = store.add(&service, &journal, crossed);

        assert!(matches!(result, Err(BudgetError::Validation(_))));
        assert!(service.calls().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_addresses_by_remote_identity() {
        let service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let key = store.add(&service, &journal, groceries()).unwrap();
        store.delete(&service, &journal, key).unwrap();

        assert!(store.is_empty());
        assert!(service.calls().contains(&"delete remote-1".to_string()));
    }

    #[test]
    fn test_failed_delete_keeps_item() {
        let ok_service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let key = store.add(&ok_service, &journal, groceries()).unwrap();

        let failing = MockBudgetService::failing();
        let result = store.delete(&failing, &journal, key);

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_unconfirmed_item_is_local_only() {
        let service = MockBudgetService {
            assigned_id: None,
            ..MockBudgetService::new()
        };
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let key = store.add(&service, &journal, groceries()).unwrap();
        assert!(!store.get(key).unwrap().is_confirmed());

        store.delete(&service, &journal, key).unwrap();
        assert!(store.is_empty());

        // Only the create touched the wire
        assert_eq!(service.calls(), vec!["create".to_string()]);
    }

    #[test]
    fn test_delete_unknown_key() {
        let service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let result = store.delete(&service, &journal, BudgetItemId::new());
        assert!(matches!(result, Err(e) if e.is_not_found()));
    }

    #[test]
    fn test_toggle_favorite_round_trip() {
        let service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let key = store.add(&service, &journal, groceries()).unwrap();

        assert!(store.toggle_favorite(&service, &journal, key).unwrap());
        assert!(store.get(key).unwrap().favorite);

        assert!(!store.toggle_favorite(&service, &journal, key).unwrap());
        assert!(!store.get(key).unwrap().favorite);
    }

    #[test]
    fn test_failed_toggle_leaves_flag_unchanged() {
        let ok_service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let key = store.add(&ok_service, &journal, groceries()).unwrap();

        let failing = MockBudgetService::failing();
        assert!(store.toggle_favorite(&failing, &journal, key).is_err());
        assert!(!store.get(key).unwrap().favorite);
    }

    #[test]
    fn test_filtered_view_preserves_insertion_order() {
        let service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let k1 = store.add(&service, &journal, rental()).unwrap();
        let _k2 = store.add(&service, &journal, groceries()).unwrap();
        let k3 = store
            .add(
                &service,
                &journal,
                NewBudgetItem::new(Category::Expense, "Utilities", PaymentType::Cash, 30.0),
            )
            .unwrap();

        // No favorites yet
        assert_eq!(store.filtered_view(true).count(), 0);

        store.toggle_favorite(&service, &journal, k3).unwrap();
        store.toggle_favorite(&service, &journal, k1).unwrap();

        let favorites: Vec<_> = store.filtered_view(true).map(|i| i.key).collect();
        assert_eq!(favorites, vec![k1, k3]);

        // The unfiltered view is the full sequence
        assert_eq!(store.filtered_view(false).count(), 3);
    }

    #[test]
    fn test_delete_from_filtered_view_targets_right_item() {
        let service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        let first = store.add(&service, &journal, rental()).unwrap();
        let second = store.add(&service, &journal, groceries()).unwrap();

        // Favorite only the second item; in the filtered view it sits at
        // position 0, which used to be the first item's position.
        store.toggle_favorite(&service, &journal, second).unwrap();

        let displayed: Vec<_> = store.filtered_view(true).map(|i| i.key).collect();
        assert_eq!(displayed, vec![second]);

        store.delete(&service, &journal, displayed[0]).unwrap();

        // The favorited item is gone; the first item is untouched
        assert_eq!(store.len(), 1);
        assert!(store.get(first).is_some());
        assert!(store.get(second).is_none());
    }

    #[test]
    fn test_load_replaces_state_wholesale() {
        let service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        store.add(&service, &journal, groceries()).unwrap();

        let replacement = vec![BudgetItem::from_candidate(rental())];
        *service.fetch_result.borrow_mut() = Some(Ok(replacement));

        store.load(&service, &journal).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].subcategory, "Rental Income");
    }

    #[test]
    fn test_load_failure_leaves_list_empty_and_journals() {
        let service = MockBudgetService::new();
        let (journal, _temp) = test_journal();
        let mut store = BudgetItemStore::new();

        store.add(&service, &journal, groceries()).unwrap();

        *service.fetch_result.borrow_mut() =
            Some(Err(BudgetError::Http("connection refused".into())));

        assert!(store.load(&service, &journal).is_err());
        assert!(store.is_empty());

        let entries = journal.read_all().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.operation, Operation::Load);
        assert_eq!(last.outcome, crate::journal::Outcome::Failure);
    }
}
