//! Domain types for the todo list.
//!
//! [`TodoListState`] owns the collection together with its cached counters.
//! Every mutation goes through one of its operations, which adjust the
//! counters in the same call and re-check the stored completion flag before
//! doing so, so the counters never drift from the collection.

use crate::error::TodoError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use todokit_macros::Action;

/// Identifier of a todo item
///
/// Ids are assigned from a per-list counter and never reused, even after the
/// item is deleted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from its raw value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one, or `None` at `u64::MAX`
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TodoId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Trimmed, non-empty text
    pub text: String,
    /// Whether the todo is completed
    pub is_completed: bool,
}

impl TodoItem {
    /// Creates a new, uncompleted todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            is_completed: false,
        }
    }
}

/// Aggregate counts carried by the `TodoUpdatedList` notification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCounts {
    /// Number of completed items
    pub completed: usize,
    /// Number of items
    pub size: usize,
}

impl ListCounts {
    /// Number of items not yet completed
    #[must_use]
    pub const fn active(self) -> usize {
        self.size.saturating_sub(self.completed)
    }
}

/// State published to the view on every processed action
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// All todos indexed by id
    pub todo_items: BTreeMap<TodoId, TodoItem>,
}

/// State of one todo list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoListState {
    todo_items: BTreeMap<TodoId, TodoItem>,
    size: usize,
    completed_number: usize,
    last_id: TodoId,
    /// Last rejected operation (if any)
    pub last_error: Option<String>,
}

impl TodoListState {
    /// Creates an empty list with zeroed counters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list from an initial collection
    ///
    /// Text is trimmed and items left with empty text are dropped, as are
    /// items at `u64::MAX` since no id could follow them. Counters are derived
    /// from the collection and the next id starts above the highest supplied
    /// id.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
        let mut state = Self::new();
        for mut item in items {
            let text = item.text.trim();
            if text.is_empty() {
                continue;
            }
            let Some(next) = item.id.next() else {
                tracing::warn!(id = %item.id, "Dropping initial todo with the largest possible id");
                continue;
            };
            item.text = text.to_string();
            if next > state.last_id {
                state.last_id = next;
            }
            if item.is_completed {
                state.completed_number += 1;
            }
            state.size += 1;
            if let Some(replaced) = state.todo_items.insert(item.id, item) {
                state.size -= 1;
                if replaced.is_completed {
                    state.completed_number -= 1;
                }
            }
        }
        state
    }

    /// Number of items in the list
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of completed items
    #[must_use]
    pub const fn completed_number(&self) -> usize {
        self.completed_number
    }

    /// The id the next created item will get
    #[must_use]
    pub const fn last_id(&self) -> TodoId {
        self.last_id
    }

    /// Both counters as carried by `TodoUpdatedList`
    #[must_use]
    pub const fn counts(&self) -> ListCounts {
        ListCounts {
            completed: self.completed_number,
            size: self.size,
        }
    }

    /// All items, ordered by id
    #[must_use]
    pub const fn items(&self) -> &BTreeMap<TodoId, TodoItem> {
        &self.todo_items
    }

    /// Returns a todo by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.todo_items.get(&id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.todo_items.contains_key(&id)
    }

    /// Returns true if the list is non-empty and every item is completed
    #[must_use]
    pub const fn all_completed(&self) -> bool {
        self.size > 0 && self.completed_number == self.size
    }

    /// Snapshot of the collection for the view
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        ViewState {
            todo_items: self.todo_items.clone(),
        }
    }

    /// Adds a todo with the trimmed text
    ///
    /// Missing, empty or whitespace-only text is ignored and `Ok(None)`
    /// returned.
    ///
    /// # Errors
    ///
    /// [`TodoError::IdsExhausted`] once the next id would be `u64::MAX`.
    pub fn add_todo(&mut self, text: Option<&str>) -> Result<Option<TodoId>, TodoError> {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let id = self.last_id;
        // `u64::MAX` is never assigned, so an id always has a successor.
        self.last_id = id.next().ok_or(TodoError::IdsExhausted)?;
        self.todo_items.insert(id, TodoItem::new(id, text.to_string()));
        self.size += 1;
        Ok(Some(id))
    }

    /// Replaces the text of an existing todo
    ///
    /// # Errors
    ///
    /// [`TodoError::EmptyText`] if the text trims to nothing,
    /// [`TodoError::NotFound`] if the id is unknown.
    pub fn update_todo(&mut self, id: TodoId, text: &str) -> Result<(), TodoError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoError::EmptyText);
        }
        let item = self.todo_items.get_mut(&id).ok_or(TodoError::NotFound(id))?;
        item.text = text.to_string();
        Ok(())
    }

    /// Removes a todo and returns it
    ///
    /// The completed counter follows the stored flag of the removed item.
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if the id is unknown.
    pub fn delete_todo(&mut self, id: TodoId) -> Result<TodoItem, TodoError> {
        let item = self.todo_items.remove(&id).ok_or(TodoError::NotFound(id))?;
        self.size -= 1;
        if item.is_completed {
            self.completed_number -= 1;
        }
        Ok(item)
    }

    /// Sets the completion flag of one todo
    ///
    /// Returns whether the flag changed. Setting a flag to its current value
    /// leaves the counters alone.
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if the id is unknown.
    pub fn toggle_item(&mut self, id: TodoId, make_completed: bool) -> Result<bool, TodoError> {
        let item = self.todo_items.get_mut(&id).ok_or(TodoError::NotFound(id))?;
        if item.is_completed == make_completed {
            return Ok(false);
        }
        item.is_completed = make_completed;
        if make_completed {
            self.completed_number += 1;
        } else {
            self.completed_number -= 1;
        }
        Ok(true)
    }

    /// Sets the completion flag of every todo
    ///
    /// Returns the number of items whose flag changed.
    pub fn toggle_all(&mut self, make_completed: bool) -> usize {
        let mut changed = 0;
        for item in self.todo_items.values_mut() {
            if item.is_completed != make_completed {
                item.is_completed = make_completed;
                changed += 1;
            }
        }
        self.completed_number = if make_completed { self.size } else { 0 };
        changed
    }

    /// Removes every completed todo
    ///
    /// Returns the number of removed items.
    pub fn delete_completed(&mut self) -> usize {
        let before = self.todo_items.len();
        self.todo_items.retain(|_, item| !item.is_completed);
        let removed = before - self.todo_items.len();
        self.size -= removed;
        self.completed_number -= removed;
        removed
    }

    /// Recomputes the counters from the collection and compares
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn check_invariants(&self) -> Result<(), TodoError> {
        for (key, item) in &self.todo_items {
            if *key != item.id {
                return Err(TodoError::KeyMismatch { key: *key, id: item.id });
            }
        }

        let size = self.todo_items.len();
        if size != self.size {
            return Err(TodoError::CounterDrift {
                counter: "size",
                cached: self.size,
                actual: size,
            });
        }

        let completed = self.todo_items.values().filter(|t| t.is_completed).count();
        if completed != self.completed_number {
            return Err(TodoError::CounterDrift {
                counter: "completed_number",
                cached: self.completed_number,
                actual: completed,
            });
        }

        if let Some(&highest) = self.todo_items.keys().next_back() {
            if highest >= self.last_id {
                return Err(TodoError::StaleNextId {
                    next: self.last_id,
                    highest,
                });
            }
        }

        Ok(())
    }
}

/// Actions for the todo list
///
/// Commands mirror the named UI events (plus `Inform`); the single event is
/// the aggregate notification emitted by `Inform`.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Create a todo from the given text
    #[command]
    TodoCreateItem {
        /// Raw text; `None` or blank text is ignored
        text: Option<String>,
    },

    /// Command: Delete a todo
    #[command]
    #[serde(rename_all = "camelCase")]
    TodoDeleteItem {
        /// Todo to delete
        id: TodoId,
        /// Completion flag as seen by the caller; only compared with the stored one
        is_completed: bool,
    },

    /// Command: Replace a todo's text
    #[command]
    TodoUpdateItem {
        /// Todo to update
        id: TodoId,
        /// New raw text
        text: String,
    },

    /// Command: Set one todo's completion flag
    #[command]
    #[serde(rename_all = "camelCase")]
    TodoToggleItem {
        /// Todo to toggle
        id: TodoId,
        /// Target flag
        make_completed: bool,
    },

    /// Command: Set every todo's completion flag
    #[command]
    #[serde(rename_all = "camelCase")]
    TodoToggleAll {
        /// Target flag
        make_completed: bool,
    },

    /// Command: Delete every completed todo
    #[command]
    TodoClearCompleted,

    /// Command: Emit the current counts as `TodoUpdatedList`
    #[command]
    Inform,

    // ========== Events ==========
    /// Event: Aggregate counts of the list
    #[event]
    TodoUpdatedList {
        /// Number of completed items
        completed: usize,
        /// Number of items
        size: usize,
    },
}

impl TodoAction {
    /// Counts carried by a `TodoUpdatedList` notification
    #[must_use]
    pub const fn updated_counts(&self) -> Option<ListCounts> {
        match self {
            Self::TodoUpdatedList { completed, size } => Some(ListCounts {
                completed: *completed,
                size: *size,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn list(texts: &[&str]) -> TodoListState {
        let mut state = TodoListState::new();
        for text in texts {
            state.add_todo(Some(text)).unwrap();
        }
        state
    }

    #[test]
    fn add_assigns_increasing_ids_and_trims() {
        let mut state = TodoListState::new();
        assert_eq!(state.add_todo(Some("  hello  ")), Ok(Some(TodoId::new(0))));
        assert_eq!(state.add_todo(Some("world")), Ok(Some(TodoId::new(1))));

        assert_eq!(state.get(TodoId::new(0)).unwrap().text, "hello");
        assert_eq!(state.size(), 2);
        assert_eq!(state.last_id(), TodoId::new(2));
        state.check_invariants().unwrap();
    }

    #[test]
    fn add_ignores_missing_and_blank_text() {
        let mut state = TodoListState::new();
        assert_eq!(state.add_todo(None), Ok(None));
        assert_eq!(state.add_todo(Some("")), Ok(None));
        assert_eq!(state.add_todo(Some("   ")), Ok(None));

        assert_eq!(state, TodoListState::new());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut state = list(&["a", "b"]);
        state.delete_todo(TodoId::new(1)).unwrap();
        assert_eq!(state.add_todo(Some("c")), Ok(Some(TodoId::new(2))));
        state.check_invariants().unwrap();
    }

    #[test]
    fn only_the_notification_carries_counts() {
        let update = TodoAction::TodoUpdatedList { completed: 1, size: 3 };
        assert_eq!(update.updated_counts(), Some(ListCounts { completed: 1, size: 3 }));
        assert_eq!(TodoAction::Inform.updated_counts(), None);
    }

    #[test]
    fn next_id_stops_at_max() {
        assert_eq!(TodoId::new(7).next(), Some(TodoId::new(8)));
        assert_eq!(TodoId::new(u64::MAX).next(), None);
    }

    #[test]
    fn with_items_drops_item_at_max_id() {
        let state = TodoListState::with_items([
            TodoItem::new(TodoId::new(u64::MAX), "x".to_string()),
            TodoItem::new(TodoId::new(3), "y".to_string()),
        ]);

        assert!(!state.exists(TodoId::new(u64::MAX)));
        assert_eq!(state.size(), 1);
        assert_eq!(state.last_id(), TodoId::new(4));
        state.check_invariants().unwrap();
    }

    #[test]
    fn add_fails_once_ids_run_out() {
        let mut state =
            TodoListState::with_items([TodoItem::new(TodoId::new(u64::MAX - 1), "x".to_string())]);
        assert_eq!(state.last_id(), TodoId::new(u64::MAX));
        let before = state.clone();

        assert_eq!(state.add_todo(Some("y")), Err(TodoError::IdsExhausted));
        assert_eq!(state, before);
        assert_eq!(state.add_todo(Some("  ")), Ok(None));
        state.check_invariants().unwrap();
    }

    #[test]
    fn toggle_item_is_idempotent() {
        let mut state = list(&["a"]);
        assert!(state.toggle_item(TodoId::new(0), true).unwrap());
        assert!(!state.toggle_item(TodoId::new(0), true).unwrap());
        assert_eq!(state.completed_number(), 1);

        assert!(state.toggle_item(TodoId::new(0), false).unwrap());
        assert!(!state.toggle_item(TodoId::new(0), false).unwrap());
        assert_eq!(state.completed_number(), 0);
    }

    #[test]
    fn delete_uses_stored_completion_flag() {
        let mut state = list(&["a", "b"]);
        state.toggle_item(TodoId::new(0), true).unwrap();

        let removed = state.delete_todo(TodoId::new(0)).unwrap();
        assert!(removed.is_completed);
        assert_eq!(state.counts(), ListCounts { completed: 0, size: 1 });
        state.check_invariants().unwrap();
    }

    #[test]
    fn missing_ids_are_reported() {
        let mut state = list(&["a"]);
        let missing = TodoId::new(9);
        assert_eq!(state.update_todo(missing, "x"), Err(TodoError::NotFound(missing)));
        assert_eq!(state.delete_todo(missing), Err(TodoError::NotFound(missing)));
        assert_eq!(state.toggle_item(missing, true), Err(TodoError::NotFound(missing)));
        assert_eq!(state.size(), 1);
    }

    #[test]
    fn update_rejects_blank_text() {
        let mut state = list(&["a"]);
        assert_eq!(state.update_todo(TodoId::new(0), "  "), Err(TodoError::EmptyText));
        assert_eq!(state.get(TodoId::new(0)).unwrap().text, "a");
    }

    #[test]
    fn toggle_all_and_delete_completed() {
        let mut state = list(&["a", "b", "c"]);
        assert_eq!(state.toggle_all(true), 3);
        assert!(state.all_completed());
        assert_eq!(state.toggle_all(true), 0);

        state.toggle_item(TodoId::new(1), false).unwrap();
        assert_eq!(state.delete_completed(), 2);
        assert_eq!(state.counts(), ListCounts { completed: 0, size: 1 });
        assert!(state.exists(TodoId::new(1)));
        state.check_invariants().unwrap();
    }

    #[test]
    fn with_items_derives_counters() {
        let mut done = TodoItem::new(TodoId::new(4), " done ".to_string());
        done.is_completed = true;
        let state = TodoListState::with_items([
            TodoItem::new(TodoId::new(1), "open".to_string()),
            done,
            TodoItem::new(TodoId::new(7), "   ".to_string()),
        ]);

        assert_eq!(state.counts(), ListCounts { completed: 1, size: 2 });
        assert_eq!(state.last_id(), TodoId::new(5));
        assert_eq!(state.get(TodoId::new(4)).unwrap().text, "done");
        state.check_invariants().unwrap();
    }

    #[test]
    fn view_state_uses_wire_names() {
        let mut state = list(&["Buy milk"]);
        state.toggle_item(TodoId::new(0), true).unwrap();

        let json = serde_json::to_value(state.view_state()).unwrap();
        assert_eq!(json["todoItems"]["0"]["text"], "Buy milk");
        assert_eq!(json["todoItems"]["0"]["isCompleted"], true);
    }

    #[test]
    fn updated_list_serializes_with_event_name() {
        let action = TodoAction::TodoUpdatedList { completed: 1, size: 2 };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["event"], "TodoUpdatedList");
        assert_eq!(json["data"]["completed"], 1);
        assert_eq!(json["data"]["size"], 2);
        assert!(action.is_event());
        assert_eq!(action.name(), "TodoUpdatedList");
    }
}
