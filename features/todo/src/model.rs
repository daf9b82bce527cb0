//! The list model: a store-backed facade over the todo reducer.
//!
//! `TodoListModel` is what a view talks to. It accepts named UI events,
//! exposes one method per list operation, publishes the new state after every
//! action and emits `TodoUpdatedList` when [`TodoListModel::inform`] is called.

use crate::config::Config;
use crate::error::ModelError;
use crate::reducer::{TodoEnvironment, TodoListReducer};
use crate::types::{ListCounts, TodoAction, TodoId, TodoListState, ViewState};
use serde_json::Value;
use std::time::Duration;
use todokit_runtime::{Store, StoreConfig, StoreError};
use tokio::sync::{broadcast, watch};

/// Store type driving a todo list
pub type TodoStore = Store<TodoListState, TodoAction, TodoEnvironment, TodoListReducer>;

/// Emitted actions are processed inside `send`, so this only bounds a lagging
/// receiver.
const INFORM_TIMEOUT: Duration = Duration::from_secs(1);

/// State container for one todo list view
#[derive(Clone)]
pub struct TodoListModel {
    store: TodoStore,
}

impl TodoListModel {
    /// Creates a model over an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(TodoListState::new(), StoreConfig::default())
    }

    /// Creates a model over an existing list
    #[must_use]
    pub fn with_state(state: TodoListState, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(state, TodoListReducer::new(), TodoEnvironment, config),
        }
    }

    /// Creates a model over an empty list using loaded configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_state(TodoListState::new(), config.store)
    }

    /// Handles a named UI event
    ///
    /// # Errors
    ///
    /// [`ModelError::Event`] for unknown names or malformed payloads,
    /// [`ModelError::Store`] if the store rejects the action.
    pub async fn handle_event(&self, name: &str, payload: Value) -> Result<(), ModelError> {
        let action = TodoAction::from_named(name, payload)?;
        self.dispatch(action).await?;
        Ok(())
    }

    /// Sends an action to the underlying store
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn dispatch(&self, action: TodoAction) -> Result<(), StoreError> {
        self.store.send(action).await
    }

    /// Adds a todo; missing or blank text is ignored
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn add_todo(&self, text: Option<&str>) -> Result<(), StoreError> {
        self.dispatch(TodoAction::TodoCreateItem {
            text: text.map(str::to_string),
        })
        .await
    }

    /// Replaces a todo's text
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn update_todo(&self, id: TodoId, text: &str) -> Result<(), StoreError> {
        self.dispatch(TodoAction::TodoUpdateItem {
            id,
            text: text.to_string(),
        })
        .await
    }

    /// Deletes a todo
    ///
    /// `is_completed` is the caller's view of the item; the stored flag decides
    /// how the counters change.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn delete_todo(&self, id: TodoId, is_completed: bool) -> Result<(), StoreError> {
        self.dispatch(TodoAction::TodoDeleteItem { id, is_completed }).await
    }

    /// Sets one todo's completion flag
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn toggle_item(&self, id: TodoId, make_completed: bool) -> Result<(), StoreError> {
        self.dispatch(TodoAction::TodoToggleItem { id, make_completed }).await
    }

    /// Sets every todo's completion flag
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn toggle_all(&self, make_completed: bool) -> Result<(), StoreError> {
        self.dispatch(TodoAction::TodoToggleAll { make_completed }).await
    }

    /// Deletes every completed todo
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn delete_completed(&self) -> Result<(), StoreError> {
        self.dispatch(TodoAction::TodoClearCompleted).await
    }

    /// Emits `TodoUpdatedList` with the current counts and returns them
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn inform(&self) -> Result<ListCounts, StoreError> {
        self.store
            .send_and_wait_for(TodoAction::Inform, TodoAction::updated_counts, INFORM_TIMEOUT)
            .await
    }

    /// Subscribes to emitted notifications (`TodoUpdatedList`)
    #[must_use]
    pub fn subscribe_updates(&self) -> broadcast::Receiver<TodoAction> {
        self.store.subscribe_actions()
    }

    /// Subscribes to the state published after every action
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<TodoListState> {
        self.store.subscribe_state()
    }

    /// Current counts, read without emitting a notification
    pub async fn counts(&self) -> ListCounts {
        self.store.state(TodoListState::counts).await
    }

    /// Current view state (`{ todoItems }`)
    pub async fn view_state(&self) -> ViewState {
        self.store.state(TodoListState::view_state).await
    }

    /// Clone of the full current state
    pub async fn snapshot(&self) -> TodoListState {
        self.store.state(Clone::clone).await
    }
}

impl Default for TodoListModel {
    fn default() -> Self {
        Self::new()
    }
}
