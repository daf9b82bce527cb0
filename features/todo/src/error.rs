//! Error types for the todo feature.

use crate::types::TodoId;
use thiserror::Error;
use todokit_runtime::StoreError;

/// Rejections produced by todo list operations.
///
/// Inside the reducer these never propagate; they are logged and recorded in
/// `TodoListState::last_error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The id does not reference an item in the collection
    #[error("Todo with ID {0} not found")]
    NotFound(TodoId),

    /// The text is empty after trimming
    #[error("Todo text cannot be empty")]
    EmptyText,

    /// Every id has been assigned; the list accepts no new todos
    #[error("No todo ids left to assign")]
    IdsExhausted,

    /// A cached counter no longer matches the collection
    #[error("Counter `{counter}` drifted: cached {cached}, actual {actual}")]
    CounterDrift {
        /// Name of the counter
        counter: &'static str,
        /// Value held in state
        cached: usize,
        /// Value recomputed from the collection
        actual: usize,
    },

    /// The next id to assign is not above every stored id
    #[error("Next id {next} is not above stored id {highest}")]
    StaleNextId {
        /// Next id the list would assign
        next: TodoId,
        /// Highest id in the collection
        highest: TodoId,
    },

    /// A stored key disagrees with its item id
    #[error("Todo stored under key {key} has id {id}")]
    KeyMismatch {
        /// Map key
        key: TodoId,
        /// Item id
        id: TodoId,
    },
}

/// Failures decoding a named UI event.
#[derive(Error, Debug)]
pub enum EventError {
    /// The name is not one of the inbound todo events
    #[error("Unknown todo event: {0}")]
    UnknownEvent(String),

    /// The payload does not match the event's shape
    #[error("Invalid payload for {event}: {source}")]
    InvalidPayload {
        /// Event name
        event: &'static str,
        /// Decoding error
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by [`TodoListModel`](crate::TodoListModel).
#[derive(Error, Debug)]
pub enum ModelError {
    /// The inbound event could not be decoded
    #[error(transparent)]
    Event(#[from] EventError),

    /// The store rejected the action
    #[error(transparent)]
    Store(#[from] StoreError),
}
