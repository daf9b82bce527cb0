//! Reducer logic for the todo list.
//!
//! Every UI command maps to one [`TodoListState`] operation. Rejected
//! commands (unknown id, blank edit) leave the collection untouched and are
//! recorded in `last_error`; successful mutations clear it.

use crate::error::TodoError;
use crate::types::{TodoAction, TodoListState};
use todokit_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Environment dependencies for the todo list reducer
///
/// The list needs no services; ids come from the state's own counter.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoEnvironment;

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoListReducer;

impl TodoListReducer {
    /// Creates a new `TodoListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Records a rejected command
    fn reject(state: &mut TodoListState, command: &'static str, error: &TodoError) {
        tracing::warn!(command, %error, "Rejected todo command");
        state.last_error = Some(error.to_string());
    }
}

impl Reducer for TodoListReducer {
    type State = TodoListState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let command = action.name();
        tracing::trace!(action = command, is_command = action.is_command(), "Reducing todo action");

        match action {
            // ========== Commands ==========
            TodoAction::TodoCreateItem { text } => {
                match state.add_todo(text.as_deref()) {
                    Ok(Some(id)) => {
                        tracing::debug!(%id, "Todo created");
                        state.last_error = None;
                    }
                    Ok(None) => tracing::debug!("Ignoring todo with empty text"),
                    Err(error) => Self::reject(state, command, &error),
                }
            }

            TodoAction::TodoUpdateItem { id, text } => match state.update_todo(id, &text) {
                Ok(()) => {
                    tracing::debug!(%id, "Todo updated");
                    state.last_error = None;
                }
                Err(error) => Self::reject(state, command, &error),
            },

            TodoAction::TodoDeleteItem { id, is_completed } => match state.delete_todo(id) {
                Ok(removed) => {
                    if removed.is_completed != is_completed {
                        tracing::warn!(
                            %id,
                            claimed = is_completed,
                            stored = removed.is_completed,
                            "Delete request disagreed with stored completion flag"
                        );
                    }
                    tracing::debug!(%id, "Todo deleted");
                    state.last_error = None;
                }
                Err(error) => Self::reject(state, command, &error),
            },

            TodoAction::TodoToggleItem { id, make_completed } => {
                match state.toggle_item(id, make_completed) {
                    Ok(changed) => {
                        tracing::debug!(%id, make_completed, changed, "Todo toggled");
                        state.last_error = None;
                    }
                    Err(error) => Self::reject(state, command, &error),
                }
            }

            TodoAction::TodoToggleAll { make_completed } => {
                let changed = state.toggle_all(make_completed);
                tracing::debug!(make_completed, changed, "All todos toggled");
                state.last_error = None;
            }

            TodoAction::TodoClearCompleted => {
                let removed = state.delete_completed();
                tracing::debug!(removed, "Completed todos cleared");
                state.last_error = None;
            }

            TodoAction::Inform => {
                let counts = state.counts();
                return smallvec![Effect::emit(TodoAction::TodoUpdatedList {
                    completed: counts.completed,
                    size: counts.size,
                })];
            }

            // ========== Events ==========
            // Notifications are for subscribers; the list itself does not react.
            TodoAction::TodoUpdatedList { .. } => {}
        }

        SmallVec::new()
    }
}
