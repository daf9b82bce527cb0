//! Named UI events and their payloads.
//!
//! The UI dispatches events by name with a JSON payload. [`TodoEvent`] is the
//! closed set of names the list model listens to, and
//! [`TodoAction::from_named`] turns a name plus payload into a typed action.
//! Unknown names and malformed payloads are rejected here and never reach the
//! reducer.
//!
//! | event | payload |
//! |-------|---------|
//! | `TodoCreateItem` | `{ "text": string \| null }` |
//! | `TodoDeleteItem` | `{ "id": integer, "isCompleted": boolean }` |
//! | `TodoUpdateItem` | `{ "id": integer, "text": string }` |
//! | `TodoToggleItem` | `{ "id": integer, "makeCompleted": boolean }` |
//! | `TodoToggleAll` | `{ "makeCompleted": boolean }` |
//! | `TodoClearCompleted` | ignored |

use crate::error::EventError;
use crate::types::{TodoAction, TodoId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

/// Inbound UI events handled by the list model
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TodoEvent {
    /// A new todo was entered
    CreateItem,
    /// A todo's destroy button was pressed
    DeleteItem,
    /// A todo's text was edited
    UpdateItem,
    /// A todo's checkbox was toggled
    ToggleItem,
    /// The toggle-all checkbox was toggled
    ToggleAll,
    /// "Clear completed" was pressed
    ClearCompleted,
}

impl TodoEvent {
    /// Every inbound event, in binding order
    pub const ALL: [Self; 6] = [
        Self::CreateItem,
        Self::DeleteItem,
        Self::UpdateItem,
        Self::ToggleItem,
        Self::ToggleAll,
        Self::ClearCompleted,
    ];

    /// The event's dispatch name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateItem => "TodoCreateItem",
            Self::DeleteItem => "TodoDeleteItem",
            Self::UpdateItem => "TodoUpdateItem",
            Self::ToggleItem => "TodoToggleItem",
            Self::ToggleAll => "TodoToggleAll",
            Self::ClearCompleted => "TodoClearCompleted",
        }
    }

    /// Decodes a payload for this event into an action
    ///
    /// # Errors
    ///
    /// [`EventError::InvalidPayload`] if the payload does not match the event.
    pub fn decode(self, payload: Value) -> Result<TodoAction, EventError> {
        let action = match self {
            Self::CreateItem => {
                let CreatePayload { text } = self.payload(payload)?;
                TodoAction::TodoCreateItem { text }
            }
            Self::DeleteItem => {
                let DeletePayload { id, is_completed } = self.payload(payload)?;
                TodoAction::TodoDeleteItem { id, is_completed }
            }
            Self::UpdateItem => {
                let UpdatePayload { id, text } = self.payload(payload)?;
                TodoAction::TodoUpdateItem { id, text }
            }
            Self::ToggleItem => {
                let ToggleItemPayload { id, make_completed } = self.payload(payload)?;
                TodoAction::TodoToggleItem { id, make_completed }
            }
            Self::ToggleAll => {
                let ToggleAllPayload { make_completed } = self.payload(payload)?;
                TodoAction::TodoToggleAll { make_completed }
            }
            Self::ClearCompleted => TodoAction::TodoClearCompleted,
        };
        Ok(action)
    }

    fn payload<T: DeserializeOwned>(self, payload: Value) -> Result<T, EventError> {
        serde_json::from_value(payload).map_err(|source| EventError::InvalidPayload {
            event: self.as_str(),
            source,
        })
    }
}

impl std::fmt::Display for TodoEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoEvent {
    type Err = EventError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == name)
            .ok_or_else(|| EventError::UnknownEvent(name.to_string()))
    }
}

impl TodoAction {
    /// Decodes a named UI event into an action
    ///
    /// # Errors
    ///
    /// [`EventError::UnknownEvent`] for names outside [`TodoEvent`],
    /// [`EventError::InvalidPayload`] for malformed payloads.
    pub fn from_named(name: &str, payload: Value) -> Result<Self, EventError> {
        name.parse::<TodoEvent>()?.decode(payload)
    }
}

#[derive(Deserialize)]
struct CreatePayload {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletePayload {
    id: TodoId,
    is_completed: bool,
}

#[derive(Deserialize)]
struct UpdatePayload {
    id: TodoId,
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleItemPayload {
    id: TodoId,
    make_completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToggleAllPayload {
    make_completed: bool,
}
