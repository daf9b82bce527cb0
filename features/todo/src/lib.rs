//! Client-side todo list: a list model driven by named UI events plus a
//! composite view.
//!
//! The model keeps the collection of todos with cached `size` and
//! `completed_number` counters. The view asks for fresh counts by calling
//! [`TodoListModel::inform`], which emits a `TodoUpdatedList` notification to
//! every subscriber.
//!
//! - `TodoCreateItem`, `TodoDeleteItem`, `TodoUpdateItem`, `TodoToggleItem`,
//!   `TodoToggleAll` and `TodoClearCompleted` mutate the list
//! - `TodoUpdatedList { completed, size }` is the only outbound notification
//! - [`Todo`] renders a header, the list and a footer
//!
//! # Quick Start
//!
//! ```no_run
//! use serde_json::json;
//! use todo::{render_to_html, TodoListModel, TodoProps};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let model = TodoListModel::new();
//!
//! model.handle_event("TodoCreateItem", json!({ "text": "Buy milk" })).await?;
//! model.handle_event("TodoToggleItem", json!({ "id": 0, "makeCompleted": true })).await?;
//!
//! let counts = model.inform().await?;
//! assert_eq!((counts.completed, counts.size), (1, 1));
//!
//! let props = TodoProps::builder().state(model.snapshot().await).counts(counts).build();
//! println!("{}", render_to_html(props));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use error::{EventError, ModelError, TodoError};
pub use events::TodoEvent;
pub use model::{TodoListModel, TodoStore};
pub use reducer::{TodoEnvironment, TodoListReducer};
pub use types::{ListCounts, TodoAction, TodoId, TodoItem, TodoListState, ViewState};
pub use view::{render_to_html, StyleMap, Todo, TodoProps};
