//! Composite todo view.
//!
//! [`Todo`] is stateless: it composes the header, list and footer regions
//! inside a labelled `section` from whatever state and counts it is given.
//!
//! ```
//! use todo::view::{render_to_html, TodoProps};
//! use todo::TodoListState;
//!
//! let mut state = TodoListState::new();
//! state.add_todo(Some("Buy milk")).unwrap();
//!
//! let counts = state.counts();
//! let markup = render_to_html(TodoProps::builder().state(state).counts(counts).build());
//! assert!(markup.contains("<h1 class=\"title\">todos</h1>"));
//! assert!(markup.contains("Buy milk"));
//! ```

pub mod regions;
pub mod styles;

use leptos::prelude::*;
use leptos::reactive::owner::Owner;

pub use regions::{TodoFooter, TodoHeader, TodoList, TodoRow};
pub use styles::StyleMap;

use crate::types::{ListCounts, TodoListState};

/// Default header title
pub const DEFAULT_TITLE: &str = "todos";

/// Composition root of the todo view
///
/// `counts` drives the footer and is normally the last `TodoUpdatedList`
/// the view received.
#[component]
pub fn Todo(
    /// List to render
    state: TodoListState,
    /// Counts shown in the footer
    counts: ListCounts,
    /// Header title
    #[prop(into, default = DEFAULT_TITLE.to_string())]
    title: String,
    /// Style table
    #[prop(optional)]
    styles: StyleMap,
) -> impl IntoView {
    let section_class = styles.class("todo").to_string();
    let aria_label = title.clone();
    let footer = (counts.size > 0).then(|| view! { <TodoFooter counts=counts styles=styles.clone() /> });

    view! {
        <section class=section_class aria-label=aria_label>
            <TodoHeader title=title styles=styles.clone() />
            <TodoList state=state styles=styles />
            {footer}
        </section>
    }
}

/// Renders the composite view to an HTML string
#[must_use]
pub fn render_to_html(props: TodoProps) -> String {
    Owner::new().with(|| Todo(props).to_html())
}
