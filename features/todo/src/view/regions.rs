//! Header, list and footer regions of the todo view.
//!
//! Interactive elements carry a `data-event` attribute naming the UI event
//! they dispatch to the list model.

use leptos::prelude::*;

use super::styles::StyleMap;
use crate::events::TodoEvent;
use crate::types::{ListCounts, TodoItem, TodoListState};

/// Title plus the new-todo input
#[component]
pub fn TodoHeader(#[prop(into)] title: String, styles: StyleMap) -> impl IntoView {
    let header_class = styles.class("header").to_string();
    let title_class = styles.class("title").to_string();
    let input_class = styles.class("newTodo").to_string();

    view! {
        <header class=header_class>
            <h1 class=title_class>{title}</h1>
            <input
                type="text"
                class=input_class
                placeholder="What needs to be done?"
                data-event={TodoEvent::CreateItem.as_str()}
            />
        </header>
    }
}

/// Toggle-all checkbox and one row per todo
#[component]
pub fn TodoList(state: TodoListState, styles: StyleMap) -> impl IntoView {
    let main_class = styles.class("main").to_string();
    let toggle_all_class = styles.class("toggleAll").to_string();
    let list_class = styles.class("list").to_string();
    let all_completed = state.all_completed();

    view! {
        <section class=main_class>
            <input
                type="checkbox"
                class=toggle_all_class
                checked=all_completed
                data-event={TodoEvent::ToggleAll.as_str()}
            />
            <ul class=list_class>
                {state
                    .items()
                    .values()
                    .cloned()
                    .map(|item| view! { <TodoRow item=item styles=styles.clone() /> })
                    .collect_view()}
            </ul>
        </section>
    }
}

/// A single todo row
#[component]
pub fn TodoRow(item: TodoItem, styles: StyleMap) -> impl IntoView {
    let row_class = if item.is_completed {
        format!("{} {}", styles.class("item"), styles.class("completed"))
    } else {
        styles.class("item").to_string()
    };
    let toggle_class = styles.class("toggle").to_string();
    let label_class = styles.class("label").to_string();
    let destroy_class = styles.class("destroy").to_string();

    view! {
        <li class=row_class data-id={item.id.to_string()}>
            <input
                type="checkbox"
                class=toggle_class
                checked=item.is_completed
                data-event={TodoEvent::ToggleItem.as_str()}
            />
            <label class=label_class data-event={TodoEvent::UpdateItem.as_str()}>
                {item.text}
            </label>
            <button class=destroy_class data-event={TodoEvent::DeleteItem.as_str()}></button>
        </li>
    }
}

/// Remaining count and the clear-completed button
///
/// The composite view leaves this out for an empty list.
#[component]
pub fn TodoFooter(counts: ListCounts, styles: StyleMap) -> impl IntoView {
    let footer_class = styles.class("footer").to_string();
    let count_class = styles.class("count").to_string();

    let active = counts.active();
    let left = format!(" {} left", if active == 1 { "item" } else { "items" });

    let clear_completed = (counts.completed > 0).then(|| {
        let clear_class = styles.class("clearCompleted").to_string();
        view! {
            <button class=clear_class data-event={TodoEvent::ClearCompleted.as_str()}>
                "Clear completed"
            </button>
        }
    });

    view! {
        <footer class=footer_class>
            <span class=count_class>
                <strong>{active.to_string()}</strong>
                {left}
            </span>
            {clear_completed}
        </footer>
    }
}
