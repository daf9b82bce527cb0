//! Integration tests for the todo list model
//!
//! These drive the model the way a view does: named events in, state
//! snapshots and `TodoUpdatedList` notifications out.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use todo::{
    render_to_html, Config, EventError, ListCounts, ModelError, TodoAction, TodoId, TodoItem,
    TodoListModel, TodoListState, TodoProps,
};
use todokit_runtime::StoreConfig;
use todokit_testing::helpers::init_tracing;
use tokio::sync::broadcast::error::TryRecvError;

async fn counts(model: &TodoListModel) -> (usize, usize) {
    let counts = model.inform().await.unwrap();
    (counts.completed, counts.size)
}

#[tokio::test]
async fn test_milk_and_dog_scenario() {
    let model = TodoListModel::new();

    model.handle_event("TodoCreateItem", json!({ "text": "buy milk" })).await.unwrap();
    model.handle_event("TodoCreateItem", json!({ "text": "walk dog" })).await.unwrap();
    assert_eq!(counts(&model).await, (0, 2));

    model
        .handle_event("TodoToggleItem", json!({ "id": 0, "makeCompleted": true }))
        .await
        .unwrap();
    assert_eq!(counts(&model).await, (1, 2));

    model.handle_event("TodoClearCompleted", json!(null)).await.unwrap();
    assert_eq!(counts(&model).await, (0, 1));

    let view_state = model.view_state().await;
    let ids: Vec<_> = view_state.todo_items.keys().copied().collect();
    assert_eq!(ids, vec![TodoId::new(1)]);
    assert_eq!(view_state.todo_items[&TodoId::new(1)].text, "walk dog");
}

#[tokio::test]
async fn test_create_trims_and_ignores_blank() {
    let model = TodoListModel::new();

    model.handle_event("TodoCreateItem", json!({ "text": "  a  " })).await.unwrap();
    model.handle_event("TodoCreateItem", json!({ "text": "   " })).await.unwrap();
    model.handle_event("TodoCreateItem", json!({})).await.unwrap();
    model.add_todo(None).await.unwrap();

    let state = model.snapshot().await;
    assert_eq!(state.size(), 1);
    assert_eq!(state.get(TodoId::new(0)).unwrap().text, "a");
    assert_eq!(state.last_id(), TodoId::new(1));
}

#[tokio::test]
async fn test_toggle_all_then_delete_uses_stored_flag() {
    let model = TodoListModel::new();
    for text in ["a", "b", "c"] {
        model.add_todo(Some(text)).await.unwrap();
    }

    model.toggle_all(true).await.unwrap();
    assert_eq!(counts(&model).await, (3, 3));

    // Caller believes the item is active; the stored flag wins.
    model.delete_todo(TodoId::new(2), false).await.unwrap();
    assert_eq!(counts(&model).await, (2, 2));

    model.toggle_all(false).await.unwrap();
    assert_eq!(counts(&model).await, (0, 2));
    model.snapshot().await.check_invariants().unwrap();
}

#[tokio::test]
async fn test_unknown_ids_leave_counts_untouched() {
    init_tracing();
    let model = TodoListModel::new();
    model.add_todo(Some("a")).await.unwrap();

    model.toggle_item(TodoId::new(9), true).await.unwrap();
    model.delete_todo(TodoId::new(9), true).await.unwrap();
    model.update_todo(TodoId::new(9), "x").await.unwrap();

    let state = model.snapshot().await;
    assert_eq!(state.counts(), ListCounts { completed: 0, size: 1 });
    assert_eq!(state.last_error.as_deref(), Some("Todo with ID 9 not found"));

    model.toggle_item(TodoId::new(0), true).await.unwrap();
    assert_eq!(model.snapshot().await.last_error, None);
}

#[tokio::test]
async fn test_unknown_event_is_rejected() {
    let model = TodoListModel::new();

    let err = model.handle_event("TodoRename", json!({})).await.unwrap_err();
    assert!(matches!(
        err,
        ModelError::Event(EventError::UnknownEvent(ref name)) if name == "TodoRename"
    ));

    let err = model
        .handle_event("TodoToggleItem", json!({ "id": "zero" }))
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Event(EventError::InvalidPayload { .. })));

    assert_eq!(model.counts().await, ListCounts::default());
}

#[tokio::test]
async fn test_inform_broadcasts_to_every_subscriber() {
    let model = TodoListModel::new();
    let mut first = model.subscribe_updates();
    let mut second = model.subscribe_updates();

    model.add_todo(Some("a")).await.unwrap();

    // Mutations alone do not notify.
    assert!(matches!(first.try_recv(), Err(TryRecvError::Empty)));

    model.inform().await.unwrap();

    let expected = TodoAction::TodoUpdatedList { completed: 0, size: 1 };
    assert_eq!(first.try_recv().unwrap(), expected);
    assert_eq!(second.try_recv().unwrap(), expected);
}

#[tokio::test]
async fn test_state_published_after_every_action() {
    let model = TodoListModel::new();
    let mut states = model.subscribe_state();

    model.add_todo(Some("a")).await.unwrap();
    assert!(states.has_changed().unwrap());
    assert_eq!(states.borrow_and_update().size(), 1);

    model.toggle_item(TodoId::new(0), true).await.unwrap();
    assert_eq!(states.borrow_and_update().completed_number(), 1);
}

#[tokio::test]
async fn test_concurrent_creates() {
    let model = TodoListModel::new();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let model = model.clone();
            tokio::spawn(async move {
                let _ = model.add_todo(Some(&format!("todo {i}"))).await;
            })
        })
        .collect();

    #[allow(clippy::panic)]
    for handle in handles {
        if let Err(e) = handle.await {
            panic!("concurrent create task panicked: {e}");
        }
    }

    let state = model.snapshot().await;
    assert_eq!(state.size(), 10);
    assert_eq!(state.last_id(), TodoId::new(10));
    state.check_invariants().unwrap();
}

#[tokio::test]
async fn test_model_over_existing_items_renders() {
    let items = vec![
        TodoItem { id: TodoId::new(4), text: "done".to_string(), is_completed: true },
        TodoItem::new(TodoId::new(7), "open".to_string()),
    ];
    let model = TodoListModel::with_state(TodoListState::with_items(items), StoreConfig::default());

    model.add_todo(Some("next")).await.unwrap();
    let counts = model.inform().await.unwrap();
    assert_eq!(counts, ListCounts { completed: 1, size: 3 });

    let state = model.snapshot().await;
    assert!(state.exists(TodoId::new(8)));

    let markup = render_to_html(TodoProps::builder().state(state).counts(counts).build());
    assert!(markup.contains("<strong>2</strong> items left"));
    assert!(markup.contains("Clear completed"));
    assert!(markup.contains("data-id=\"8\""));
}

#[tokio::test]
async fn test_zero_emit_limit_still_informs() {
    let config = Config::from_lookup(|key| (key == "TODO_MAX_EMITTED_ACTIONS").then(|| "0".to_string()));
    let model = TodoListModel::from_config(&config);

    model.add_todo(Some("a")).await.unwrap();
    assert_eq!(model.inform().await, Ok(ListCounts { completed: 0, size: 1 }));
}
