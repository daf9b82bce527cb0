//! Todo list binary
//!
//! Drives the list model through named UI events and prints the rendered view.

use serde_json::json;
use todo::config::DEFAULT_LOG_FILTER;
use todo::{render_to_html, Config, TodoAction, TodoListModel, TodoProps};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let model = TodoListModel::from_config(&config);
    let mut updates = model.subscribe_updates();

    println!("=== Todo List ===\n");

    let script = [
        ("TodoCreateItem", json!({ "text": "buy milk" })),
        ("TodoCreateItem", json!({ "text": "walk the dog" })),
        ("TodoCreateItem", json!({ "text": "   " })),
        ("TodoToggleItem", json!({ "id": 0, "makeCompleted": true })),
        ("TodoUpdateItem", json!({ "id": 1, "text": "walk the dog twice" })),
        ("TodoCreateItem", json!({ "text": "water the plants" })),
    ];

    for (name, payload) in script {
        println!(">>> {name} {payload}");
        model.handle_event(name, payload).await?;
    }

    let counts = model.inform().await?;
    if let Ok(notification @ TodoAction::TodoUpdatedList { .. }) = updates.try_recv() {
        println!("\n<<< {}", serde_json::to_string(&notification)?);
    }

    let props = TodoProps::builder()
        .state(model.snapshot().await)
        .counts(counts)
        .title(config.view.title.clone())
        .build();
    println!("\n{}", render_to_html(props));

    println!("\n>>> TodoClearCompleted");
    model.handle_event("TodoClearCompleted", json!({})).await?;
    let counts = model.inform().await?;
    println!(
        "<<< {} item(s), {} completed, {} left",
        counts.size,
        counts.completed,
        counts.active()
    );

    println!("\n{}", serde_json::to_string_pretty(&model.view_state().await)?);

    Ok(())
}
