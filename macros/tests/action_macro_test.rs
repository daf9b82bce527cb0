//! Tests for #[derive(Action)] macro

use todokit_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum ListAction {
    #[command]
    AddItem {
        text: String,
    },

    #[command]
    ClearCompleted,

    #[command]
    Toggle(u64, bool),

    #[event]
    ListUpdated {
        completed: usize,
        size: usize,
    },

    Internal,
}

#[test]
fn test_is_command() {
    let action = ListAction::AddItem {
        text: "Test".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
}

#[test]
fn test_is_event() {
    let action = ListAction::ListUpdated {
        completed: 0,
        size: 1,
    };
    assert!(!action.is_command());
    assert!(action.is_event());
}

#[test]
fn test_unmarked_variant_is_neither() {
    assert!(!ListAction::Internal.is_command());
    assert!(!ListAction::Internal.is_event());
}

#[test]
fn test_all_commands_identified() {
    let commands = vec![
        ListAction::AddItem {
            text: "Test".to_string(),
        },
        ListAction::ClearCompleted,
        ListAction::Toggle(1, true),
    ];

    for cmd in commands {
        assert!(cmd.is_command(), "Expected command: {cmd:?}");
        assert!(!cmd.is_event(), "Should not be event: {cmd:?}");
    }
}

#[test]
fn test_names_cover_every_variant_shape() {
    let cases = vec![
        (ListAction::AddItem { text: String::new() }, "AddItem"),
        (ListAction::ClearCompleted, "ClearCompleted"),
        (ListAction::Toggle(0, false), "Toggle"),
        (ListAction::ListUpdated { completed: 1, size: 2 }, "ListUpdated"),
        (ListAction::Internal, "Internal"),
    ];

    for (action, expected) in cases {
        assert_eq!(action.name(), expected);
    }
}
