//! Style table mapping logical style names to CSS classes.

use std::collections::BTreeMap;

/// Logical names used by the todo view and their default classes
const DEFAULT_CLASSES: &[(&str, &str)] = &[
    ("todo", "todoapp"),
    ("header", "header"),
    ("title", "title"),
    ("newTodo", "new-todo"),
    ("main", "main"),
    ("toggleAll", "toggle-all"),
    ("list", "todo-list"),
    ("item", "todo-item"),
    ("completed", "completed"),
    ("toggle", "toggle"),
    ("label", "label"),
    ("destroy", "destroy"),
    ("footer", "footer"),
    ("count", "todo-count"),
    ("clearCompleted", "clear-completed"),
];

/// Mapping from logical style names to class names
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleMap(BTreeMap<String, String>);

impl StyleMap {
    /// An empty table; every lookup falls back to the logical name
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Overrides one entry
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, class: impl Into<String>) -> Self {
        self.0.insert(name.into(), class.into());
        self
    }

    /// Class for a logical name, or the name itself when unmapped
    #[must_use]
    pub fn class<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map_or(name, String::as_str)
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self(
            DEFAULT_CLASSES
                .iter()
                .map(|(name, class)| ((*name).to_string(), (*class).to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_back_to_name() {
        let styles = StyleMap::default().with("todo", "app");
        assert_eq!(styles.class("todo"), "app");
        assert_eq!(styles.class("list"), "todo-list");
        assert_eq!(styles.class("unknown"), "unknown");
        assert_eq!(StyleMap::empty().class("todo"), "todo");
    }
}
