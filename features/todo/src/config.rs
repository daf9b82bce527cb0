//! Configuration management for the todo feature.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Missing or unparsable values fall back to the default.

use crate::view::DEFAULT_TITLE;
use std::env;
use todokit_runtime::StoreConfig;

/// Log filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_LOG_FILTER: &str = "todo=debug,todokit_runtime=debug";

/// Feature configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Composite view configuration
    pub view: ViewConfig,
    /// Store runtime configuration
    pub store: StoreConfig,
    /// `tracing` filter directives, from `RUST_LOG`
    pub log_level: String,
}

/// View configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Title shown in the header
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | variable | default |
    /// |----------|---------|
    /// | `TODO_TITLE` | `todos` |
    /// | `TODO_BROADCAST_CAPACITY` | `16` |
    /// | `TODO_MAX_EMITTED_ACTIONS` | `32` (zero is raised to one) |
    /// | `RUST_LOG` | `todo=debug,todokit_runtime=debug` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StoreConfig::default();

        Self {
            view: ViewConfig {
                title: lookup("TODO_TITLE")
                    .filter(|title| !title.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            },
            store: StoreConfig::default()
                .with_broadcast_capacity(
                    lookup("TODO_BROADCAST_CAPACITY")
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(defaults.broadcast_capacity),
                )
                .with_max_emitted_actions(
                    lookup("TODO_MAX_EMITTED_ACTIONS")
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(defaults.max_emitted_actions),
                ),
            log_level: lookup("RUST_LOG")
                .filter(|filter| !filter.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
