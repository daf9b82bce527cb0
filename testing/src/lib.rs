//! # Todokit Testing
//!
//! Testing utilities and helpers for the Todokit reducer architecture.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - Test logging setup
//!
//! ## Example
//!
//! ```ignore
//! use todokit_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(TodoListReducer::new())
//!     .with_env(TodoEnvironment::default())
//!     .given_state(TodoListState::new())
//!     .when_action(TodoAction::TodoCreateItem { text: Some("Buy milk".into()) })
//!     .then_state(|state| assert_eq!(state.size(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{assertions, ReducerTest};

/// Test helpers and utilities
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Honors `RUST_LOG` and defaults to `debug`. Safe to call from every
    /// test; only the first call installs the subscriber.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
