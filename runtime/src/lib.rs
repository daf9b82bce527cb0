//! # Todokit Runtime
//!
//! Runtime implementation for the Todokit reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer and executes effects
//! - **State publishing**: Every processed action publishes a state snapshot
//! - **Action broadcast**: Actions emitted by effects are broadcast to observers
//!
//! ## Example
//!
//! ```ignore
//! use todokit_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;
use std::time::Duration;
use todokit_core::{effect::Effect, reducer::Reducer};
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Emitted actions kept feeding back into the reducer past the
        /// configured limit.
        ///
        /// State changes made before the limit was hit are kept.
        #[error("Emitted action limit of {0} exceeded in a single send")]
        EmitLimitExceeded(usize),

        /// Timeout waiting for a matching action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todokit_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_max_emitted_actions(8);
///
/// assert_eq!(config.broadcast_capacity, 64);
/// assert_eq!(config.max_emitted_actions, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Buffer size of the action broadcast channel
    pub broadcast_capacity: usize,
    /// Upper bound on emitted actions processed by a single `send`
    pub max_emitted_actions: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, max_emitted_actions: usize) -> Self {
        Self {
            broadcast_capacity: 1,
            max_emitted_actions: 1,
        }
        .with_broadcast_capacity(broadcast_capacity)
        .with_max_emitted_actions(max_emitted_actions)
    }

    /// Set the action broadcast capacity
    ///
    /// A capacity of zero is raised to one, the minimum tokio accepts.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    /// Set the emitted action limit
    ///
    /// A limit of zero is raised to one so a single emitted action (such as
    /// a notification) can always be processed.
    #[must_use]
    pub const fn with_max_emitted_actions(mut self, limit: usize) -> Self {
        self.max_emitted_actions = if limit == 0 { 1 } else { limit };
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            max_emitted_actions: 32,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Arc, Duration, Effect, Reducer, RwLock, StoreConfig, StoreError};
    use std::collections::VecDeque;
    use tokio::sync::{broadcast, watch};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (emitted actions feed back into the reducer)
    ///
    /// After every reduced action the new state is published on a `watch`
    /// channel while the write lock is still held, so subscribers never see
    /// a half-applied action.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
        /// Actions emitted by effects, fanned out to observers.
        action_broadcast: broadcast::Sender<A>,
        /// Latest published state snapshot.
        state_publisher: Arc<watch::Sender<S>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Clone + std::fmt::Debug,
        S: Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            let config = StoreConfig::new(config.broadcast_capacity, config.max_emitted_actions);
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity);
            let (state_publisher, _) = watch::channel(initial_state.clone());

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
                action_broadcast,
                state_publisher: Arc::new(state_publisher),
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the state write lock
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Publishes the new state snapshot
        /// 4. Executes returned effects; emitted actions are broadcast and
        ///    reduced in order before this call returns
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::EmitLimitExceeded`] if emitted actions keep
        /// producing further emitted actions past the configured limit.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            tracing::debug!(?action, "Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let mut queue = VecDeque::from([action]);
            let mut emitted = 0_usize;

            while let Some(action) = queue.pop_front() {
                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &*self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                self.state_publisher.send_replace(S::clone(&state));
                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                for effect in effects {
                    self.execute_effect(effect, &mut queue, &mut emitted)?;
                }
            }

            tracing::debug!(emitted, "Action processing completed");
            Ok(())
        }

        /// Send an action and wait for a matching emitted action
        ///
        /// `select` maps each emitted action to the value the caller wants,
        /// returning `None` for actions to skip. Subscribes before sending, so
        /// an action emitted while processing `action` is always observed.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: no matching action arrived in time
        /// - [`StoreError::ChannelClosed`]: the broadcast channel closed
        /// - any error from [`Store::send`]
        pub async fn send_and_wait_for<F, T>(
            &self,
            action: A,
            select: F,
            timeout: Duration,
        ) -> Result<T, StoreError>
        where
            F: Fn(&A) -> Option<T>,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) => {
                            if let Some(selected) = select(&action) {
                                return Ok(selected);
                            }
                        },
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged, {} actions skipped", skipped);
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to actions emitted by effects
        ///
        /// Only emitted actions are broadcast; actions passed to `send` are not.
        /// A receiver that falls more than `broadcast_capacity` actions behind
        /// gets `RecvError::Lagged` and skips the oldest ones.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Subscribe to published state snapshots
        ///
        /// The receiver always holds the latest snapshot; intermediate
        /// snapshots may be skipped by slow readers.
        #[must_use]
        pub fn subscribe_state(&self) -> watch::Receiver<S> {
            self.state_publisher.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todo_items.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        fn execute_effect(
            &self,
            effect: Effect<A>,
            queue: &mut VecDeque<A>,
            emitted: &mut usize,
        ) -> Result<(), StoreError> {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Emit(action) => {
                    metrics::counter!("store.effects.executed", "type" => "emit").increment(1);
                    *emitted += 1;
                    if *emitted > self.config.max_emitted_actions {
                        tracing::error!(
                            limit = self.config.max_emitted_actions,
                            "Emitted action limit exceeded, dropping remaining actions"
                        );
                        return Err(StoreError::EmitLimitExceeded(self.config.max_emitted_actions));
                    }

                    tracing::trace!(?action, "Executing Effect::Emit");
                    // No subscribers is not an error
                    let _ = self.action_broadcast.send((*action).clone());
                    queue.push_back(*action);
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);
                    for effect in effects {
                        self.execute_effect(effect, queue, emitted)?;
                    }
                },
            }
            Ok(())
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config,
                action_broadcast: self.action_broadcast.clone(),
                state_publisher: Arc::clone(&self.state_publisher),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
