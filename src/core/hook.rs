//! Side-effecting callbacks run around a transition.

use super::entity::Entity;
use std::sync::Arc;

/// Error type returned by hooks, loaders and savers.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Per-transition callback run immediately before or after the state change.
pub type Hook<E, C> = Arc<dyn Fn(&mut E, &C) -> Result<(), HookError> + Send + Sync>;

/// Replaces the store's load step for a whole machine.
pub type Loader<E> =
    Arc<dyn Fn(&<E as Entity>::Id) -> Result<Option<E>, HookError> + Send + Sync>;

/// Replaces the store's save step for a whole machine.
pub type Saver<E> = Arc<dyn Fn(&E) -> Result<(), HookError> + Send + Sync>;
