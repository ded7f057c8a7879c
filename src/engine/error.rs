//! Errors raised while firing a transition.

use crate::core::HookError;
use crate::store::StoreError;
use std::fmt;
use thiserror::Error;

/// Lifecycle point at which a callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    /// The configured loader that replaces `EntityStore::load`.
    BeforeAll,
    /// The matched transition's before hook.
    Before,
    /// The matched transition's after hook.
    After,
    /// The configured saver that replaces `EntityStore::save`.
    AfterAll,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BeforeAll => "before-all",
            Self::Before => "before",
            Self::After => "after",
            Self::AfterAll => "after-all",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while handling an event.
///
/// There is no partial success: either the whole load, match, hook, mutate,
/// persist sequence completed, or one of these is returned.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Entity {id} not found")]
    EntityNotFound { id: String },

    #[error("No applicable transition from state '{state}' on event '{event}'")]
    NoApplicableTransition { state: String, event: String },

    #[error("The {stage} hook failed on event '{event}'")]
    HookFailed {
        stage: HookStage,
        event: String,
        #[source]
        source: HookError,
    },

    /// The state was changed in memory and the after hook then failed.
    /// Persistence was still attempted; `persisted` reports the outcome and
    /// `persist_error` holds the store or saver failure when it did not.
    #[error("The after hook failed on event '{event}' ({from} -> {to}), persisted: {persisted}")]
    AfterHookFailed {
        event: String,
        from: String,
        to: String,
        persisted: bool,
        persist_error: Option<Box<TransitionError>>,
        #[source]
        source: HookError,
    },

    #[error("Entity store failed: {0}")]
    Store(#[from] StoreError),
}

impl TransitionError {
    /// The callback stage that failed, if a hook caused this error.
    pub fn hook_stage(&self) -> Option<HookStage> {
        match self {
            Self::HookFailed { stage, .. } => Some(*stage),
            Self::AfterHookFailed { .. } => Some(HookStage::After),
            _ => None,
        }
    }
}
