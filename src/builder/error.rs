//! Build errors for transitions and machine configurations.

use thiserror::Error;

/// Errors that can occur when building transitions and state machines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Transition event not specified. Call .event(event)")]
    MissingEvent,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    /// An unguarded target always matches, so anything declared after it
    /// can never be selected.
    #[error("Unguarded target '{state}' at position {position} is not last; later targets are unreachable")]
    UnreachableTarget { state: String, position: usize },

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Invalid configuration: {}", describe(.violations))]
    InvalidConfiguration { violations: Vec<ConfigViolation> },
}

/// Configuration-wide problems, collected together at build time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigViolation {
    /// An earlier transition on the same key ends with an unguarded target.
    #[error("Transition #{position} for event '{event}' from '{state}' is shadowed by an earlier unguarded transition")]
    ShadowedTransition {
        state: String,
        event: String,
        position: usize,
    },

    /// Final states accept no events.
    #[error("Transition for event '{event}' leaves final state '{state}'")]
    TransitionFromFinalState { state: String, event: String },

    #[error("{kind} override declared {count} times; only one is allowed")]
    ConflictingOverride { kind: OverrideKind, count: usize },
}

/// Which default step a machine-wide override replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    /// Replaces the store load step.
    BeforeAll,
    /// Replaces the store save step.
    AfterAll,
}

impl std::fmt::Display for OverrideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BeforeAll => f.write_str("before-all"),
            Self::AfterAll => f.write_str("after-all"),
        }
    }
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
