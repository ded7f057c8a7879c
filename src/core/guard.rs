//! Guard predicates for selecting transition targets.
//!
//! Guards are pure boolean functions over the entity and the caller's
//! context. A fan-out transition lists several guarded targets; the first
//! guard that passes picks the target.

use super::entity::Entity;
use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a transition target applies.
///
/// # Example
///
/// ```rust
/// use switchyard::core::{Entity, Guard};
/// use switchyard::state_enum;
///
/// state_enum! {
///     pub enum Light {
///         Off,
///         On,
///     }
/// }
///
/// struct Lamp {
///     id: u32,
///     state: Light,
///     watts: u32,
/// }
///
/// impl Entity for Lamp {
///     type State = Light;
///     type Id = u32;
///     fn id(&self) -> &u32 { &self.id }
///     fn state(&self) -> &Light { &self.state }
///     fn set_state(&mut self, state: Light) { self.state = state; }
/// }
///
/// let low_power = Guard::new(|lamp: &Lamp, _ctx: &()| lamp.watts < 60);
///
/// let lamp = Lamp { id: 1, state: Light::Off, watts: 40 };
/// assert!(low_power.check(&lamp, &()));
/// ```
pub struct Guard<E, C = ()> {
    predicate: Arc<dyn Fn(&E, &C) -> bool + Send + Sync>,
}

impl<E: Entity, C> Guard<E, C> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E, &C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against an entity and context.
    pub fn check(&self, entity: &E, context: &C) -> bool {
        (self.predicate)(entity, context)
    }
}

impl<E, C> Clone for Guard<E, C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<E, C> fmt::Debug for Guard<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        InProgress,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            "InProgress"
        }
    }

    struct Ticket {
        id: String,
        state: TestState,
        value: String,
    }

    impl Entity for Ticket {
        type State = TestState;
        type Id = String;

        fn id(&self) -> &String {
            &self.id
        }

        fn state(&self) -> &TestState {
            &self.state
        }

        fn set_state(&mut self, state: TestState) {
            self.state = state;
        }
    }

    fn ticket(value: &str) -> Ticket {
        Ticket {
            id: "t-1".to_string(),
            state: TestState::InProgress,
            value: value.to_string(),
        }
    }

    #[test]
    fn guard_reads_entity_fields() {
        let cancelled = Guard::new(|t: &Ticket, _: &()| t.value == "cancel");

        assert!(cancelled.check(&ticket("cancel"), &()));
        assert!(!cancelled.check(&ticket("value"), &()));
    }

    #[test]
    fn guard_reads_context() {
        let over_limit = Guard::new(|_: &Ticket, limit: &usize| *limit > 3);

        assert!(over_limit.check(&ticket("value"), &5));
        assert!(!over_limit.check(&ticket("value"), &1));
    }

    #[test]
    fn cloned_guard_shares_predicate() {
        let guard = Guard::new(|t: &Ticket, _: &()| t.value.is_empty());
        let cloned = guard.clone();

        assert_eq!(guard.check(&ticket(""), &()), cloned.check(&ticket(""), &()));
        assert_eq!(
            guard.check(&ticket("x"), &()),
            cloned.check(&ticket("x"), &())
        );
    }

    #[test]
    fn guard_is_deterministic() {
        let entity = ticket("value");
        let guard = Guard::new(|t: &Ticket, _: &()| t.value != "cancel");

        assert_eq!(guard.check(&entity, &()), guard.check(&entity, &()));
    }
}
