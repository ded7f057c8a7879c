//! Immutable transition records.

use crate::core::{Entity, Event, Guard, Hook, Loader, Saver, State};
use std::fmt;

/// One candidate destination of a transition.
///
/// A target without a guard always applies.
pub struct Target<E: Entity, C = ()> {
    pub(crate) to: E::State,
    pub(crate) guard: Option<Guard<E, C>>,
}

impl<E: Entity, C> Target<E, C> {
    pub(crate) fn new(to: E::State, guard: Option<Guard<E, C>>) -> Self {
        Self { to, guard }
    }

    /// The state this target leads to.
    pub fn to(&self) -> &E::State {
        &self.to
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Check whether this target applies to the entity (pure).
    pub fn applies(&self, entity: &E, context: &C) -> bool {
        self.guard
            .as_ref()
            .is_none_or(|guard| guard.check(entity, context))
    }
}

impl<E: Entity, C> Clone for Target<E, C> {
    fn clone(&self) -> Self {
        Self {
            to: self.to.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<E: Entity, C> fmt::Debug for Target<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("to", &self.to)
            .field("guarded", &self.is_guarded())
            .finish()
    }
}

/// A rule mapping `(from, event)` to one or more guarded targets.
///
/// Built with [`TransitionBuilder`](crate::builder::TransitionBuilder) and
/// never mutated afterwards. Targets are kept in declaration order; at most
/// one of them is unguarded and, if present, it is the last one.
pub struct Transition<E: Entity, Ev: Event, C = ()> {
    pub(crate) event: Ev,
    pub(crate) from: E::State,
    pub(crate) targets: Vec<Target<E, C>>,
    pub(crate) before: Option<Hook<E, C>>,
    pub(crate) after: Option<Hook<E, C>>,
    // Machine-wide overrides declared on this transition. They are moved
    // into the configuration on registration.
    pub(crate) loader: Option<Loader<E>>,
    pub(crate) saver: Option<Saver<E>>,
}

impl<E: Entity, Ev: Event, C> Transition<E, Ev, C> {
    pub(crate) fn new(event: Ev, from: E::State, targets: Vec<Target<E, C>>) -> Self {
        Self {
            event,
            from,
            targets,
            before: None,
            after: None,
            loader: None,
            saver: None,
        }
    }

    pub fn event(&self) -> &Ev {
        &self.event
    }

    pub fn from(&self) -> &E::State {
        &self.from
    }

    pub fn targets(&self) -> &[Target<E, C>] {
        &self.targets
    }

    pub fn has_before(&self) -> bool {
        self.before.is_some()
    }

    pub fn has_after(&self) -> bool {
        self.after.is_some()
    }

    /// Pick the first target whose guard passes, in declaration order (pure).
    pub fn select(&self, entity: &E, context: &C) -> Option<&E::State> {
        self.targets
            .iter()
            .find(|target| target.applies(entity, context))
            .map(Target::to)
    }

    /// True when the last target is unguarded, so this transition matches
    /// every entity in `from`.
    pub fn is_exhaustive(&self) -> bool {
        self.targets.last().is_some_and(|target| !target.is_guarded())
    }
}

impl<E: Entity, Ev: Event, C> fmt::Debug for Transition<E, Ev, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("event", &self.event.name())
            .field("from", &self.from.name())
            .field("targets", &self.targets)
            .field("before", &self.has_before())
            .field("after", &self.has_after())
            .finish()
    }
}
