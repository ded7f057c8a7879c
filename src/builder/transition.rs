//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Entity, Event, Guard, Hook, HookError, Loader, Saver, State};
use crate::engine::{Target, Transition};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing transitions with a fluent API.
///
/// The builder is single-use: setters overwrite earlier values and `build`
/// consumes it.
///
/// # Example
///
/// ```
/// use switchyard::builder::transition;
/// use switchyard::core::Entity;
/// use switchyard::{event_enum, state_enum};
///
/// state_enum! {
///     pub enum TicketState {
///         InProgress,
///         Closed,
///         Canceled,
///     }
///     final: [Closed, Canceled]
/// }
///
/// event_enum! {
///     pub enum TicketEvent {
///         Decision,
///     }
/// }
///
/// struct Ticket {
///     id: u64,
///     state: TicketState,
///     value: String,
/// }
///
/// impl Entity for Ticket {
///     type State = TicketState;
///     type Id = u64;
///     fn id(&self) -> &u64 { &self.id }
///     fn state(&self) -> &TicketState { &self.state }
///     fn set_state(&mut self, state: TicketState) { self.state = state; }
/// }
///
/// let decision = transition::<Ticket, TicketEvent, ()>()
///     .event(TicketEvent::Decision)
///     .from(TicketState::InProgress)
///     .to_when(TicketState::Canceled, |t: &Ticket, _: &()| t.value == "cancel")
///     .to(TicketState::Closed)
///     .build()
///     .unwrap();
///
/// assert_eq!(decision.targets().len(), 2);
/// ```
pub struct TransitionBuilder<E: Entity, Ev: Event, C = ()> {
    event: Option<Ev>,
    from: Option<E::State>,
    targets: Vec<Target<E, C>>,
    before: Option<Hook<E, C>>,
    after: Option<Hook<E, C>>,
    loader: Option<Loader<E>>,
    saver: Option<Saver<E>>,
}

impl<E: Entity, Ev: Event, C: 'static> TransitionBuilder<E, Ev, C> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            event: None,
            from: None,
            targets: Vec::new(),
            before: None,
            after: None,
            loader: None,
            saver: None,
        }
    }

    /// Set the triggering event (required).
    pub fn event(mut self, event: Ev) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the source state (required).
    pub fn from(mut self, state: E::State) -> Self {
        self.from = Some(state);
        self
    }

    /// Add an unconditional target. It must be the last target.
    pub fn to(mut self, state: E::State) -> Self {
        self.targets.push(Target::new(state, None));
        self
    }

    /// Add a target guarded by a closure.
    pub fn to_when<F>(mut self, state: E::State, predicate: F) -> Self
    where
        F: Fn(&E, &C) -> bool + Send + Sync + 'static,
    {
        self.targets
            .push(Target::new(state, Some(Guard::new(predicate))));
        self
    }

    /// Add a target guarded by a prebuilt guard.
    pub fn to_guarded(mut self, state: E::State, guard: Guard<E, C>) -> Self {
        self.targets.push(Target::new(state, Some(guard)));
        self
    }

    /// Hook run just before the state changes.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut E, &C) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(hook));
        self
    }

    /// Hook run just after the state changes, before persistence.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut E, &C) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.after = Some(Arc::new(hook));
        self
    }

    /// Replace the store's load step for the whole machine.
    ///
    /// Applies to every transition once registered, not just this one.
    /// Prefer [`StateMachineConfig::load_with`](crate::builder::StateMachineConfig::load_with).
    pub fn before_all<F>(mut self, loader: F) -> Self
    where
        F: Fn(&E::Id) -> Result<Option<E>, HookError> + Send + Sync + 'static,
    {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Replace the store's save step for the whole machine.
    ///
    /// Applies to every transition once registered, not just this one.
    /// Prefer [`StateMachineConfig::save_with`](crate::builder::StateMachineConfig::save_with).
    pub fn after_all<F>(mut self, saver: F) -> Self
    where
        F: Fn(&E) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.saver = Some(Arc::new(saver));
        self
    }

    /// Check every build requirement, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<BuildError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<BuildError>>> = Vec::new();

        checks.push(require(self.event.is_some(), BuildError::MissingEvent));
        checks.push(require(self.from.is_some(), BuildError::MissingFromState));
        checks.push(require(
            !self.targets.is_empty(),
            BuildError::MissingToState,
        ));

        if let Some(err) = unreachable_target(&self.targets) {
            checks.push(Validation::fail(err));
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the transition, failing on the first missing or invalid part.
    pub fn build(self) -> Result<Transition<E, Ev, C>, BuildError> {
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        if self.targets.is_empty() {
            return Err(BuildError::MissingToState);
        }
        if let Some(err) = unreachable_target(&self.targets) {
            return Err(err);
        }

        let mut transition = Transition::new(event, from, self.targets);
        transition.before = self.before;
        transition.after = self.after;
        transition.loader = self.loader;
        transition.saver = self.saver;
        Ok(transition)
    }
}

impl<E: Entity, Ev: Event, C: 'static> Default for TransitionBuilder<E, Ev, C> {
    fn default() -> Self {
        Self::new()
    }
}

fn require(ok: bool, err: BuildError) -> Validation<(), NonEmptyVec<BuildError>> {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(err)
    }
}

/// An unguarded target anywhere but last hides the targets after it.
fn unreachable_target<E: Entity, C>(targets: &[Target<E, C>]) -> Option<BuildError> {
    let last = targets.len().checked_sub(1)?;
    targets
        .iter()
        .enumerate()
        .find(|(position, target)| *position < last && !target.is_guarded())
        .map(|(position, target)| BuildError::UnreachableTarget {
            state: target.to().name().to_string(),
            position,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Opened,
        InProgress,
        Closed,
        Canceled,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Opened => "Opened",
                Self::InProgress => "InProgress",
                Self::Closed => "Closed",
                Self::Canceled => "Canceled",
            }
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestEvent {
        StartWorking,
        Decision,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            match self {
                Self::StartWorking => "StartWorking",
                Self::Decision => "Decision",
            }
        }
    }

    struct Ticket {
        id: u32,
        state: TestState,
        value: String,
    }

    impl Entity for Ticket {
        type State = TestState;
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn state(&self) -> &TestState {
            &self.state
        }

        fn set_state(&mut self, state: TestState) {
            self.state = state;
        }
    }

    type Builder = TransitionBuilder<Ticket, TestEvent>;

    #[test]
    fn builder_validates_required_fields() {
        let missing_event = Builder::new()
            .from(TestState::Opened)
            .to(TestState::InProgress)
            .build();
        let missing_from = Builder::new()
            .event(TestEvent::StartWorking)
            .to(TestState::InProgress)
            .build();
        let missing_to = Builder::new()
            .event(TestEvent::StartWorking)
            .from(TestState::Opened)
            .build();

        assert!(matches!(missing_event, Err(BuildError::MissingEvent)));
        assert!(matches!(missing_from, Err(BuildError::MissingFromState)));
        assert!(matches!(missing_to, Err(BuildError::MissingToState)));
    }

    #[test]
    fn unguarded_target_must_be_last() {
        let result = Builder::new()
            .event(TestEvent::Decision)
            .from(TestState::InProgress)
            .to(TestState::Closed)
            .to_when(TestState::Canceled, |t: &Ticket, _: &()| t.value == "cancel")
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::UnreachableTarget {
                state: "Closed".to_string(),
                position: 0,
            })
        );
    }

    #[test]
    fn guarded_targets_may_precede_fallback() {
        let transition = Builder::new()
            .event(TestEvent::Decision)
            .from(TestState::InProgress)
            .to_when(TestState::Canceled, |t: &Ticket, _: &()| t.value == "cancel")
            .to(TestState::Closed)
            .build()
            .unwrap();

        assert_eq!(transition.targets().len(), 2);
        assert!(transition.is_exhaustive());
    }

    #[test]
    fn last_write_wins_for_event_and_from() {
        let transition = Builder::new()
            .event(TestEvent::StartWorking)
            .event(TestEvent::Decision)
            .from(TestState::Opened)
            .from(TestState::InProgress)
            .to(TestState::Closed)
            .build()
            .unwrap();

        assert_eq!(transition.event(), &TestEvent::Decision);
        assert_eq!(transition.from(), &TestState::InProgress);
    }

    #[test]
    fn validate_accumulates_all_problems() {
        let builder = Builder::new()
            .to(TestState::Closed)
            .to(TestState::Canceled);

        match builder.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| matches!(e, BuildError::MissingEvent)));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, BuildError::MissingFromState)));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, BuildError::UnreachableTarget { .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn validate_succeeds_for_complete_builder() {
        let builder = Builder::new()
            .event(TestEvent::StartWorking)
            .from(TestState::Opened)
            .to(TestState::InProgress);

        assert!(builder.validate().is_success());
    }

    #[test]
    fn hooks_are_attached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let transition = Builder::new()
            .event(TestEvent::StartWorking)
            .from(TestState::Opened)
            .to(TestState::InProgress)
            .before(move |_: &mut Ticket, _: &()| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .after(|_: &mut Ticket, _: &()| Ok(()))
            .build()
            .unwrap();

        assert!(transition.has_before());
        assert!(transition.has_after());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
