//! Composition root for state machines.

use crate::builder::error::{BuildError, ConfigViolation, OverrideKind};
use crate::builder::transition::TransitionBuilder;
use crate::core::{Entity, Event, HookError, Loader, Saver, State};
use crate::engine::{StateMachine, Transition, TransitionTable};
use crate::store::EntityStore;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

/// Collects transitions and collaborators, then builds a [`StateMachine`].
///
/// The embedding application creates one of these at startup with its
/// entity store, registers every transition, and calls `build`. The result
/// cannot be reconfigured.
pub struct StateMachineConfig<E: Entity, Ev: Event, C = ()> {
    store: Arc<dyn EntityStore<E>>,
    table: TransitionTable<E, Ev, C>,
    loader: Option<Loader<E>>,
    saver: Option<Saver<E>>,
    loader_declarations: usize,
    saver_declarations: usize,
}

impl<E: Entity, Ev: Event, C: 'static> StateMachineConfig<E, Ev, C> {
    /// Start a configuration that loads and saves entities through `store`.
    pub fn new<S>(store: S) -> Self
    where
        S: EntityStore<E> + 'static,
    {
        Self {
            store: Arc::new(store),
            table: TransitionTable::new(),
            loader: None,
            saver: None,
            loader_declarations: 0,
            saver_declarations: 0,
        }
    }

    /// Register a pre-built transition.
    ///
    /// Load/save overrides declared on the transition become machine-wide.
    pub fn add(mut self, mut transition: Transition<E, Ev, C>) -> Self {
        if let Some(loader) = transition.loader.take() {
            self.set_loader(loader);
        }
        if let Some(saver) = transition.saver.take() {
            self.set_saver(saver);
        }

        debug!(
            event = transition.event().name(),
            from = transition.from().name(),
            targets = transition.targets().len(),
            "Registering transition"
        );
        self.table.register(transition);
        self
    }

    /// Build a transition and register it.
    /// Returns an error if the builder fails validation.
    pub fn transition(self, builder: TransitionBuilder<E, Ev, C>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        Ok(self.add(transition))
    }

    /// Add multiple transitions at once.
    pub fn transitions(self, transitions: Vec<Transition<E, Ev, C>>) -> Self {
        transitions
            .into_iter()
            .fold(self, |config, transition| config.add(transition))
    }

    /// Replace the store's load step for every transition.
    pub fn load_with<F>(mut self, loader: F) -> Self
    where
        F: Fn(&E::Id) -> Result<Option<E>, HookError> + Send + Sync + 'static,
    {
        self.set_loader(Arc::new(loader));
        self
    }

    /// Replace the store's save step for every transition.
    pub fn save_with<F>(mut self, saver: F) -> Self
    where
        F: Fn(&E) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.set_saver(Arc::new(saver));
        self
    }

    /// Check the whole configuration, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        for (from, event, transitions) in self.table.entries() {
            if from.is_final() {
                checks.push(Validation::fail(ConfigViolation::TransitionFromFinalState {
                    state: from.name().to_string(),
                    event: event.name().to_string(),
                }));
            }

            let Some(first_exhaustive) = transitions.iter().position(Transition::is_exhaustive)
            else {
                continue;
            };
            for position in first_exhaustive + 1..transitions.len() {
                checks.push(Validation::fail(ConfigViolation::ShadowedTransition {
                    state: from.name().to_string(),
                    event: event.name().to_string(),
                    position,
                }));
            }
        }

        for (kind, count) in [
            (OverrideKind::BeforeAll, self.loader_declarations),
            (OverrideKind::AfterAll, self.saver_declarations),
        ] {
            if count > 1 {
                checks.push(Validation::fail(ConfigViolation::ConflictingOverride {
                    kind,
                    count,
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the state machine.
    /// Returns an error if nothing is registered or the configuration is invalid.
    pub fn build(self) -> Result<StateMachine<E, Ev, C>, BuildError> {
        if self.table.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        if let Validation::Failure(violations) = self.validate() {
            return Err(BuildError::InvalidConfiguration {
                violations: violations.iter().cloned().collect(),
            });
        }

        Ok(StateMachine::from_parts(
            self.table,
            self.store,
            self.loader,
            self.saver,
        ))
    }

    fn set_loader(&mut self, loader: Loader<E>) {
        if self.loader.is_some() {
            warn!("Replacing previously declared before-all override");
        }
        self.loader = Some(loader);
        self.loader_declarations += 1;
    }

    fn set_saver(&mut self, saver: Saver<E>) {
        if self.saver.is_some() {
            warn!("Replacing previously declared after-all override");
        }
        self.saver = Some(saver);
        self.saver_declarations += 1;
    }
}
