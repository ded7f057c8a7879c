//! Macros for ergonomic state and event definitions.

/// Generate a `State` implementation for a simple enum.
///
/// # Example
///
/// ```
/// use switchyard::state_enum;
///
/// state_enum! {
///     pub enum TicketState {
///         Opened,
///         InProgress,
///         Closed,
///         Canceled,
///     }
///     final: [Closed, Canceled]
/// }
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

/// Generate an `Event` implementation for a simple enum.
///
/// # Example
///
/// ```
/// use switchyard::core::Event;
/// use switchyard::event_enum;
///
/// event_enum! {
///     pub enum TicketEvent {
///         StartWorking,
///         Decision,
///     }
/// }
///
/// assert_eq!(TicketEvent::Decision.name(), "Decision");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};

    state_enum! {
        enum TestState {
            Opened,
            InProgress,
            Closed,
            Canceled,
        }
        final: [Closed, Canceled]
    }

    event_enum! {
        enum TestEvent {
            StartWorking,
            Decision,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        let state = TestState::Opened;
        assert_eq!(state.name(), "Opened");
        assert!(!state.is_final());

        assert_eq!(TestState::InProgress.name(), "InProgress");
        assert!(TestState::Closed.is_final());
        assert!(TestState::Canceled.is_final());
    }

    #[test]
    fn event_enum_macro_generates_trait() {
        assert_eq!(TestEvent::StartWorking.name(), "StartWorking");
        assert_eq!(TestEvent::Decision.name(), "Decision");
        assert_ne!(TestEvent::StartWorking, TestEvent::Decision);
    }

    #[test]
    fn state_enum_supports_visibility() {
        // The macro should work with pub visibility
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
            final: [B]
        }

        let _state = PublicState::A;
    }

    #[test]
    fn state_enum_works_without_final() {
        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        assert!(!MinimalState::One.is_final());
        assert!(!MinimalState::Two.is_final());
    }
}
