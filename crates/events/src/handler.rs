//! The handler contract.
//!
//! A handler is asked about every message its dispatcher receives and
//! self-selects: it matches on the variants it understands and returns
//! `Ok(())` without side effects for everything else.

use crate::{Command, Event, HandlerResult};

/// Capability to react to a message of type `M`.
pub trait Handler<M>: Send + Sync {
    fn handle(&self, message: &M) -> HandlerResult;

    /// Label used in logs and dispatch errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A handler registered on a command dispatcher.
///
/// Structurally identical to [`EventHandler`]; the two differ only by the
/// message category they accept. Implement [`Handler`] and this follows.
pub trait CommandHandler<C: Command>: Handler<C> {}

impl<C: Command, H: Handler<C> + ?Sized> CommandHandler<C> for H {}

/// A handler registered on an event dispatcher.
pub trait EventHandler<E: Event>: Handler<E> {}

impl<E: Event, H: Handler<E> + ?Sized> EventHandler<E> for H {}

/// Handler backed by a closure. See [`handler_fn`].
pub struct FnHandler<F> {
    name: &'static str,
    f: F,
}

impl<F> core::fmt::Debug for FnHandler<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish()
    }
}

impl<M, F> Handler<M> for FnHandler<F>
where
    F: Fn(&M) -> HandlerResult + Send + Sync,
{
    fn handle(&self, message: &M) -> HandlerResult {
        (self.f)(message)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Wrap a closure as a named handler.
pub fn handler_fn<M, F>(name: &'static str, f: F) -> FnHandler<F>
where
    F: Fn(&M) -> HandlerResult + Send + Sync,
{
    FnHandler { name, f }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dispatchable, HandlerError, MessageKind};
    use herald_core::DomainError;
    use serde_json::{Map, Value as JsonValue};

    #[derive(Debug)]
    struct Noop;

    impl Dispatchable for Noop {
        fn kind(&self) -> MessageKind {
            MessageKind::new("test.noop")
        }
    }

    impl Command for Noop {
        fn payload(&self) -> Map<String, JsonValue> {
            Map::new()
        }
    }

    struct Silent;

    impl Handler<Noop> for Silent {
        fn handle(&self, _message: &Noop) -> HandlerResult {
            Ok(())
        }
    }

    fn assert_command_handler<C: Command, H: CommandHandler<C>>(_: &H) {}

    #[test]
    fn default_name_is_the_type_name() {
        let h: &dyn Handler<Noop> = &Silent;
        assert!(h.name().ends_with("Silent"));
    }

    #[test]
    fn any_command_handler_impl_is_a_command_handler() {
        assert_command_handler::<Noop, _>(&Silent);
    }

    #[test]
    fn closures_keep_their_label() {
        let h = handler_fn("reject", |_: &Noop| Err(HandlerError::validation("nope")));
        assert_eq!(Handler::<Noop>::name(&h), "reject");
        assert!(matches!(h.handle(&Noop), Err(HandlerError::Domain(DomainError::Validation(_)))));
    }
}
