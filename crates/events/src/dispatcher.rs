//! Fan-out dispatch.
//!
//! A [`CommonDispatcher`] owns an ordered handler list fixed at construction
//! and invokes every handler, in registration order, for every message. It
//! adds no behaviour of its own: side effects belong to the handlers.
//!
//! Handlers may dispatch again from inside `handle` (a command handler emitting
//! events is the normal case). There is no lock involved, so nested dispatch on
//! the same call stack cannot deadlock.

use std::sync::Arc;

use crate::error::{DispatchError, HandlerFailure};
use crate::{Dispatchable, Handler, MessageKind};

/// Accepts a message and delivers it to handlers.
///
/// `dispatch` is blocking: it returns once every selected handler has returned.
pub trait Dispatcher<M>: Send + Sync {
    fn dispatch(&self, message: M) -> Result<(), DispatchError>;
}

impl<M, D> Dispatcher<M> for Arc<D>
where
    D: Dispatcher<M> + ?Sized,
{
    fn dispatch(&self, message: M) -> Result<(), DispatchError> {
        (**self).dispatch(message)
    }
}

/// What a dispatch does when one of its handlers fails.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure; later handlers are not invoked.
    #[default]
    FailFast,
    /// Invoke every handler, then report all failures together.
    ContinueOnError,
}

/// Ordered fan-out dispatcher.
pub struct CommonDispatcher<M> {
    handlers: Vec<Arc<dyn Handler<M>>>,
    policy: FailurePolicy,
}

/// Dispatcher instance routing commands to command handlers.
///
/// Commands and events never share a dispatcher; callers build one per
/// message category.
pub type CommandDispatcher<C> = CommonDispatcher<C>;

/// Dispatcher instance routing events to event handlers.
pub type EventDispatcher<E> = CommonDispatcher<E>;

impl<M> CommonDispatcher<M> {
    pub fn new(handlers: Vec<Arc<dyn Handler<M>>>) -> Self {
        Self {
            handlers,
            policy: FailurePolicy::default(),
        }
    }

    pub fn builder() -> DispatcherBuilder<M> {
        DispatcherBuilder::default()
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler labels in invocation order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }
}

impl<M> core::fmt::Debug for CommonDispatcher<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommonDispatcher")
            .field("handlers", &self.handler_names())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<M> Dispatcher<M> for CommonDispatcher<M>
where
    M: Dispatchable,
{
    fn dispatch(&self, message: M) -> Result<(), DispatchError> {
        invoke_all(message.kind(), &self.handlers, &message, self.policy)
    }
}

/// Collects handlers for a [`CommonDispatcher`]. Order of calls is invocation order.
pub struct DispatcherBuilder<M> {
    handlers: Vec<Arc<dyn Handler<M>>>,
    policy: FailurePolicy,
}

impl<M> Default for DispatcherBuilder<M> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            policy: FailurePolicy::default(),
        }
    }
}

impl<M> DispatcherBuilder<M> {
    #[must_use]
    pub fn handler<H>(mut self, handler: H) -> Self
    where
        H: Handler<M> + 'static,
    {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Register a handler the caller keeps a reference to.
    #[must_use]
    pub fn shared<H>(mut self, handler: Arc<H>) -> Self
    where
        H: Handler<M> + 'static,
    {
        self.handlers.push(handler);
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> CommonDispatcher<M> {
        CommonDispatcher {
            handlers: self.handlers,
            policy: self.policy,
        }
    }
}

/// Invoke `handlers` in order for one message under `policy`.
pub(crate) fn invoke_all<M>(
    kind: MessageKind,
    handlers: &[Arc<dyn Handler<M>>],
    message: &M,
    policy: FailurePolicy,
) -> Result<(), DispatchError> {
    let span = tracing::debug_span!("dispatch", kind = %kind, handlers = handlers.len());
    let _entered = span.enter();

    let mut failures = Vec::new();
    for (position, handler) in handlers.iter().enumerate() {
        tracing::debug!(handler = handler.name(), position, "invoking handler");

        let Err(error) = handler.handle(message) else {
            continue;
        };

        match policy {
            FailurePolicy::FailFast => {
                tracing::debug!(handler = handler.name(), position, %error, "handler failed; aborting dispatch");
                return Err(DispatchError::Handler {
                    kind,
                    handler: handler.name(),
                    position,
                    source: error,
                });
            }
            FailurePolicy::ContinueOnError => {
                tracing::warn!(handler = handler.name(), position, %error, "handler failed; continuing");
                failures.push(HandlerFailure {
                    handler: handler.name(),
                    position,
                    error,
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(DispatchError::Handlers { kind, failures })
    }
}
