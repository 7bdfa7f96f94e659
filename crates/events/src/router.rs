//! Kind-keyed routing.
//!
//! [`KindRouter`] maps each [`MessageKind`] to its own ordered handler list,
//! so a message only reaches handlers registered for its kind. Routes are
//! fixed once the router is built. With `require_route(true)` a message
//! nobody handles is an error rather than a silent no-op.

use std::collections::HashMap;
use std::sync::Arc;

use crate::dispatcher::invoke_all;
use crate::{DispatchError, Dispatchable, Dispatcher, FailurePolicy, Handler, MessageKind};

pub struct KindRouter<M> {
    routes: HashMap<MessageKind, Vec<Arc<dyn Handler<M>>>>,
    policy: FailurePolicy,
    require_route: bool,
}

impl<M> KindRouter<M> {
    pub fn builder() -> KindRouterBuilder<M> {
        KindRouterBuilder::default()
    }

    /// Routed kinds, sorted by name.
    pub fn kinds(&self) -> Vec<MessageKind> {
        let mut kinds: Vec<_> = self.routes.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn handler_count(&self, kind: MessageKind) -> usize {
        self.routes.get(&kind).map_or(0, Vec::len)
    }
}

impl<M> core::fmt::Debug for KindRouter<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let routes: Vec<_> = self
            .kinds()
            .into_iter()
            .map(|k| (k, self.handler_count(k)))
            .collect();
        f.debug_struct("KindRouter")
            .field("routes", &routes)
            .field("policy", &self.policy)
            .field("require_route", &self.require_route)
            .finish()
    }
}

impl<M> Dispatcher<M> for KindRouter<M>
where
    M: Dispatchable,
{
    fn dispatch(&self, message: M) -> Result<(), DispatchError> {
        let kind = message.kind();
        match self.routes.get(&kind) {
            Some(handlers) => invoke_all(kind, handlers, &message, self.policy),
            None if self.require_route => {
                tracing::warn!(%kind, "no route for message");
                Err(DispatchError::Unrouted(kind))
            }
            None => {
                tracing::debug!(%kind, "no route for message; ignoring");
                Ok(())
            }
        }
    }
}

pub struct KindRouterBuilder<M> {
    routes: HashMap<MessageKind, Vec<Arc<dyn Handler<M>>>>,
    policy: FailurePolicy,
    require_route: bool,
}

impl<M> Default for KindRouterBuilder<M> {
    fn default() -> Self {
        Self {
            routes: HashMap::new(),
            policy: FailurePolicy::default(),
            require_route: false,
        }
    }
}

impl<M> KindRouterBuilder<M> {
    /// Append `handler` to the route for `kind`.
    #[must_use]
    pub fn route<H>(self, kind: MessageKind, handler: H) -> Self
    where
        H: Handler<M> + 'static,
    {
        self.route_shared(kind, Arc::new(handler))
    }

    /// Append a shared handler to the route for `kind`. One handler may serve
    /// several kinds.
    #[must_use]
    pub fn route_shared(mut self, kind: MessageKind, handler: Arc<dyn Handler<M>>) -> Self {
        self.routes.entry(kind).or_default().push(handler);
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn require_route(mut self, required: bool) -> Self {
        self.require_route = required;
        self
    }

    pub fn build(self) -> KindRouter<M> {
        KindRouter {
            routes: self.routes,
            policy: self.policy,
            require_route: self.require_route,
        }
    }
}
