//! Composition root for the user workflow.
//!
//! ```text
//! submit(UserCommand)
//!   → command dispatcher [user_registration, email_change]
//!       → event dispatcher [print_events, extra handlers...]
//! ```
//!
//! Both dispatchers are built once, here, and never change afterwards.

use std::sync::Arc;

use herald_core::{GlobalIdGenerator, IdGenerator};
use herald_events::{
    CommandDispatcher, CommonDispatcher, DispatchError, Dispatcher, EventDispatcher,
    FailurePolicy, Handler,
};
use herald_users::{
    EmailChangeHandler, RegistrationValidator, UserCommand, UserEvent, UserRegistrationHandler,
};

use crate::observer::{OutputFormat, PrintEventHandler};
use crate::sink::OutputSink;

/// Wired command and event dispatchers.
#[derive(Debug)]
pub struct Pipeline {
    commands: CommandDispatcher<UserCommand>,
    events: Arc<EventDispatcher<UserEvent>>,
}

impl Pipeline {
    pub fn builder(sink: impl OutputSink + 'static) -> PipelineBuilder {
        PipelineBuilder::new(Arc::new(sink))
    }

    /// Dispatch one command; returns after every resulting event was handled.
    pub fn submit(&self, command: impl Into<UserCommand>) -> Result<(), DispatchError> {
        let command = command.into();
        tracing::debug!(kind = %herald_events::Dispatchable::kind(&command), "submitting command");
        self.commands.dispatch(command)
    }

    /// Publish an event directly to the event side, bypassing command handlers.
    pub fn publish(&self, event: impl Into<UserEvent>) -> Result<(), DispatchError> {
        self.events.dispatch(event.into())
    }

    pub fn command_handlers(&self) -> Vec<&'static str> {
        self.commands.handler_names()
    }

    pub fn event_handlers(&self) -> Vec<&'static str> {
        self.events.handler_names()
    }

    /// Failure policy shared by the command and event dispatchers.
    pub fn policy(&self) -> FailurePolicy {
        self.commands.policy()
    }
}

pub struct PipelineBuilder {
    sink: Arc<dyn OutputSink>,
    format: OutputFormat,
    policy: FailurePolicy,
    ids: Arc<dyn IdGenerator>,
    validator: Option<Box<dyn RegistrationValidator>>,
    event_handlers: Vec<Arc<dyn Handler<UserEvent>>>,
}

impl PipelineBuilder {
    fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            sink,
            format: OutputFormat::default(),
            policy: FailurePolicy::default(),
            ids: Arc::new(GlobalIdGenerator),
            validator: None,
            event_handlers: Vec::new(),
        }
    }

    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Failure policy for both dispatchers.
    #[must_use]
    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    #[must_use]
    pub fn validator(mut self, validator: impl RegistrationValidator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Add an event handler after the printer, in call order.
    #[must_use]
    pub fn event_handler(mut self, handler: Arc<dyn Handler<UserEvent>>) -> Self {
        self.event_handlers.push(handler);
        self
    }

    pub fn build(self) -> Pipeline {
        let printer: Arc<dyn Handler<UserEvent>> =
            Arc::new(PrintEventHandler::<_, UserEvent>::with_format(self.sink, self.format));
        let mut event_handlers = vec![printer];
        event_handlers.extend(self.event_handlers);
        let events = Arc::new(CommonDispatcher::new(event_handlers).with_policy(self.policy));

        let registration = UserRegistrationHandler::with_ids(events.clone(), self.ids);
        let registration = match self.validator {
            Some(validator) => registration.with_boxed_validator(validator),
            None => registration,
        };

        let commands = CommonDispatcher::builder()
            .handler(registration)
            .handler(EmailChangeHandler::new(events.clone()))
            .policy(self.policy)
            .build();

        tracing::debug!(
            commands = ?commands.handler_names(),
            events = ?events.handler_names(),
            policy = ?self.policy,
            "pipeline built"
        );

        Pipeline { commands, events }
    }
}
