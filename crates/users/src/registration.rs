//! User registration workflow.
//!
//! `RegisterUser` → allocate a fresh [`UserId`] → emit `NameSet`, then
//! `EmailSet`, both related to that id, through the event dispatcher the
//! handler holds. Each event dispatch completes before the next begins.
//!
//! The two events are not emitted atomically: if the event dispatch for
//! `NameSet` succeeds and the one for `EmailSet` fails, observers have already
//! seen the name. The failure is returned to the command dispatcher's caller.
//!
//! The workflow stops at its first failed emission whatever the event
//! dispatcher's failure policy: `ContinueOnError` still delivers `NameSet` to
//! every observer, but `EmailSet` is not dispatched.

use chrono::Utc;

use herald_core::{GlobalIdGenerator, IdGenerator};
use herald_events::{Dispatcher, Handler, HandlerResult};

use crate::user::{EmailSet, NameSet, RegisterUser, UserCommand, UserEvent, UserId};

/// Check applied to a registration before any event is built.
///
/// Rejecting returns an error (typically [`HandlerError::validation`], a
/// [`DomainError::Validation`]) and no events are emitted.
///
/// [`HandlerError::validation`]: herald_events::HandlerError::validation
/// [`DomainError::Validation`]: herald_core::DomainError::Validation
pub trait RegistrationValidator: Send + Sync {
    fn validate(&self, command: &RegisterUser) -> HandlerResult;
}

impl<F> RegistrationValidator for F
where
    F: Fn(&RegisterUser) -> HandlerResult + Send + Sync,
{
    fn validate(&self, command: &RegisterUser) -> HandlerResult {
        self(command)
    }
}

/// Validator that accepts every registration.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl RegistrationValidator for AcceptAll {
    fn validate(&self, _command: &RegisterUser) -> HandlerResult {
        Ok(())
    }
}

/// Command handler for [`UserCommand::RegisterUser`]; ignores other variants.
pub struct UserRegistrationHandler<D, G = GlobalIdGenerator> {
    events: D,
    ids: G,
    validator: Box<dyn RegistrationValidator>,
}

impl<D> UserRegistrationHandler<D> {
    pub fn new(events: D) -> Self {
        Self::with_ids(events, GlobalIdGenerator)
    }
}

impl<D, G> UserRegistrationHandler<D, G> {
    /// Handler allocating user ids from `ids`.
    pub fn with_ids(events: D, ids: G) -> Self {
        Self {
            events,
            ids,
            validator: Box::new(AcceptAll),
        }
    }

    #[must_use]
    pub fn with_validator(self, validator: impl RegistrationValidator + 'static) -> Self {
        self.with_boxed_validator(Box::new(validator))
    }

    #[must_use]
    pub fn with_boxed_validator(mut self, validator: Box<dyn RegistrationValidator>) -> Self {
        self.validator = validator;
        self
    }
}

impl<D, G> core::fmt::Debug for UserRegistrationHandler<D, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UserRegistrationHandler").finish_non_exhaustive()
    }
}

impl<D, G> Handler<UserCommand> for UserRegistrationHandler<D, G>
where
    D: Dispatcher<UserEvent>,
    G: IdGenerator,
{
    fn handle(&self, command: &UserCommand) -> HandlerResult {
        let UserCommand::RegisterUser(cmd) = command else {
            return Ok(());
        };

        self.validator.validate(cmd)?;

        let user_id = UserId::from(self.ids.create());
        let occurred_at = Utc::now();
        let name_set = NameSet::new(user_id, cmd.name(), occurred_at);
        let email_set = EmailSet::new(user_id, cmd.email(), occurred_at);

        tracing::info!(%user_id, "registering user");

        self.events.dispatch(name_set.into())?;
        self.events.dispatch(email_set.into())?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "user_registration"
    }
}
