use chrono::Utc;

use herald_events::{Dispatcher, Handler, HandlerResult};

use crate::user::{EmailSet, UserCommand, UserEvent};

/// Command handler for [`UserCommand::ChangeEmail`]: emits one `EmailSet` for
/// the target user. Other variants are ignored.
#[derive(Debug)]
pub struct EmailChangeHandler<D> {
    events: D,
}

impl<D> EmailChangeHandler<D> {
    pub fn new(events: D) -> Self {
        Self { events }
    }
}

impl<D> Handler<UserCommand> for EmailChangeHandler<D>
where
    D: Dispatcher<UserEvent>,
{
    fn handle(&self, command: &UserCommand) -> HandlerResult {
        let UserCommand::ChangeEmail(cmd) = command else {
            return Ok(());
        };

        tracing::info!(user_id = %cmd.user_id(), "changing email");
        self.events
            .dispatch(EmailSet::new(cmd.user_id(), cmd.email(), Utc::now()).into())?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "email_change"
    }
}
