//! `herald-users` — the user registration workflow.
//!
//! Messages for the user aggregate and the command handlers that turn them
//! into events.

pub mod email;
pub mod registration;
pub mod user;

pub use email::EmailChangeHandler;
pub use registration::{AcceptAll, RegistrationValidator, UserRegistrationHandler};
pub use user::{ChangeEmail, EmailSet, NameSet, RegisterUser, UserCommand, UserEvent, UserId};
