//! User aggregate messages.
//!
//! Commands are intents from callers; events are the facts the workflow
//! handlers emit. Both are closed enums so handlers select variants with a
//! plain `match`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use herald_core::AggregateId;
use herald_events::{Command, Dispatchable, Event, MessageKind};

// ─────────────────────────────────────────────────────────────────────────────
// User ID
// ─────────────────────────────────────────────────────────────────────────────

/// Identifier of a user aggregate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AggregateId> for UserId {
    fn from(value: AggregateId) -> Self {
        Self(*value.as_uuid())
    }
}

impl From<UserId> for AggregateId {
    fn from(value: UserId) -> Self {
        AggregateId::from_uuid(value.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Register a new user. The user id is allocated by the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUser {
    name: String,
    email: String,
}

impl RegisterUser {
    pub const KIND: MessageKind = MessageKind::new("user.register");

    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Replace the email of an existing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEmail {
    user_id: UserId,
    email: String,
}

impl ChangeEmail {
    pub const KIND: MessageKind = MessageKind::new("user.change_email");

    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    RegisterUser(RegisterUser),
    ChangeEmail(ChangeEmail),
}

impl From<RegisterUser> for UserCommand {
    fn from(value: RegisterUser) -> Self {
        UserCommand::RegisterUser(value)
    }
}

impl From<ChangeEmail> for UserCommand {
    fn from(value: ChangeEmail) -> Self {
        UserCommand::ChangeEmail(value)
    }
}

impl Dispatchable for UserCommand {
    fn kind(&self) -> MessageKind {
        match self {
            UserCommand::RegisterUser(_) => RegisterUser::KIND,
            UserCommand::ChangeEmail(_) => ChangeEmail::KIND,
        }
    }
}

impl Command for UserCommand {
    fn payload(&self) -> Map<String, JsonValue> {
        let mut payload = Map::new();
        match self {
            UserCommand::RegisterUser(c) => {
                payload.insert("name".into(), c.name.clone().into());
                payload.insert("email".into(), c.email.clone().into());
            }
            UserCommand::ChangeEmail(c) => {
                payload.insert("user_id".into(), c.user_id.to_string().into());
                payload.insert("email".into(), c.email.clone().into());
            }
        }
        payload
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// A user's name was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSet {
    relates: [AggregateId; 1],
    name: String,
    occurred_at: DateTime<Utc>,
}

impl NameSet {
    pub const KIND: MessageKind = MessageKind::new("user.name_set");

    pub fn new(user_id: UserId, name: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            relates: [user_id.into()],
            name: name.into(),
            occurred_at,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.relates[0].into()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A user's email was set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSet {
    relates: [AggregateId; 1],
    email: String,
    occurred_at: DateTime<Utc>,
}

impl EmailSet {
    pub const KIND: MessageKind = MessageKind::new("user.email_set");

    pub fn new(user_id: UserId, email: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            relates: [user_id.into()],
            email: email.into(),
            occurred_at,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.relates[0].into()
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    NameSet(NameSet),
    EmailSet(EmailSet),
}

impl UserEvent {
    pub fn user_id(&self) -> UserId {
        match self {
            UserEvent::NameSet(e) => e.user_id(),
            UserEvent::EmailSet(e) => e.user_id(),
        }
    }
}

impl From<NameSet> for UserEvent {
    fn from(value: NameSet) -> Self {
        UserEvent::NameSet(value)
    }
}

impl From<EmailSet> for UserEvent {
    fn from(value: EmailSet) -> Self {
        UserEvent::EmailSet(value)
    }
}

impl Dispatchable for UserEvent {
    fn kind(&self) -> MessageKind {
        match self {
            UserEvent::NameSet(_) => NameSet::KIND,
            UserEvent::EmailSet(_) => EmailSet::KIND,
        }
    }
}

impl Event for UserEvent {
    fn payload(&self) -> JsonValue {
        match self {
            UserEvent::NameSet(e) => JsonValue::String(e.name.clone()),
            UserEvent::EmailSet(e) => JsonValue::String(e.email.clone()),
        }
    }

    fn relates(&self) -> &[AggregateId] {
        match self {
            UserEvent::NameSet(e) => &e.relates,
            UserEvent::EmailSet(e) => &e.relates,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            UserEvent::NameSet(e) => e.occurred_at,
            UserEvent::EmailSet(e) => e.occurred_at,
        }
    }
}
