//! Recording handler for tests/dev.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Dispatchable, Handler, HandlerError, HandlerResult, MessageKind};

/// Handler that keeps a copy of every message it accepts.
///
/// - `new()` accepts every kind
/// - `only(kinds)` self-selects like a real handler: other kinds are ignored
/// - `failing(msg)` records the message, then fails
#[derive(Debug)]
pub struct RecordingHandler<M> {
    name: &'static str,
    accepts: Option<HashSet<MessageKind>>,
    fail_with: Option<String>,
    seen: AtomicUsize,
    messages: Mutex<Vec<M>>,
}

impl<M> RecordingHandler<M> {
    pub fn new() -> Self {
        Self {
            name: "recording",
            accepts: None,
            fail_with: None,
            seen: AtomicUsize::new(0),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn only(kinds: impl IntoIterator<Item = MessageKind>) -> Self {
        Self {
            accepts: Some(kinds.into_iter().collect()),
            ..Self::new()
        }
    }

    pub fn failing(msg: impl Into<String>) -> Self {
        Self::new().fail_with(msg)
    }

    /// Fail after recording every accepted message.
    #[must_use]
    pub fn fail_with(mut self, msg: impl Into<String>) -> Self {
        self.fail_with = Some(msg.into());
        self
    }

    #[must_use]
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Number of messages delivered, accepted or not.
    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: Clone> RecordingHandler<M> {
    /// Accepted messages in arrival order.
    pub fn messages(&self) -> Vec<M> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl<M> Default for RecordingHandler<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Handler<M> for RecordingHandler<M>
where
    M: Dispatchable + Clone,
{
    fn handle(&self, message: &M) -> HandlerResult {
        self.seen.fetch_add(1, Ordering::SeqCst);

        if let Some(accepts) = &self.accepts {
            if !accepts.contains(&message.kind()) {
                return Ok(());
            }
        }

        self.messages
            .lock()
            .map_err(|_| HandlerError::other("recording log poisoned"))?
            .push(message.clone());

        match &self.fail_with {
            Some(msg) => Err(HandlerError::other(msg.clone())),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
