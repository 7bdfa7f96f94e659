//! Handler and dispatch failures.
//!
//! A type mismatch is never an error: a handler that does not recognise a
//! message returns `Ok(())`. Everything here is an actual failure that the
//! dispatcher hands back to its caller without recovery or retry.

use herald_core::DomainError;
use thiserror::Error;

use crate::MessageKind;

pub type HandlerResult = Result<(), HandlerError>;

/// Failure raised by a single handler invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler rejected the message's content or a value it carries.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Writing to an output sink failed.
    #[error("output sink failed: {0}")]
    Sink(#[from] std::io::Error),

    /// A dispatch performed from inside this handler failed.
    #[error("nested dispatch failed: {0}")]
    Dispatch(#[source] Box<DispatchError>),

    #[error("{0}")]
    Other(String),
}

impl HandlerError {
    /// Rejection of a message's content, as [`DomainError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Domain(DomainError::validation(msg))
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<DispatchError> for HandlerError {
    fn from(value: DispatchError) -> Self {
        Self::Dispatch(Box::new(value))
    }
}

/// One failed handler, as collected under
/// [`FailurePolicy::ContinueOnError`](crate::FailurePolicy::ContinueOnError).
#[derive(Debug)]
pub struct HandlerFailure {
    pub handler: &'static str,
    /// Index of the handler in its dispatcher's (or route's) list.
    pub position: usize,
    pub error: HandlerError,
}

/// Failure of a whole `dispatch` call.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler failed and the dispatch was aborted; later handlers did not run.
    #[error("handler `{handler}` (#{position}) failed on `{kind}`: {source}")]
    Handler {
        kind: MessageKind,
        handler: &'static str,
        position: usize,
        #[source]
        source: HandlerError,
    },

    /// Every handler ran; these ones failed.
    #[error("{} handler(s) failed on `{kind}`", .failures.len())]
    Handlers {
        kind: MessageKind,
        failures: Vec<HandlerFailure>,
    },

    /// A router configured to require routes received a kind with none.
    #[error("no handler routed for `{0}`")]
    Unrouted(MessageKind),
}

impl DispatchError {
    pub fn kind(&self) -> MessageKind {
        match self {
            DispatchError::Handler { kind, .. } | DispatchError::Handlers { kind, .. } => *kind,
            DispatchError::Unrouted(kind) => *kind,
        }
    }

    /// Failed handlers in registration order.
    pub fn failed_handlers(&self) -> Vec<&'static str> {
        match self {
            DispatchError::Handler { handler, .. } => vec![*handler],
            DispatchError::Handlers { failures, .. } => {
                failures.iter().map(|f| f.handler).collect()
            }
            DispatchError::Unrouted(_) => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIND: MessageKind = MessageKind::new("test.ping");

    #[test]
    fn nested_dispatch_error_keeps_the_chain() {
        let inner = DispatchError::Handler {
            kind: KIND,
            handler: "sink",
            position: 0,
            source: HandlerError::other("disk full"),
        };
        let outer = DispatchError::Handler {
            kind: MessageKind::new("test.command"),
            handler: "workflow",
            position: 1,
            source: inner.into(),
        };

        let msg = outer.to_string();
        assert!(msg.contains("workflow"));
        assert!(msg.contains("test.command"));

        let source = std::error::Error::source(&outer).unwrap();
        assert!(source.to_string().contains("disk full"));
    }

    #[test]
    fn validation_is_a_domain_error() {
        let err = HandlerError::validation("email is empty");
        assert!(matches!(&err, HandlerError::Domain(DomainError::Validation(m)) if m == "email is empty"));
        assert_eq!(err.to_string(), "validation failed: email is empty");
    }

    #[test]
    fn domain_errors_convert_with_question_mark() {
        fn parse(s: &str) -> Result<herald_core::AggregateId, HandlerError> {
            Ok(s.parse()?)
        }
        assert!(matches!(parse("nope"), Err(HandlerError::Domain(DomainError::InvalidId(_)))));
    }

    #[test]
    fn failed_handlers_lists_every_failure() {
        let err = DispatchError::Handlers {
            kind: KIND,
            failures: vec![
                HandlerFailure {
                    handler: "a",
                    position: 0,
                    error: HandlerError::validation("x"),
                },
                HandlerFailure {
                    handler: "c",
                    position: 2,
                    error: HandlerError::other("y"),
                },
            ],
        };
        assert_eq!(err.failed_handlers(), vec!["a", "c"]);
        assert_eq!(err.kind(), KIND);
        assert_eq!(err.to_string(), "2 handler(s) failed on `test.ping`");
    }
}
