//! `herald-core` — identity and domain error primitives.
//!
//! This crate has no knowledge of messages or dispatch; it only provides the
//! values the message layer refers to.

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::{
    AggregateId, GlobalIdGenerator, IdGenerator, ProcessIdGenerator, TimeOrderedIdGenerator,
};
