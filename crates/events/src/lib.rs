//! Commands, events, and the synchronous dispatch core.
//!
//! ```text
//! Command → CommandDispatcher → command handlers
//!                                   └─ Event → EventDispatcher → event handlers
//! ```
//!
//! Dispatch is fully synchronous: `dispatch` returns only after every selected
//! handler has returned, and handlers may dispatch again from inside `handle`.

pub mod command;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handler;
pub mod message;
pub mod recording;
pub mod router;

pub use command::Command;
pub use dispatcher::{
    CommandDispatcher, CommonDispatcher, Dispatcher, EventDispatcher, FailurePolicy,
};
pub use error::{DispatchError, HandlerError, HandlerFailure, HandlerResult};
pub use event::Event;
pub use handler::{CommandHandler, EventHandler, FnHandler, Handler, handler_fn};
pub use message::{Dispatchable, MessageKind};
pub use recording::RecordingHandler;
pub use router::{KindRouter, KindRouterBuilder};
