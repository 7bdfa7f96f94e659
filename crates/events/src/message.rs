//! Message identity shared by commands and events.

use serde::{Serialize, Serializer};

/// Stable name of a concrete message variant (e.g. `"user.register"`).
///
/// Every dispatchable value reports its kind; handlers and routers select on
/// it instead of inspecting runtime types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageKind(&'static str);

impl MessageKind {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl core::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for MessageKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

/// Anything that may be handed to a [`Dispatcher`](crate::Dispatcher).
///
/// Both [`Command`](crate::Command) and [`Event`](crate::Event) build on it.
/// It carries no data besides the variant's [`MessageKind`].
pub trait Dispatchable: core::fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> MessageKind;
}
