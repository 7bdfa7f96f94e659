use chrono::{DateTime, Utc};
use herald_core::AggregateId;
use serde_json::Value as JsonValue;

use crate::Dispatchable;

/// A message recording a fact that already happened.
///
/// Events are:
/// - **immutable** (built once by a command handler, never mutated)
/// - **related** to the aggregates they concern, in order
/// - **timestamped** with business time at construction
pub trait Event: Dispatchable {
    /// Fact payload: a single value or a mapping.
    fn payload(&self) -> JsonValue;

    /// Aggregates this event concerns. Non-empty for aggregate events.
    fn relates(&self) -> &[AggregateId];

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
