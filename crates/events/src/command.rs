use serde_json::{Map, Value as JsonValue};

use crate::Dispatchable;

/// A message expressing intent to change state.
///
/// Commands are transient: a caller builds one, hands it to a command
/// dispatcher, and it is consumed by that single dispatch. The payload is a
/// field-name → value mapping mirroring the command's fields.
///
/// Concrete commands are usually closed enums over per-intent structs, so a
/// handler selects the variant it understands with a `match` and ignores the
/// rest.
pub trait Command: Dispatchable {
    fn payload(&self) -> Map<String, JsonValue>;
}
