//! Aggregate identifiers and the factories that mint them.
//!
//! An [`AggregateId`] is an opaque 128-bit value. Fresh values come from an
//! [`IdGenerator`]; handlers receive their generator by injection so tests can
//! substitute a deterministic one. [`AggregateId::create`] is the process-wide
//! factory for callers without a generator of their own.

use core::str::FromStr;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of an aggregate instance (e.g. a user).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(Uuid);

static PROCESS_IDS: LazyLock<ProcessIdGenerator> = LazyLock::new(ProcessIdGenerator::new);

impl AggregateId {
    /// Create an identifier unique within this process.
    ///
    /// Backed by a single shared [`ProcessIdGenerator`]. Prefer injecting an
    /// [`IdGenerator`] where determinism matters.
    pub fn create() -> Self {
        PROCESS_IDS.create()
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl core::fmt::Display for AggregateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for AggregateId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<AggregateId> for Uuid {
    fn from(value: AggregateId) -> Self {
        value.0
    }
}

impl FromStr for AggregateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("AggregateId: {e}")))?;
        Ok(Self(uuid))
    }
}

/// Source of fresh aggregate identifiers.
///
/// Every value returned by one generator must differ from every other value
/// it has returned during the process lifetime.
pub trait IdGenerator: Send + Sync {
    fn create(&self) -> AggregateId;
}

impl<G> IdGenerator for std::sync::Arc<G>
where
    G: IdGenerator + ?Sized,
{
    fn create(&self) -> AggregateId {
        (**self).create()
    }
}

/// Salt + monotonic counter generator.
///
/// The high 64 bits hold a per-instance salt, the low 64 bits a counter that
/// is incremented atomically on every call, so an instance never repeats a
/// value (counter wrap-around is not handled).
#[derive(Debug)]
pub struct ProcessIdGenerator {
    salt: u64,
    counter: AtomicU64,
}

impl ProcessIdGenerator {
    /// Generator with a random salt.
    pub fn new() -> Self {
        let (salt, _) = Uuid::new_v4().as_u64_pair();
        Self::with_salt(salt)
    }

    /// Generator with a fixed salt; yields the same sequence on every run.
    pub fn with_salt(salt: u64) -> Self {
        Self {
            salt,
            counter: AtomicU64::new(0),
        }
    }

    pub fn salt(&self) -> u64 {
        self.salt
    }
}

impl Default for ProcessIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for ProcessIdGenerator {
    fn create(&self) -> AggregateId {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        AggregateId(Uuid::from_u64_pair(self.salt, seq))
    }
}

/// Generator delegating to the process-wide factory, [`AggregateId::create`].
///
/// Instances share one sequence, so ids from different holders never collide.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalIdGenerator;

impl IdGenerator for GlobalIdGenerator {
    fn create(&self) -> AggregateId {
        AggregateId::create()
    }
}

/// UUIDv7 generator (time-ordered, random tail).
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeOrderedIdGenerator;

impl IdGenerator for TimeOrderedIdGenerator {
    fn create(&self) -> AggregateId {
        AggregateId(Uuid::now_v7())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn process_factory_never_repeats() {
        let ids: HashSet<AggregateId> = (0..10_000).map(|_| AggregateId::create()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn global_generators_share_one_sequence() {
        let a = GlobalIdGenerator;
        let b = GlobalIdGenerator;
        let ids: HashSet<AggregateId> = (0..1_000).flat_map(|_| [a.create(), b.create()]).collect();
        assert_eq!(ids.len(), 2_000);
    }

    #[test]
    fn time_ordered_generator_never_repeats() {
        let ids: HashSet<AggregateId> =
            (0..10_000).map(|_| TimeOrderedIdGenerator.create()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn salted_generator_is_deterministic() {
        let a = ProcessIdGenerator::with_salt(7);
        let b = ProcessIdGenerator::with_salt(7);

        let first: Vec<_> = (0..3).map(|_| a.create()).collect();
        let second: Vec<_> = (0..3).map(|_| b.create()).collect();
        assert_eq!(first, second);
        assert_eq!(first[0].as_uuid().as_u64_pair(), (7, 0));
        assert_eq!(first[2].as_uuid().as_u64_pair(), (7, 2));
    }

    #[test]
    fn shared_generator_is_unique_across_threads() {
        let ids = Arc::new(ProcessIdGenerator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..2_500).map(|_| ids.create()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 10_000);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = AggregateId::from_str("not-a-uuid").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.starts_with("AggregateId")));
    }

    #[test]
    fn serializes_as_bare_uuid_string() {
        let id = ProcessIdGenerator::with_salt(1).create();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }

    proptest! {
        #[test]
        fn salted_generator_yields_distinct_ids(salt in any::<u64>(), count in 1usize..512) {
            let ids = ProcessIdGenerator::with_salt(salt);
            let seen: HashSet<AggregateId> = (0..count).map(|_| ids.create()).collect();
            prop_assert_eq!(seen.len(), count);
        }
    }
}
