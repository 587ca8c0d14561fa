//! Node id generation.
//!
//! Generated ids combine a millisecond timestamp with a random suffix, so
//! ids created in the same millisecond still differ. The timestamp never
//! goes backwards even if the wall clock does.

use chrono::Utc;
use uuid::Uuid;

use super::node::NodeId;

/// Source of fresh node ids.
pub trait IdSource {
    /// Produce a new id starting with `prefix` (`"root"` or `"node"`).
    fn next_id(&mut self, prefix: &str) -> NodeId;
}

/// Length of the random suffix.
const SUFFIX_LEN: usize = 9;

/// Clock + random suffix ids: `node-1718000000000-1f3a9c0de`.
#[derive(Debug, Default)]
pub struct ClockIds {
    last_millis: i64,
}

impl ClockIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_millis(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_millis = self.last_millis.max(now);
        self.last_millis
    }
}

impl IdSource for ClockIds {
    fn next_id(&mut self, prefix: &str) -> NodeId {
        let millis = self.now_millis();
        let random = Uuid::new_v4().simple().to_string();
        let suffix = &random[..SUFFIX_LEN];
        NodeId(format!("{prefix}-{millis}-{suffix}"))
    }
}

/// Deterministic ids: `node-1`, `node-2`, ...
///
/// Useful for tests and replayable sessions.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> NodeId {
        self.next += 1;
        NodeId(format!("{prefix}-{}", self.next))
    }
}
