#![forbid(unsafe_code)]

use st_core::Thought;
use time::OffsetDateTime;

/// One accepted thought together with its position in the global history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// 1-based, unique, equal to the thought count right after this entry was committed.
    pub seq: u64,
    pub accepted_at_ms: i64,
    pub thought: Thought,
}

impl HistoryEntry {
    pub(crate) fn new(seq: u64, thought: Thought) -> Self {
        Self {
            seq,
            accepted_at_ms: now_ms_i64(),
            thought,
        }
    }
}

fn now_ms_i64() -> i64 {
    let ms = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000i128;
    if ms <= 0 {
        0
    } else {
        i64::try_from(ms).unwrap_or(i64::MAX)
    }
}
