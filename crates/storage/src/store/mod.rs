#![forbid(unsafe_code)]

mod error;
mod history;

pub use error::{EngineError, StoreError};
pub use history::HistoryEntry;

use st_core::ids::BranchId;
use st_core::{Thought, ThoughtInput, ThoughtResponse};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

/// Process-wide accumulator of thoughts.
///
/// Owned by whoever starts the process and shared by reference (typically `Arc`). All methods
/// take `&self`; writers serialize on the history lock, readers of the branch index only take
/// its read lock.
#[derive(Debug, Default)]
pub struct ThinkingEngine {
    history: Mutex<Vec<HistoryEntry>>,
    branches: RwLock<BTreeMap<BranchId, Vec<HistoryEntry>>>,
    accepted: AtomicU64,
    log_thoughts: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchSummary {
    pub branch_id: BranchId,
    pub thoughts: usize,
    pub last_seq: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub thought_count: u64,
    pub branches: Vec<BranchSummary>,
}

// State as observed at the moment a thought was committed.
struct Committed {
    entry: HistoryEntry,
    branches: Vec<String>,
    thought_count: u64,
}

impl ThinkingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits every accepted thought, text included, at `info` instead of `debug`.
    pub fn with_thought_logging(mut self, enabled: bool) -> Self {
        self.log_thoughts = enabled;
        self
    }

    pub fn logs_thoughts(&self) -> bool {
        self.log_thoughts
    }

    /// Validates, classifies and normalizes `input`, then records it.
    ///
    /// Either history, branch index and counter are all updated or none of them is.
    pub fn process_thought(&self, input: ThoughtInput) -> Result<ThoughtResponse, EngineError> {
        let thought = input.into_thought().inspect_err(|err| {
            tracing::debug!(error = %err, "thought rejected");
        })?;

        let committed = self.commit(thought).inspect_err(|err| {
            tracing::warn!(error = %err, "thought commit failed");
        })?;

        let thought = &committed.entry.thought;
        if self.log_thoughts {
            tracing::info!(
                seq = committed.entry.seq,
                thought_number = thought.thought_number().get(),
                total_thoughts = thought.total_thoughts().get(),
                kind = thought.kind().as_str(),
                branch = thought.branch_id().map(BranchId::as_str),
                "{}",
                thought.text()
            );
        } else {
            tracing::debug!(
                seq = committed.entry.seq,
                thought_number = thought.thought_number().get(),
                total_thoughts = thought.total_thoughts().get(),
                kind = thought.kind().as_str(),
                branch = thought.branch_id().map(BranchId::as_str),
                "thought accepted"
            );
        }

        Ok(ThoughtResponse::build(
            thought,
            committed.branches,
            committed.thought_count,
        ))
    }

    fn commit(&self, thought: Thought) -> Result<Committed, StoreError> {
        let mut history = self
            .history
            .lock()
            .map_err(|_| StoreError::poisoned("history"))?;
        history
            .try_reserve(1)
            .map_err(|_| StoreError::exhausted("history"))?;

        // Only committers move the counter, and they all hold the history lock.
        let seq = self.accepted.load(Ordering::Acquire) + 1;
        let entry = HistoryEntry::new(seq, thought);

        let branches = match entry.thought.branch_id() {
            Some(branch_id) => {
                let mut index = self
                    .branches
                    .write()
                    .map_err(|_| StoreError::poisoned("branch index"))?;
                match index.get_mut(branch_id) {
                    Some(filed) => {
                        filed
                            .try_reserve(1)
                            .map_err(|_| StoreError::exhausted("branch"))?;
                        filed.push(entry.clone());
                    }
                    None => {
                        let mut filed = Vec::new();
                        filed
                            .try_reserve(1)
                            .map_err(|_| StoreError::exhausted("branch"))?;
                        filed.push(entry.clone());
                        index.insert(branch_id.clone(), filed);
                    }
                }
                branch_names(&index)
            }
            None => {
                let index = self
                    .branches
                    .read()
                    .map_err(|_| StoreError::poisoned("branch index"))?;
                branch_names(&index)
            }
        };

        history.push(entry.clone());
        self.accepted.store(seq, Ordering::Release);

        Ok(Committed {
            entry,
            branches,
            thought_count: seq,
        })
    }

    pub fn thought_count(&self) -> u64 {
        self.accepted.load(Ordering::Acquire)
    }

    /// Known branch ids in lexicographic order.
    pub fn branch_ids(&self) -> Result<Vec<BranchId>, StoreError> {
        let index = self
            .branches
            .read()
            .map_err(|_| StoreError::poisoned("branch index"))?;
        Ok(index.keys().cloned().collect())
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let history = self
            .history
            .lock()
            .map_err(|_| StoreError::poisoned("history"))?;
        Ok(history.clone())
    }

    /// Thoughts filed under `branch_id`, in commit order. `None` for an unknown id.
    pub fn branch_history(
        &self,
        branch_id: &BranchId,
    ) -> Result<Option<Vec<HistoryEntry>>, StoreError> {
        let index = self
            .branches
            .read()
            .map_err(|_| StoreError::poisoned("branch index"))?;
        Ok(index.get(branch_id).cloned())
    }

    pub fn snapshot(&self) -> Result<EngineSnapshot, StoreError> {
        let index = self
            .branches
            .read()
            .map_err(|_| StoreError::poisoned("branch index"))?;
        let branches = index
            .iter()
            .map(|(branch_id, filed)| BranchSummary {
                branch_id: branch_id.clone(),
                thoughts: filed.len(),
                last_seq: filed.last().map(|entry| entry.seq).unwrap_or(0),
            })
            .collect();
        Ok(EngineSnapshot {
            thought_count: self.thought_count(),
            branches,
        })
    }
}

fn branch_names(index: &BTreeMap<BranchId, Vec<HistoryEntry>>) -> Vec<String> {
    index.keys().map(|id| id.as_str().to_string()).collect()
}
