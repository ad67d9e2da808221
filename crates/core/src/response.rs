#![forbid(unsafe_code)]

use crate::thought::Thought;
use serde::{Deserialize, Serialize};

/// Progress summary returned for every accepted thought.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtResponse {
    pub thought_number: u32,
    pub total_thoughts: u32,
    pub next_thought_needed: bool,
    pub branches: Vec<String>,
    pub thought_history_length: u64,
}

impl ThoughtResponse {
    /// `branches` and `thought_history_length` must be read after the thought was committed.
    pub fn build(thought: &Thought, branches: Vec<String>, thought_history_length: u64) -> Self {
        Self {
            thought_number: thought.thought_number().get(),
            total_thoughts: thought.total_thoughts().get(),
            next_thought_needed: thought.next_thought_needed(),
            branches,
            thought_history_length,
        }
    }
}
