#![forbid(unsafe_code)]

use crate::ids::{BranchId, ThoughtNumber};

/// Kind-specific payload of a thought. Exactly one applies to every accepted thought.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThoughtKind {
    Regular {
        needs_more_thoughts: bool,
    },
    Revision {
        revises_thought: ThoughtNumber,
    },
    Branch {
        branch_from_thought: ThoughtNumber,
        branch_id: BranchId,
    },
}

impl ThoughtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular { .. } => "regular",
            Self::Revision { .. } => "revision",
            Self::Branch { .. } => "branch",
        }
    }
}

/// A canonical thought: validated, classified and normalized.
///
/// Only [`crate::ThoughtInput::into_thought`] builds one, so `total_thoughts >= thought_number`
/// holds for every value of this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thought {
    text: String,
    thought_number: ThoughtNumber,
    total_thoughts: ThoughtNumber,
    next_thought_needed: bool,
    kind: ThoughtKind,
}

impl Thought {
    pub(crate) fn new(
        text: String,
        thought_number: ThoughtNumber,
        declared_total: ThoughtNumber,
        next_thought_needed: bool,
        kind: ThoughtKind,
    ) -> Self {
        Self {
            text,
            thought_number,
            total_thoughts: normalize_total(declared_total, thought_number),
            next_thought_needed,
            kind,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn thought_number(&self) -> ThoughtNumber {
        self.thought_number
    }

    pub fn total_thoughts(&self) -> ThoughtNumber {
        self.total_thoughts
    }

    pub fn next_thought_needed(&self) -> bool {
        self.next_thought_needed
    }

    pub fn kind(&self) -> &ThoughtKind {
        &self.kind
    }

    pub fn is_revision(&self) -> bool {
        matches!(self.kind, ThoughtKind::Revision { .. })
    }

    pub fn branch_id(&self) -> Option<&BranchId> {
        match &self.kind {
            ThoughtKind::Branch { branch_id, .. } => Some(branch_id),
            _ => None,
        }
    }
}

/// The stored estimate never under-reports the furthest step reached.
pub fn normalize_total(
    declared_total: ThoughtNumber,
    thought_number: ThoughtNumber,
) -> ThoughtNumber {
    declared_total.max(thought_number)
}
