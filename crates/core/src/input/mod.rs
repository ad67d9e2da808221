#![forbid(unsafe_code)]

use crate::ids::{BranchId, ThoughtNumber};
use crate::thought::{Thought, ThoughtKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller-supplied thought fields, as they arrive over the wire.
///
/// Numbers stay signed here so that non-positive values reach validation instead of
/// failing deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtInput {
    pub thought: String,
    pub next_thought_needed: bool,
    pub thought_number: i64,
    pub total_thoughts: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_revision: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revises_thought: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_from_thought: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_more_thoughts: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("thought must be a non-empty string")]
    EmptyThought,
    #[error("thoughtNumber must be a positive number")]
    ThoughtNumber,
    #[error("totalThoughts must be a positive number")]
    TotalThoughts,
    #[error("{field} exceeds the supported range")]
    OutOfRange { field: &'static str },
}

/// The validated scalar fields, before classification and normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Declared {
    pub thought_number: ThoughtNumber,
    pub total_thoughts: ThoughtNumber,
}

impl ThoughtInput {
    pub fn new(
        thought: impl Into<String>,
        next_thought_needed: bool,
        thought_number: i64,
        total_thoughts: i64,
    ) -> Self {
        Self {
            thought: thought.into(),
            next_thought_needed,
            thought_number,
            total_thoughts,
            ..Self::default()
        }
    }

    pub fn revising(mut self, revises_thought: i64) -> Self {
        self.is_revision = Some(true);
        self.revises_thought = Some(revises_thought);
        self
    }

    pub fn branching(mut self, branch_from_thought: i64, branch_id: impl Into<String>) -> Self {
        self.branch_from_thought = Some(branch_from_thought);
        self.branch_id = Some(branch_id.into());
        self
    }

    pub fn needs_more(mut self, needs_more_thoughts: bool) -> Self {
        self.needs_more_thoughts = Some(needs_more_thoughts);
        self
    }

    /// First violated rule wins; nothing else is inspected after it.
    pub fn validate(&self) -> Result<Declared, ValidationError> {
        if self.thought.trim().is_empty() {
            return Err(ValidationError::EmptyThought);
        }
        if self.thought_number < 1 {
            return Err(ValidationError::ThoughtNumber);
        }
        if self.total_thoughts < 1 {
            return Err(ValidationError::TotalThoughts);
        }
        let thought_number = ThoughtNumber::try_new(self.thought_number)
            .map_err(|_| ValidationError::OutOfRange {
                field: "thoughtNumber",
            })?;
        let total_thoughts = ThoughtNumber::try_new(self.total_thoughts)
            .map_err(|_| ValidationError::OutOfRange {
                field: "totalThoughts",
            })?;
        Ok(Declared {
            thought_number,
            total_thoughts,
        })
    }

    /// Picks the variant from the optional fields. Revision beats branch beats regular.
    ///
    /// Reference numbers that are not positive cannot form a variant and count as absent.
    pub fn classify(&self) -> ThoughtKind {
        let reference = |value: Option<i64>| value.and_then(|v| ThoughtNumber::try_new(v).ok());

        if self.is_revision == Some(true)
            && let Some(revises_thought) = reference(self.revises_thought)
        {
            return ThoughtKind::Revision { revises_thought };
        }

        if let Some(branch_from_thought) = reference(self.branch_from_thought)
            && let Some(branch_id) = self
                .branch_id
                .as_deref()
                .and_then(|id| BranchId::try_new(id).ok())
        {
            return ThoughtKind::Branch {
                branch_from_thought,
                branch_id,
            };
        }

        ThoughtKind::Regular {
            needs_more_thoughts: self.needs_more_thoughts.unwrap_or(true),
        }
    }

    pub fn into_thought(self) -> Result<Thought, ValidationError> {
        let declared = self.validate()?;
        let kind = self.classify();
        Ok(Thought::new(
            self.thought,
            declared.thought_number,
            declared.total_thoughts,
            self.next_thought_needed,
            kind,
        ))
    }
}
