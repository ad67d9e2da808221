#![forbid(unsafe_code)]

use st_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("lock poisoned (what={what})")]
    Poisoned { what: &'static str },
    #[error("capacity exhausted (what={what})")]
    CapacityExhausted { what: &'static str },
}

impl StoreError {
    pub(crate) fn poisoned(what: &'static str) -> Self {
        Self::Poisoned { what }
    }

    pub(crate) fn exhausted(what: &'static str) -> Self {
        Self::CapacityExhausted { what }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("processing error: {0}")]
    Processing(#[from] StoreError),
}

impl EngineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
