#![forbid(unsafe_code)]

pub mod input;
pub mod response;
pub mod thought;

pub use input::{ThoughtInput, ValidationError};
pub use response::ThoughtResponse;
pub use thought::{Thought, ThoughtKind};

pub mod ids {
    use std::fmt;
    use thiserror::Error;

    /// 1-based position of a thought in the caller's sequence.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ThoughtNumber(u32);

    impl ThoughtNumber {
        pub fn get(self) -> u32 {
            self.0
        }

        pub fn try_new(value: i64) -> Result<Self, ThoughtNumberError> {
            if value < 1 {
                return Err(ThoughtNumberError::NotPositive);
            }
            u32::try_from(value)
                .map(Self)
                .map_err(|_| ThoughtNumberError::TooLarge)
        }
    }

    impl fmt::Display for ThoughtNumber {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
    pub enum ThoughtNumberError {
        #[error("must be a positive number")]
        NotPositive,
        #[error("exceeds the supported range")]
        TooLarge,
    }

    /// Caller-chosen branch label, kept byte for byte as supplied.
    #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct BranchId(String);

    impl BranchId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, BranchIdError> {
            let value = value.into();
            if value.is_empty() {
                return Err(BranchIdError::Empty);
            }
            Ok(Self(value))
        }
    }

    impl fmt::Display for BranchId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
    pub enum BranchIdError {
        #[error("branchId must be a non-empty string")]
        Empty,
    }
}
