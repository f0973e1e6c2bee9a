use std::fmt;

use thiserror::Error;

use crate::category::Category;

/// What a [`PositionIndex`](crate::PositionIndex) lookup was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMiss {
    Offset(usize),
    Verse(u32),
}

impl fmt::Display for LookupMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupMiss::Offset(offset) => write!(f, "offset {}", offset),
            LookupMiss::Verse(number) => write!(f, "verse {}", number),
        }
    }
}

#[derive(Error, Debug)]
pub enum NavError {
    #[error("invalid category tag: {0}")]
    InvalidCategory(i64),
    #[error("a verse range is selected; no category is active")]
    NoActiveCategory,
    #[error("{category} index {index} is below 1")]
    OutOfRangeIndex { category: Category, index: u32 },
    #[error("unknown verse number: {0}")]
    UnknownVerseNumber(u32),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] rusqlite::Error),
    #[error("storage query failed: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("{0} is not in the current position index")]
    IndexLookupMiss(LookupMiss),
}

impl NavError {
    /// Misses the presentation layer can turn into a no-op.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NavError::IndexLookupMiss(_) | NavError::UnknownVerseNumber(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
