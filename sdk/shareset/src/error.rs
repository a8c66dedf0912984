use thiserror::Error;
use zeroth_threshold::{DecodeError, ShareId, ThresholdError};

/// Share-set errors
#[derive(Debug, Error)]
pub enum ShareSetError {
    #[error("invalid share-set document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid threshold: k={k}, n={n}")]
    InvalidThreshold { k: usize, n: usize },

    #[error("invalid share index {0:?}: must be a positive integer")]
    InvalidIndex(String),

    #[error("share {0} is missing from the document")]
    MissingShare(ShareId),

    #[error("not enough shares: {available} available, need {need}")]
    NotEnoughShares { available: usize, need: usize },

    #[error("selection names {got} shares but the threshold is {need}")]
    SelectionSize { got: usize, need: usize },

    #[error("share {0} selected more than once")]
    DuplicateSelection(ShareId),

    #[error("invalid selection {0:?}: expected \"first\", \"available\" or a list like \"1,3,6\"")]
    InvalidSelection(String),

    #[error("share {index}: invalid base {base:?}")]
    InvalidBase { index: ShareId, base: String },

    #[error("share {index}: {source}")]
    Decode {
        index: ShareId,
        #[source]
        source: DecodeError,
    },

    #[error("reconstruction failed: {0}")]
    Threshold(#[from] ThresholdError),
}
