//! Error taxonomy for the quiz.
//!
//! None of these escape the controller: loaders degrade to empty lists,
//! failed assets drop out of the playable set, and bad input is a no-op.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Error, Debug)]
pub enum QuizError {
    /// Catalog or recipient file could not be read or parsed
    #[error("could not load {path}: {reason}")]
    DataLoad { path: PathBuf, reason: String },

    /// None of a sound's assets could be decoded
    #[error("could not preload sound '{id}': {reason}")]
    AssetLoad { id: String, reason: String },

    /// Rejected operation input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl QuizError {
    pub fn data_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        QuizError::DataLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn asset_load(id: impl Into<String>, reason: impl ToString) -> Self {
        QuizError::AssetLoad {
            id: id.into(),
            reason: reason.to_string(),
        }
    }
}
