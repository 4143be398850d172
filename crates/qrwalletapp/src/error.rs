use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A reorder referenced a position outside the current sequence.
    #[error("Invalid move {from} -> {to}: wallet holds {len} codes")]
    InvalidIndex { from: usize, to: usize, len: usize },

    #[error("Cannot store an empty code")]
    EmptyContent,

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Index {0} not found in wallet")]
    IndexNotFound(usize),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WalletError>;
