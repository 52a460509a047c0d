//! Error types for chess-motifs-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Illegal move '{uci}' in position {fen}")]
    IllegalMove { uci: String, fen: String },

    #[error("Move {uci} does not deliver checkmate in position {fen}")]
    NotCheckmate { uci: String, fen: String },

    #[error("Principal variation is empty")]
    EmptyPv,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
