//! This module defines the error types used throughout the crate.

use thiserror::Error;

/// Errors from applying notation to a cube.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    /// `apply_move` was given text which does not parse to exactly one move.
    #[error("expected a single move but `{text}` contains {count} moves")]
    NotSingleMove {
        /// The offending text.
        text: String,
        /// How many moves it parsed to.
        count: usize,
    },
}

/// Errors from reading a facelets snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FaceletsError {
    /// The snapshot did not contain exactly 54 stickers.
    #[error("a facelets snapshot has 54 stickers, got {0}")]
    WrongLength(usize),
    /// A sticker was not one of the face letters `URFDLB`.
    #[error("invalid sticker `{ch}` at index {index}")]
    InvalidChar {
        /// Position of the sticker in the snapshot.
        index: usize,
        /// The character found there.
        ch: char,
    },
}

/// Errors from converting a facelets snapshot into pieces.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PieceError {
    /// The stickers at a corner slot do not form any corner piece.
    #[error("corner slot {0} does not hold a valid corner")]
    InvalidCorner(usize),
    /// The stickers at an edge slot do not form any edge piece.
    #[error("edge slot {0} does not hold a valid edge")]
    InvalidEdge(usize),
}

/// A command sent to the cube link failed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cube link: {0}")]
pub struct LinkError(pub String);

/// Errors from the solve history store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("history io: {0}")]
    Io(#[from] std::io::Error),
    /// The stored history was not valid JSON for a list of solves.
    #[error("history json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the notation trainer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainerError {
    /// The target sequence contained no moves.
    #[error("cannot train on an empty sequence")]
    EmptySequence,
}

/// Errors from loading a timer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration was not valid TOML for a timer config.
    #[error("config toml: {0}")]
    Toml(#[from] toml::de::Error),
}
