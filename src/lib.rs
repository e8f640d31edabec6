#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use thiserror::Error;

pub mod round;
pub use round::{InputMode, Intent, LetterSet, Round, RoundState};

pub mod ruleset;
pub use ruleset::{Ruleset, Variant};

pub mod source;
pub use source::WordSource;

pub mod session;
pub use session::Session;

pub mod player;
pub use player::Player;

#[cfg(all(feature = "fancy", feature = "parallel"))]
pub mod harness;
#[cfg(all(feature = "fancy", feature = "parallel"))]
pub use harness::Harness;

pub mod perf;
pub use perf::{Perf, Summary};

/// The errors that `treeguessr` can produce.
#[derive(Debug, Error)]
pub enum TreeguessrError {
    #[error("round could not be started")]
    Round {
        #[from]
        kind: RoundError,
    },

    #[error("word source is unavailable")]
    Source {
        #[from]
        kind: SourceError,
    },

    #[error("general IO error")]
    Printing(#[from] std::io::Error),

    #[error("the simulation harness encountered an error")]
    Harness {
        #[from]
        kind: HarnessError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    /// [`Round::start()`] was handed an empty candidate list.
    #[error("there are no candidate phrases to pick a secret from")]
    NoCandidates,

    /// The chosen candidate has nothing a player could guess.
    #[error("the phrase \"{0}\" cannot be used as a secret")]
    InvalidSecret(String),
}

#[derive(Debug, Error)]
pub enum SourceError {
    /// Every line of the word list was blank or unusable.
    #[error("the word list has no usable phrases")]
    Empty,

    /// The word list could not be read.
    #[error("could not read the word list at {path}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A round was requested before any word list loaded.
    #[error("no word list is loaded")]
    NotLoaded,
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("no players have been added to the harness")]
    NoPlayersAdded,

    #[error("the harness was asked to simulate zero rounds")]
    ZeroRounds,

    #[cfg(feature = "serde")]
    #[error("trouble serializing the simulation record")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T, E = TreeguessrError> = std::result::Result<T, E>;
