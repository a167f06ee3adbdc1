use thiserror::Error;

use crate::game::Screen;

/// A transition the rules do not allow. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("display name must not be empty")]
    EmptyName,

    #[error("email must not be empty")]
    EmptyEmail,

    #[error("already registered as {0}")]
    AlreadyRegistered(String),

    #[error("no player registered yet")]
    NotRegistered,

    #[error("unknown mission {0}")]
    UnknownMission(u8),

    #[error("mission {0} is locked")]
    MissionLocked(u8),

    #[error("not allowed from the {0} screen")]
    WrongScreen(Screen),

    #[error("mission {0} has no jigsaw")]
    NoPuzzle(u8),

    #[error("no new hint available for mission {0}")]
    NoHintAvailable(u8),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt progress record for {email}: {source}")]
    Corrupt {
        email: String,
        source: serde_json::Error,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
#[error("completion notification failed: {0}")]
pub struct NotifyError(pub String);

#[derive(Debug, Error)]
#[error("authentication failed: {0}")]
pub struct AuthError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("expected {expected} missions, found {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("mission at position {position} has id {id}")]
    OutOfOrder { position: usize, id: u8 },

    #[error("mission {id} has {count} hints, expected 1 to 3")]
    HintCount { id: u8, count: usize },

    #[error("mission {0} has an empty answer")]
    EmptyAnswer(u8),

    #[error("puzzle mission {0} has no jigsaw table")]
    MissingJigsaw(u8),

    #[error("mission {0} is not a puzzle but carries a jigsaw table")]
    UnexpectedJigsaw(u8),

    #[error("jigsaw of mission {id} is not a permutation of slots 1..={pieces}")]
    BadJigsaw { id: u8, pieces: usize },

    #[error("built-in mission {index} failed to parse: {message}")]
    Builtin { index: usize, message: String },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Only the registration load can fail this way; every later save is
    // fire-and-forget.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl GameError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            GameError::Validation(e) => Some(e),
            GameError::Persist(_) => None,
        }
    }
}
