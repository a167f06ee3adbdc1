//! Progress persistence, keyed by player email. Last write wins.

pub mod auth;
pub mod file;
pub mod memory;
pub mod stats;

pub use auth::{AnonymousAuthenticator, Authenticator, SessionToken};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use stats::{GlobalStats, MissionAttempts};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::game::ProgressionState;

pub trait ProgressStore {
    fn load(&self, email: &str) -> Result<Option<ProgressionState>, PersistError>;

    /// Overwrites the whole record for the state's player.
    fn save(&mut self, state: &ProgressionState) -> Result<(), PersistError>;

    fn records(&self) -> Result<Vec<PlayerRecord>, PersistError>;
}

impl<S: ProgressStore + ?Sized> ProgressStore for &mut S {
    fn load(&self, email: &str) -> Result<Option<ProgressionState>, PersistError> {
        (**self).load(email)
    }

    fn save(&mut self, state: &ProgressionState) -> Result<(), PersistError> {
        (**self).save(state)
    }

    fn records(&self) -> Result<Vec<PlayerRecord>, PersistError> {
        (**self).records()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub state: ProgressionState,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl PlayerRecord {
    pub fn touch(previous: Option<PlayerRecord>, state: &ProgressionState, now: DateTime<Utc>) -> Self {
        let (created_at, completed_at) = match previous {
            Some(prev) => (prev.created_at, prev.completed_at),
            None => (now, None),
        };
        let completed_at = match completed_at {
            Some(at) if state.all_complete() => Some(at),
            _ if state.all_complete() => Some(now),
            _ => None,
        };
        PlayerRecord {
            state: state.clone(),
            created_at,
            last_activity: now,
            completed_at,
        }
    }

    pub fn email(&self) -> &str {
        self.state.player().email()
    }
}
