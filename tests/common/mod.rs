#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use scavenger_hunt::game::ProgressionState;
use scavenger_hunt::store::PlayerRecord;
use scavenger_hunt::{
    Catalog, GameSession, MemoryStore, Notifier, NotifyError, PersistError, PlayerIdentity,
    ProgressStore, SessionToken,
};

/// Remembers every notification it was asked to send.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Vec<(String, String)>,
    pub fail: bool,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, email: &str, display_name: &str) -> Result<(), NotifyError> {
        self.sent.push((email.to_string(), display_name.to_string()));
        if self.fail {
            return Err(NotifyError("smtp down".into()));
        }
        Ok(())
    }
}

/// Every save fails; loads see nothing (or fail when `fail_load`).
#[derive(Debug, Default)]
pub struct BrokenStore {
    pub fail_load: bool,
}

impl ProgressStore for BrokenStore {
    fn load(&self, _email: &str) -> Result<Option<ProgressionState>, PersistError> {
        if self.fail_load {
            return Err(PersistError::Unavailable("offline".into()));
        }
        Ok(None)
    }

    fn save(&mut self, _state: &ProgressionState) -> Result<(), PersistError> {
        Err(PersistError::Unavailable("offline".into()))
    }

    fn records(&self) -> Result<Vec<PlayerRecord>, PersistError> {
        Err(PersistError::Unavailable("offline".into()))
    }
}

pub fn alice() -> PlayerIdentity {
    PlayerIdentity::new("Alice", "alice@example.com").unwrap()
}

pub fn token() -> SessionToken {
    SessionToken::new("test-token")
}

pub fn new_session<'c, S: ProgressStore, N: Notifier>(
    catalog: &'c Catalog,
    store: S,
    notifier: N,
) -> GameSession<'c, S, N> {
    GameSession::with_rng(catalog, store, notifier, StdRng::seed_from_u64(2024))
}

/// Registers Alice on a fresh memory store.
pub fn registered<'c>(
    catalog: &'c Catalog,
) -> GameSession<'c, MemoryStore, RecordingNotifier> {
    let mut session = new_session(catalog, MemoryStore::new(), RecordingNotifier::default());
    session.register_or_load(token(), alice()).unwrap();
    session
}

/// Answers for missions 1..=5, in order.
pub fn answers(catalog: &Catalog) -> Vec<String> {
    catalog.iter().map(|m| m.challenge.answer.clone()).collect()
}

pub fn solve<S: ProgressStore, N: Notifier>(session: &mut GameSession<'_, S, N>, id: u8) {
    let answer = session.catalog().get(id).unwrap().challenge.answer.clone();
    session.select(id).unwrap();
    session.submit(&answer).unwrap();
}
