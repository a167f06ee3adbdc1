//! Location-based scavenger hunt: five missions unlocked one after the
//! other, answer checking, attempt-gated hints and a swap jigsaw.

pub mod answer;
pub mod config;
pub mod error;
pub mod game;
pub mod jigsaw;
pub mod mission;
pub mod notify;
pub mod store;

pub use config::Config;
pub use error::{AuthError, CatalogError, GameError, NotifyError, PersistError, ValidationError};
pub use game::{GameSession, PlayerIdentity, ProgressionState, Screen, SubmitOutcome};
pub use mission::{Catalog, Mission, MissionKind};
pub use notify::{LogNotifier, Notifier};
pub use store::{AnonymousAuthenticator, Authenticator, JsonFileStore, MemoryStore, ProgressStore, SessionToken};
