pub mod hints;
pub mod map;
pub mod session;
pub mod state;

pub use hints::{available_hint_count, should_auto_reveal};
pub use map::{map_overview, MapEntry};
pub use session::{GameSession, SubmitOutcome};
pub use state::{PlayerIdentity, ProgressionState, Screen};
