pub mod catalog;
pub mod loader;
pub mod types;

pub use catalog::{Catalog, JIGSAW_PIECES, MISSION_COUNT};
pub use loader::{load_catalog, load_mission};
pub use types::{Challenge, JigsawTable, Location, Mission, MissionKind, MissionMeta, Narrative, PieceSpec};
