use super::state::ProgressionState;
use crate::mission::{Catalog, Mission};

#[derive(Debug, Clone, Copy)]
pub struct MapEntry<'c> {
    pub mission: &'c Mission,
    pub unlocked: bool,
    pub completed: bool,
}

pub fn map_overview<'c>(catalog: &'c Catalog, state: &ProgressionState) -> Vec<MapEntry<'c>> {
    catalog
        .iter()
        .map(|mission| MapEntry {
            mission,
            unlocked: state.is_unlocked(mission.id()),
            completed: state.is_completed(mission.id()),
        })
        .collect()
}
