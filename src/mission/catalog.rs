use super::types::Mission;
use crate::error::CatalogError;

pub const MISSION_COUNT: usize = 5;
pub const JIGSAW_PIECES: usize = 12;

pub(crate) const BUILTIN_SOURCES: [&str; MISSION_COUNT] = [
    include_str!("../../missions/mission_01.toml"),
    include_str!("../../missions/mission_02.toml"),
    include_str!("../../missions/mission_03.toml"),
    include_str!("../../missions/mission_04.toml"),
    include_str!("../../missions/mission_05.toml"),
];

#[derive(Debug, Clone)]
pub struct Catalog {
    missions: Vec<Mission>,
}

impl Catalog {
    pub fn new(missions: Vec<Mission>) -> Result<Self, CatalogError> {
        if missions.len() != MISSION_COUNT {
            return Err(CatalogError::WrongCount {
                expected: MISSION_COUNT,
                found: missions.len(),
            });
        }

        for (position, mission) in missions.iter().enumerate() {
            let id = mission.id();
            if usize::from(id) != position + 1 {
                return Err(CatalogError::OutOfOrder { position, id });
            }
            let count = mission.hints().len();
            if !(1..=3).contains(&count) {
                return Err(CatalogError::HintCount { id, count });
            }
            if mission.challenge.answer.trim().is_empty() {
                return Err(CatalogError::EmptyAnswer(id));
            }
            check_jigsaw(mission)?;
        }

        Ok(Catalog { missions })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        let mut missions = Vec::with_capacity(MISSION_COUNT);
        for (index, source) in BUILTIN_SOURCES.iter().enumerate() {
            let mission = toml::from_str(source).map_err(|e| CatalogError::Builtin {
                index,
                message: e.to_string(),
            })?;
            missions.push(mission);
        }
        Catalog::new(missions)
    }

    pub fn get(&self, id: u8) -> Option<&Mission> {
        let index = usize::from(id).checked_sub(1)?;
        self.missions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mission> {
        self.missions.iter()
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }
}

fn check_jigsaw(mission: &Mission) -> Result<(), CatalogError> {
    let id = mission.id();
    let table = match (&mission.jigsaw, mission.is_puzzle()) {
        (Some(table), true) => table,
        (None, true) => return Err(CatalogError::MissingJigsaw(id)),
        (Some(_), false) => return Err(CatalogError::UnexpectedJigsaw(id)),
        (None, false) => return Ok(()),
    };

    let mut seen = [false; JIGSAW_PIECES];
    let bad = || CatalogError::BadJigsaw {
        id,
        pieces: JIGSAW_PIECES,
    };
    if table.pieces.len() != JIGSAW_PIECES {
        return Err(bad());
    }
    for piece in &table.pieces {
        let slot = usize::from(piece.correct_slot);
        if !(1..=JIGSAW_PIECES).contains(&slot) || seen[slot - 1] {
            return Err(bad());
        }
        seen[slot - 1] = true;
    }
    Ok(())
}
