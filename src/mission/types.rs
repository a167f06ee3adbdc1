use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Mission {
    pub meta: MissionMeta,
    pub location: Location,
    pub narrative: Narrative,
    pub challenge: Challenge,
    #[serde(default)]
    pub jigsaw: Option<JigsawTable>,
}

impl Mission {
    pub fn id(&self) -> u8 {
        self.meta.id
    }

    pub fn hints(&self) -> &[String] {
        &self.challenge.hints
    }

    pub fn is_puzzle(&self) -> bool {
        self.meta.kind == MissionKind::Puzzle
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MissionMeta {
    pub id: u8,
    pub name: String,
    pub kind: MissionKind,
}

/// Informational category. Only `Puzzle` changes how answers are checked.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MissionKind {
    Text,
    Puzzle,
    Calculation,
    Riddle,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Location {
    pub name: String,
    pub x: u32,
    pub y: u32,
    #[serde(default)]
    pub maps_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Narrative {
    pub description: String,
    #[serde(default)]
    pub story: Option<String>,
    // Found on site (QR codes and the like), always visible
    #[serde(default)]
    pub clues: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Challenge {
    pub answer: String,
    pub hints: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JigsawTable {
    pub pieces: Vec<PieceSpec>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PieceSpec {
    pub correct_slot: u8,
    pub image: String,
    pub display_number: u8,
}
