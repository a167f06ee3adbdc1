use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ValidationError;
use crate::mission::MISSION_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Home,
    Map,
    Mission,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Home => "home",
            Screen::Map => "map",
            Screen::Mission => "mission",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    display_name: String,
    email: String,
}

impl PlayerIdentity {
    pub fn new(display_name: &str, email: &str) -> Result<Self, ValidationError> {
        let display_name = display_name.trim();
        let email = email.trim();
        if display_name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if email.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        Ok(PlayerIdentity {
            display_name: display_name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_empty()
    }
}

/// One player's journey. Every `with_*` call returns a new snapshot; the
/// counters only ever grow and completion flags are never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionState {
    current_screen: Screen,
    current_mission_id: u8,
    completed_missions: [bool; MISSION_COUNT],
    #[serde(default)]
    mission_attempts: BTreeMap<u8, u32>,
    #[serde(default)]
    hints_shown: BTreeMap<u8, u32>,
    player: PlayerIdentity,
    #[serde(default)]
    completion_notified: bool,
}

impl ProgressionState {
    pub fn fresh(player: PlayerIdentity) -> Self {
        ProgressionState {
            player,
            ..ProgressionState::default()
        }
    }

    pub fn screen(&self) -> Screen {
        self.current_screen
    }

    /// 0 when no mission is open.
    pub fn current_mission(&self) -> u8 {
        self.current_mission_id
    }

    pub fn player(&self) -> &PlayerIdentity {
        &self.player
    }

    pub fn completed_missions(&self) -> &[bool; MISSION_COUNT] {
        &self.completed_missions
    }

    pub fn is_completed(&self, id: u8) -> bool {
        slot(id).is_some_and(|i| self.completed_missions[i])
    }

    pub fn attempts(&self, id: u8) -> u32 {
        self.mission_attempts.get(&id).copied().unwrap_or(0)
    }

    pub fn hints_shown(&self, id: u8) -> u32 {
        self.hints_shown.get(&id).copied().unwrap_or(0)
    }

    pub fn completion_notified(&self) -> bool {
        self.completion_notified
    }

    pub fn is_unlocked(&self, id: u8) -> bool {
        match slot(id) {
            Some(0) => true,
            Some(i) => self.completed_missions[i - 1],
            None => false,
        }
    }

    pub fn all_complete(&self) -> bool {
        self.completed_missions.iter().all(|&done| done)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_missions.iter().filter(|&&done| done).count()
    }

    pub fn next_mission(&self) -> Option<u8> {
        self.completed_missions
            .iter()
            .position(|&done| !done)
            .map(|i| i as u8 + 1)
    }

    pub fn total_attempts(&self) -> u32 {
        self.mission_attempts.values().sum()
    }

    pub fn total_hints_shown(&self) -> u32 {
        self.hints_shown.values().sum()
    }

    pub fn with_player(&self, player: PlayerIdentity) -> Self {
        ProgressionState {
            player,
            ..self.clone()
        }
    }

    pub fn with_screen(&self, screen: Screen, mission_id: u8) -> Self {
        ProgressionState {
            current_screen: screen,
            current_mission_id: mission_id,
            ..self.clone()
        }
    }

    pub fn with_attempt(&self, id: u8) -> Self {
        let mut next = self.clone();
        let count = next.mission_attempts.entry(id).or_insert(0);
        *count = count.saturating_add(1);
        next
    }

    /// Shows one more hint, never going past `cap`.
    pub fn with_hint_revealed(&self, id: u8, cap: u32) -> Self {
        let mut next = self.clone();
        let shown = next.hints_shown.entry(id).or_insert(0);
        if *shown < cap {
            *shown += 1;
        }
        next
    }

    pub fn with_completed(&self, id: u8) -> Self {
        let mut next = self.clone();
        if let Some(i) = slot(id) {
            next.completed_missions[i] = true;
        }
        next
    }

    pub fn with_completion_notified(&self) -> Self {
        ProgressionState {
            completion_notified: true,
            ..self.clone()
        }
    }
}

fn slot(id: u8) -> Option<usize> {
    let index = usize::from(id).checked_sub(1)?;
    (index < MISSION_COUNT).then_some(index)
}
