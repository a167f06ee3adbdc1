use rand::rngs::StdRng;
use rand::SeedableRng;

use super::hints::{available_hint_count, should_auto_reveal};
use super::map::{map_overview, MapEntry};
use super::state::{PlayerIdentity, ProgressionState, Screen};
use crate::answer;
use crate::error::{GameError, ValidationError};
use crate::jigsaw::Jigsaw;
use crate::mission::{Catalog, Mission};
use crate::notify::Notifier;
use crate::store::{ProgressStore, SessionToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct { mission_id: u8, all_complete: bool },
    // revealed_hint: index of the hint this failure disclosed
    Incorrect {
        mission_id: u8,
        attempts: u32,
        revealed_hint: Option<usize>,
    },
}

pub struct GameSession<'c, S, N> {
    catalog: &'c Catalog,
    store: S,
    notifier: N,
    state: ProgressionState,
    token: Option<SessionToken>,
    jigsaw: Option<Jigsaw>,
    rng: StdRng,
    persist_failures: usize,
}

impl<'c, S: ProgressStore, N: Notifier> GameSession<'c, S, N> {
    pub fn new(catalog: &'c Catalog, store: S, notifier: N) -> Self {
        Self::with_rng(catalog, store, notifier, StdRng::from_entropy())
    }

    pub fn with_rng(catalog: &'c Catalog, store: S, notifier: N, rng: StdRng) -> Self {
        GameSession {
            catalog,
            store,
            notifier,
            state: ProgressionState::default(),
            token: None,
            jigsaw: None,
            rng,
            persist_failures: 0,
        }
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn persist_failures(&self) -> usize {
        self.persist_failures
    }

    pub fn jigsaw(&self) -> Option<&Jigsaw> {
        self.jigsaw.as_ref()
    }

    pub fn map(&self) -> Vec<MapEntry<'c>> {
        map_overview(self.catalog, &self.state)
    }

    pub fn current_mission(&self) -> Option<&'c Mission> {
        match self.state.screen() {
            Screen::Mission => self.catalog.get(self.state.current_mission()),
            Screen::Home | Screen::Map => None,
        }
    }

    pub fn visible_hints(&self) -> &'c [String] {
        match self.current_mission() {
            Some(mission) => {
                let shown = self.state.hints_shown(mission.id()) as usize;
                let hints = mission.hints();
                &hints[..shown.min(hints.len())]
            }
            None => &[],
        }
    }

    /// home -> map. Picks up the stored progress for this email when there
    /// is any. A failing load rejects the registration.
    pub fn register_or_load(
        &mut self,
        token: SessionToken,
        identity: PlayerIdentity,
    ) -> Result<&ProgressionState, GameError> {
        if self.state.screen() != Screen::Home {
            return Err(ValidationError::AlreadyRegistered(self.state.player().email().to_string()).into());
        }

        let state = match self.store.load(identity.email())? {
            Some(prior) => {
                log::info!(
                    "[SESSION] resume player:{} completed:{}/{}",
                    identity.email(),
                    prior.completed_count(),
                    self.catalog.len()
                );
                prior.with_player(identity)
            }
            None => {
                log::info!("[SESSION] new player:{}", identity.email());
                ProgressionState::fresh(identity)
            }
        };

        self.state = state.with_screen(Screen::Map, 0);
        self.token = Some(token);
        self.jigsaw = None;
        self.persist();
        Ok(&self.state)
    }

    pub fn select(&mut self, mission_id: u8) -> Result<&'c Mission, ValidationError> {
        self.require_screen(Screen::Map)?;
        let mission = self
            .catalog
            .get(mission_id)
            .ok_or(ValidationError::UnknownMission(mission_id))?;
        if !self.state.is_unlocked(mission_id) {
            return Err(ValidationError::MissionLocked(mission_id));
        }

        self.jigsaw = match (&mission.jigsaw, mission.is_puzzle()) {
            (Some(table), true) => Some(Jigsaw::new(&table.pieces, &mut self.rng)),
            _ => None,
        };
        self.state = self.state.with_screen(Screen::Mission, mission_id);
        self.persist();
        Ok(mission)
    }

    pub fn submit(&mut self, submitted: &str) -> Result<SubmitOutcome, ValidationError> {
        let mission = self.open_mission()?;
        let id = mission.id();
        self.state = self.state.with_attempt(id);

        if answer::check(mission, submitted).is_correct() {
            return Ok(self.complete(mission));
        }

        let attempts = self.state.attempts(id);
        let shown = self.state.hints_shown(id);
        let total = mission.hints().len();
        let revealed_hint = if should_auto_reveal(attempts, total, shown) {
            self.state = self
                .state
                .with_hint_revealed(id, available_hint_count(attempts, total));
            log::debug!("[HINT] auto reveal mission:{} hint:{}", id, shown + 1);
            Some(shown as usize)
        } else {
            None
        };

        self.persist();
        Ok(SubmitOutcome::Incorrect {
            mission_id: id,
            attempts,
            revealed_hint,
        })
    }

    pub fn show_next_hint(&mut self) -> Result<&'c str, ValidationError> {
        let mission = self.open_mission()?;
        let id = mission.id();
        let available = available_hint_count(self.state.attempts(id), mission.hints().len());
        let shown = self.state.hints_shown(id);
        if shown >= available {
            return Err(ValidationError::NoHintAvailable(id));
        }

        self.state = self.state.with_hint_revealed(id, available);
        self.persist();
        Ok(&mission.hints()[shown as usize])
    }

    pub fn back(&mut self) -> Result<(), ValidationError> {
        self.require_screen(Screen::Mission)?;
        self.state = self.state.with_screen(Screen::Map, 0);
        self.jigsaw = None;
        self.persist();
        Ok(())
    }

    pub fn reset(&mut self) {
        let player = self.state.player().clone();
        if !player.is_empty() {
            log::info!("[SESSION] reset player:{}", player.email());
            let wiped = ProgressionState::fresh(player);
            if let Err(e) = self.store.save(&wiped) {
                self.persist_failed(&wiped, &e);
            }
        }
        self.state = ProgressionState::default();
        self.token = None;
        self.jigsaw = None;
    }

    pub fn swap_pieces(&mut self, slot_a: u8, slot_b: u8) -> Result<bool, ValidationError> {
        Ok(self.open_jigsaw()?.swap(slot_a, slot_b))
    }

    pub fn shuffle_jigsaw(&mut self) -> Result<(), ValidationError> {
        let mission = self.open_mission()?;
        let jigsaw = self
            .jigsaw
            .as_mut()
            .ok_or(ValidationError::NoPuzzle(mission.id()))?;
        jigsaw.shuffle(&mut self.rng);
        Ok(())
    }

    // Skips the arrangement; the code is still required
    pub fn solve_jigsaw(&mut self) -> Result<(), ValidationError> {
        self.open_jigsaw()?.reset();
        Ok(())
    }

    fn complete(&mut self, mission: &Mission) -> SubmitOutcome {
        let id = mission.id();
        log::info!(
            "[MISSION] complete player:{} mission:{} attempts:{} hints:{}",
            self.state.player().email(),
            id,
            self.state.attempts(id),
            self.state.hints_shown(id)
        );

        self.state = self.state.with_completed(id).with_screen(Screen::Map, 0);
        self.jigsaw = None;

        let all_complete = self.state.all_complete();
        if all_complete && !self.state.completion_notified() {
            self.state = self.state.with_completion_notified();
            let player = self.state.player();
            if let Err(e) = self.notifier.notify(player.email(), player.display_name()) {
                log::warn!("[NOTIFY] failed player:{} error:{}", player.email(), e);
            }
        }

        self.persist();
        SubmitOutcome::Correct {
            mission_id: id,
            all_complete,
        }
    }

    fn require_screen(&self, screen: Screen) -> Result<(), ValidationError> {
        match self.state.screen() {
            current if current == screen => Ok(()),
            Screen::Home => Err(ValidationError::NotRegistered),
            current => Err(ValidationError::WrongScreen(current)),
        }
    }

    fn open_mission(&self) -> Result<&'c Mission, ValidationError> {
        self.require_screen(Screen::Mission)?;
        let id = self.state.current_mission();
        self.catalog.get(id).ok_or(ValidationError::UnknownMission(id))
    }

    fn open_jigsaw(&mut self) -> Result<&mut Jigsaw, ValidationError> {
        let mission = self.open_mission()?;
        self.jigsaw
            .as_mut()
            .ok_or(ValidationError::NoPuzzle(mission.id()))
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            let state = self.state.clone();
            self.persist_failed(&state, &e);
        }
    }

    fn persist_failed(&mut self, state: &ProgressionState, error: &crate::error::PersistError) {
        self.persist_failures += 1;
        log::warn!(
            "[STORE] save failed player:{} error:{}",
            state.player().email(),
            error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::LogNotifier;
    use crate::store::MemoryStore;

    fn session(catalog: &Catalog) -> GameSession<'_, MemoryStore, LogNotifier> {
        let mut session = GameSession::with_rng(
            catalog,
            MemoryStore::new(),
            LogNotifier,
            StdRng::seed_from_u64(17),
        );
        let player = PlayerIdentity::new("Alice", "alice@example.com").unwrap();
        session
            .register_or_load(SessionToken::new("t"), player)
            .unwrap();
        session
    }

    #[test]
    fn actions_before_registration_are_rejected() {
        let catalog = Catalog::builtin().unwrap();
        let mut session = GameSession::new(&catalog, MemoryStore::new(), LogNotifier);
        assert_eq!(session.select(1).unwrap_err(), ValidationError::NotRegistered);
        assert_eq!(session.submit("15").unwrap_err(), ValidationError::NotRegistered);
        assert_eq!(session.store().saves(), 0);
    }

    #[test]
    fn visible_hints_follow_counter() {
        let catalog = Catalog::builtin().unwrap();
        let mut session = session(&catalog);
        session.select(1).unwrap();
        assert!(session.visible_hints().is_empty());

        session.submit("1").unwrap();
        session.submit("2").unwrap();
        assert_eq!(session.visible_hints(), &catalog.get(1).unwrap().hints()[..1]);
    }

    #[test]
    fn jigsaw_only_on_puzzle_mission() {
        let catalog = Catalog::builtin().unwrap();
        let mut session = session(&catalog);
        session.select(1).unwrap();
        assert!(session.jigsaw().is_none());
        assert_eq!(session.swap_pieces(1, 2).unwrap_err(), ValidationError::NoPuzzle(1));

        session.submit("15").unwrap();
        session.select(2).unwrap();
        assert!(session.jigsaw().is_some());
        session.back().unwrap();
        assert!(session.jigsaw().is_none());
    }

    #[test]
    fn back_requires_open_mission() {
        let catalog = Catalog::builtin().unwrap();
        let mut session = session(&catalog);
        assert_eq!(
            session.back().unwrap_err(),
            ValidationError::WrongScreen(Screen::Map)
        );
    }
}
