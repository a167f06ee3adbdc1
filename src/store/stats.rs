use std::collections::BTreeMap;

use super::PlayerRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionAttempts {
    pub mission_id: u8,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalStats {
    pub total_players: usize,
    pub completed_games: usize,
    pub average_attempts: f64,
    /// Most attempted first.
    pub popular_missions: Vec<MissionAttempts>,
}

impl GlobalStats {
    pub fn from_records(records: &[PlayerRecord]) -> Self {
        let total_players = records.len();
        let completed_games = records.iter().filter(|r| r.completed_at.is_some()).count();

        let total_attempts: u64 = records
            .iter()
            .map(|r| u64::from(r.state.total_attempts()))
            .sum();
        let average_attempts = if total_players > 0 {
            total_attempts as f64 / total_players as f64
        } else {
            0.0
        };

        let mut per_mission: BTreeMap<u8, u32> = BTreeMap::new();
        for record in records {
            for id in 1..=crate::mission::MISSION_COUNT as u8 {
                let attempts = record.state.attempts(id);
                if attempts > 0 {
                    *per_mission.entry(id).or_insert(0) += attempts;
                }
            }
        }
        let mut popular_missions: Vec<MissionAttempts> = per_mission
            .into_iter()
            .map(|(mission_id, attempts)| MissionAttempts { mission_id, attempts })
            .collect();
        // stable sort keeps ties in mission order
        popular_missions.sort_by(|a, b| b.attempts.cmp(&a.attempts));

        GlobalStats {
            total_players,
            completed_games,
            average_attempts,
            popular_missions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PlayerIdentity, ProgressionState};
    use chrono::Utc;

    fn record(email: &str, attempts: &[(u8, u32)], complete: bool) -> PlayerRecord {
        let mut state = ProgressionState::fresh(PlayerIdentity::new("p", email).unwrap());
        for &(id, n) in attempts {
            for _ in 0..n {
                state = state.with_attempt(id);
            }
        }
        if complete {
            for id in 1..=5 {
                state = state.with_completed(id);
            }
        }
        PlayerRecord::touch(None, &state, Utc::now())
    }

    #[test]
    fn empty_store() {
        let stats = GlobalStats::from_records(&[]);
        assert_eq!(stats.total_players, 0);
        assert_eq!(stats.average_attempts, 0.0);
        assert!(stats.popular_missions.is_empty());
    }

    #[test]
    fn aggregates_players() {
        let records = vec![
            record("a@x", &[(1, 2), (2, 4)], true),
            record("b@x", &[(1, 1), (3, 1)], false),
        ];
        let stats = GlobalStats::from_records(&records);

        assert_eq!(stats.total_players, 2);
        assert_eq!(stats.completed_games, 1);
        assert_eq!(stats.average_attempts, 4.0);
        assert_eq!(
            stats.popular_missions,
            vec![
                MissionAttempts { mission_id: 2, attempts: 4 },
                MissionAttempts { mission_id: 1, attempts: 3 },
                MissionAttempts { mission_id: 3, attempts: 1 },
            ]
        );
    }
}
