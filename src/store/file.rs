use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PlayerRecord, ProgressStore};
use crate::error::PersistError;
use crate::game::ProgressionState;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(JsonFileStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, email: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_key(email)))
    }

    fn read_record(&self, path: &Path, email: &str) -> Result<Option<PlayerRecord>, PersistError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_str(&content).map_err(|source| PersistError::Corrupt {
            email: email.to_string(),
            source,
        })?;
        Ok(Some(record))
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self, email: &str) -> Result<Option<ProgressionState>, PersistError> {
        let record = self.read_record(&self.path_for(email), email)?;
        Ok(record.map(|r| r.state))
    }

    fn save(&mut self, state: &ProgressionState) -> Result<(), PersistError> {
        let email = state.player().email();
        let path = self.path_for(email);
        let previous = match self.read_record(&path, email) {
            Ok(previous) => previous,
            // An unreadable record must not block the overwrite that replaces it
            Err(e @ PersistError::Corrupt { .. }) => {
                log::warn!("[STORE] replacing corrupt record player:{} error:{}", email, e);
                None
            }
            Err(e) => return Err(e),
        };
        let record = PlayerRecord::touch(previous, state, Utc::now());

        let json = serde_json::to_string_pretty(&record).map_err(|source| PersistError::Corrupt {
            email: email.to_string(),
            source,
        })?;

        // Write beside the target then rename so readers never see half a file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn records(&self) -> Result<Vec<PlayerRecord>, PersistError> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let name = path.display().to_string();
            if let Some(record) = self.read_record(&path, &name)? {
                records.push(record);
            }
        }
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}

// Percent-encodes anything unusual so distinct emails never share a file
fn file_key(email: &str) -> String {
    let mut key = String::with_capacity(email.len());
    for byte in email.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'@' | b'.' | b'+' | b'-' | b'_' => {
                key.push(char::from(byte))
            }
            _ => key.push_str(&format!("%{byte:02X}")),
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PlayerIdentity, Screen};

    fn state_for(name: &str, email: &str) -> ProgressionState {
        ProgressionState::fresh(PlayerIdentity::new(name, email).unwrap())
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("saves")).unwrap();

        let state = state_for("Alice", "alice@example.com")
            .with_screen(Screen::Map, 0)
            .with_attempt(1)
            .with_completed(1);
        store.save(&state).unwrap();

        assert_eq!(store.load("alice@example.com").unwrap(), Some(state));
        assert_eq!(store.load("nobody@example.com").unwrap(), None);
    }

    #[test]
    fn last_write_wins_and_creation_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        let state = state_for("Alice", "alice@example.com");
        store.save(&state).unwrap();
        let created = store.records().unwrap()[0].created_at;

        let later = state.with_attempt(3).with_attempt(3);
        store.save(&later).unwrap();

        let records = store.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].created_at, created);
        assert_eq!(records[0].state.attempts(3), 2);
    }

    #[test]
    fn similar_emails_stay_apart() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        store.save(&state_for("Ann", "ann/x@example.com")).unwrap();
        assert_eq!(store.load("ann?x@example.com").unwrap(), None);
        assert!(store.load("ann/x@example.com").unwrap().is_some());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("eve@example.com.json"), "{ nope").unwrap();

        let err = store.load("eve@example.com").unwrap_err();
        assert!(matches!(err, PersistError::Corrupt { .. }));
    }

    #[test]
    fn save_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("eve@example.com.json"), "{ nope").unwrap();

        let state = state_for("Eve", "eve@example.com").with_attempt(1);
        store.save(&state).unwrap();

        assert_eq!(store.load("eve@example.com").unwrap(), Some(state));
        assert_eq!(store.records().unwrap().len(), 1);
    }

    #[test]
    fn file_keys_are_safe() {
        assert_eq!(file_key("alice+hunt@example.com"), "alice+hunt@example.com");
        assert_eq!(file_key("../evil"), "..%2Fevil");
        assert_eq!(file_key("a%b"), "a%25b");
        assert_eq!(file_key("zoé"), "zo%C3%A9");
    }
}
