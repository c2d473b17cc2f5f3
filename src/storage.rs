//! Best-effort JSON persistence.
//!
//! Small documents under well-known file names inside one save directory.
//! Reads return defaults when data is missing or corrupt; writes log their
//! failure and are otherwise fire-and-forget. Gameplay never stops because
//! the save directory is unavailable.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::missions::{Inventory, MissionStatus};
use crate::models::PlayerProgression;

const PROGRESSION_FILE: &str = "progression.json";
const PLAYER_NAME_FILE: &str = "player_name.json";
const INVENTORY_FILE: &str = "inventory.json";
const MISSION_STATUS_FILE: &str = "missions.json";

/// Handle on the save directory.
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn load_progression(&self) -> PlayerProgression {
        self.read_json(PROGRESSION_FILE).unwrap_or_default()
    }

    pub fn save_progression(&self, progression: &PlayerProgression) {
        self.write_json(PROGRESSION_FILE, progression);
    }

    pub fn load_player_name(&self) -> Option<String> {
        self.read_json(PLAYER_NAME_FILE)
    }

    pub fn save_player_name(&self, name: &str) {
        self.write_json(PLAYER_NAME_FILE, &name.to_string());
    }

    pub fn load_inventory(&self) -> Inventory {
        self.read_json(INVENTORY_FILE)
            .unwrap_or_else(Inventory::starting_kit)
    }

    pub fn save_inventory(&self, inventory: &Inventory) {
        self.write_json(INVENTORY_FILE, inventory);
    }

    pub fn load_mission_status(&self) -> HashMap<String, MissionStatus> {
        self.read_json(MISSION_STATUS_FILE).unwrap_or_default()
    }

    pub fn save_mission_status(&self, status: &HashMap<String, MissionStatus>) {
        self.write_json(MISSION_STATUS_FILE, status);
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            // A missing save is the normal first-launch case.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!("could not read {}: {}", path.display(), err);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("corrupt save data in {}: {}", path.display(), err);
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) {
        let path = self.dir.join(file);
        let result = fs::create_dir_all(&self.dir)
            .and_then(|_| {
                let content = serde_json::to_string_pretty(value)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
                fs::write(&path, content)
            });

        if let Err(err) = result {
            error!("could not save {}: {}; continuing without", path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use std::env;

    fn temp_store(tag: &str) -> SaveStore {
        let dir = env::temp_dir().join(format!(
            "shadow-trials-test-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        SaveStore::new(dir)
    }

    #[test]
    fn progression_round_trips_field_for_field() {
        let store = temp_store("progression");
        let progression = PlayerProgression {
            total_score: 1234,
            sessions_completed: 9,
            total_correct: 31,
            total_answered: 45,
            coins: 210,
            rank_id: "shinobi".to_string(),
            highest_rank_id: "assassin".to_string(),
            last_played: Some(Utc.with_ymd_and_hms(2026, 2, 14, 8, 30, 0).unwrap()),
        };

        store.save_progression(&progression);
        assert_eq!(store.load_progression(), progression);
    }

    #[test]
    fn default_progression_round_trips() {
        let store = temp_store("defaults");
        let progression = PlayerProgression::default();
        store.save_progression(&progression);
        assert_eq!(store.load_progression(), progression);
    }

    #[test]
    fn missing_save_yields_defaults() {
        let store = temp_store("missing");
        assert_eq!(store.load_progression(), PlayerProgression::default());
        assert_eq!(store.load_player_name(), None);
        assert_eq!(store.load_inventory(), Inventory::starting_kit());
        assert!(store.load_mission_status().is_empty());
    }

    #[test]
    fn corrupt_save_yields_defaults() {
        let store = temp_store("corrupt");
        fs::create_dir_all(&store.dir).unwrap();
        fs::write(store.dir.join(PROGRESSION_FILE), "{not json").unwrap();
        assert_eq!(store.load_progression(), PlayerProgression::default());
    }

    #[test]
    fn player_name_round_trips() {
        let store = temp_store("name");
        store.save_player_name("Rin");
        assert_eq!(store.load_player_name().as_deref(), Some("Rin"));
    }

    #[test]
    fn inventory_and_status_round_trip() {
        let store = temp_store("inventory");
        let mut inventory = Inventory::starting_kit();
        assert!(inventory.consume("shuriken"));
        store.save_inventory(&inventory);
        assert_eq!(store.load_inventory(), inventory);

        let mut status = HashMap::new();
        status.insert("rooftop_scrolls".to_string(), MissionStatus::Completed);
        status.insert("garden_infiltration".to_string(), MissionStatus::Failed);
        store.save_mission_status(&status);
        assert_eq!(store.load_mission_status(), status);
    }
}
