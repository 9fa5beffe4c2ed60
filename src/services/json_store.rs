use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::{PlayerPayload, PlayerRecord};
use crate::services::StoreError;

/// Preference store kept in a single JSON file, used by the CLI
///
/// Every mutation reads the whole file and writes it back, which is fine
/// for a single local user and a few hundred players.
#[derive(Debug, Clone)]
pub struct JsonPlayerStore {
    path: PathBuf,
}

impl JsonPlayerStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored player; a missing file is an empty store
    pub fn load_all(&self) -> Result<Vec<PlayerPayload>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Replace the file contents with `players`
    pub fn save_all(&self, players: &[PlayerPayload]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, players)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::debug!("Saved {} players to {}", players.len(), self.path.display());

        Ok(())
    }

    /// Replace the entry with the same id in place, or append a new one
    pub fn add_or_update(&self, player: &PlayerRecord) -> Result<(), StoreError> {
        let mut players = self.load_all()?;
        let payload = PlayerPayload::from(player.clone());

        match players
            .iter_mut()
            .find(|existing| existing.player_id == payload.player_id)
        {
            Some(existing) => *existing = payload,
            None => players.push(payload),
        }

        self.save_all(&players)
    }

    /// Remove a player; returns whether one was stored
    pub fn remove(&self, player_id: &str) -> Result<bool, StoreError> {
        let players = self.load_all()?;
        let before = players.len();

        let remaining: Vec<PlayerPayload> = players
            .into_iter()
            .filter(|player| player.player_id != player_id)
            .collect();

        if remaining.len() == before {
            return Ok(false);
        }

        self.save_all(&remaining)?;
        Ok(true)
    }

    pub fn find(&self, player_id: &str) -> Result<Option<PlayerPayload>, StoreError> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|player| player.player_id == player_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_player(id: &str, mode: &str) -> PlayerRecord {
        PlayerRecord::try_from(PlayerPayload {
            player_id: id.to_string(),
            platform: "PC".to_string(),
            game_mode: mode.to_string(),
            level_range: "1-4".to_string(),
            voice_chat: "none".to_string(),
            timezone: "UTC+2".to_string(),
            notes: None,
            tags: vec!["new player".to_string()],
        })
        .unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPlayerStore::new(dir.path().join("players.json"));

        assert!(store.load_all().unwrap().is_empty());
        assert!(store.find("nobody").unwrap().is_none());
    }

    #[test]
    fn test_add_or_update_replaces_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPlayerStore::new(dir.path().join("nested").join("players.json"));

        store.add_or_update(&create_player("halsin", "story")).unwrap();
        store.add_or_update(&create_player("minthara", "story")).unwrap();
        store.add_or_update(&create_player("halsin", "honour")).unwrap();

        let players = store.load_all().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].player_id, "halsin");
        assert_eq!(players[0].game_mode, "honour");
        assert_eq!(players[1].player_id, "minthara");
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPlayerStore::new(dir.path().join("players.json"));
        store.add_or_update(&create_player("jaheira", "story")).unwrap();

        assert!(store.remove("jaheira").unwrap());
        assert!(!store.remove("jaheira").unwrap());
        assert!(store.load_all().unwrap().is_empty());
    }
}
