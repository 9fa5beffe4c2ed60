use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

use crate::models::{PlayerPayload, PlayerRecord};
use crate::services::StoreError;

/// SQLite-backed preference repository used by the HTTP service
///
/// Rows are handed back as [`PlayerPayload`]s: the table may have been
/// written by older releases or by hand, so validation is left to the caller.
#[derive(Clone)]
pub struct PlayerRepository {
    pool: SqlitePool,
}

impl PlayerRepository {
    /// Open (or create) the database and apply migrations
    ///
    /// In-memory databases live and die with a single connection, so they are
    /// pinned to one connection that is never recycled.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .idle_timeout(Duration::from_secs(600))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!("Connected to SQLite at {}", database_url);

        Ok(Self { pool })
    }

    /// Insert a player, or replace the stored preferences of an existing id
    pub async fn upsert(&self, player: &PlayerRecord) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO players
                (player_id, platform, game_mode, level_range, voice_chat, timezone, notes, tags, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT (player_id)
            DO UPDATE SET
                platform = excluded.platform,
                game_mode = excluded.game_mode,
                level_range = excluded.level_range,
                voice_chat = excluded.voice_chat,
                timezone = excluded.timezone,
                notes = excluded.notes,
                tags = excluded.tags,
                updated_at = excluded.updated_at
        "#;

        let tags = serde_json::to_string(player.tags())?;

        sqlx::query(query)
            .bind(player.player_id())
            .bind(player.platform())
            .bind(player.game_mode())
            .bind(player.level_range().to_string())
            .bind(player.voice_chat().as_str())
            .bind(player.timezone())
            .bind(player.notes())
            .bind(tags)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Stored preferences for {}", player.player_id());

        Ok(())
    }

    /// Fetch one player by id
    pub async fn get(&self, player_id: &str) -> Result<Option<PlayerPayload>, StoreError> {
        let query = r#"
            SELECT player_id, platform, game_mode, level_range, voice_chat, timezone, notes, tags
            FROM players
            WHERE player_id = ?
        "#;

        let row = sqlx::query(query)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(payload_from_row).transpose()
    }

    /// Fetch every stored player, ordered by id
    pub async fn list_all(&self) -> Result<Vec<PlayerPayload>, StoreError> {
        let query = r#"
            SELECT player_id, platform, game_mode, level_range, voice_chat, timezone, notes, tags
            FROM players
            ORDER BY player_id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter().map(payload_from_row).collect()
    }

    /// Delete a player; returns whether a row existed
    pub async fn remove(&self, player_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM players WHERE player_id = ?")
            .bind(player_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn payload_from_row(row: &SqliteRow) -> Result<PlayerPayload, StoreError> {
    let tags: String = row.try_get("tags")?;

    Ok(PlayerPayload {
        player_id: row.try_get("player_id")?,
        platform: row.try_get("platform")?,
        game_mode: row.try_get("game_mode")?,
        level_range: row.try_get("level_range")?,
        voice_chat: row.try_get("voice_chat")?,
        timezone: row.try_get("timezone")?,
        notes: row.try_get("notes")?,
        tags: serde_json::from_str(&tags)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_player(id: &str, platform: &str) -> PlayerRecord {
        PlayerRecord::try_from(PlayerPayload {
            player_id: id.to_string(),
            platform: platform.to_string(),
            game_mode: "tactician".to_string(),
            level_range: "2-6".to_string(),
            voice_chat: "required".to_string(),
            timezone: "UTC+1".to_string(),
            notes: Some("Act 2 onwards".to_string()),
            tags: vec!["modded".to_string()],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let repo = PlayerRepository::connect("sqlite::memory:", 1).await.unwrap();

        repo.upsert(&create_player("wyll", "PC")).await.unwrap();
        repo.upsert(&create_player("wyll", "PS5")).await.unwrap();

        let stored = repo.get("wyll").await.unwrap().unwrap();
        assert_eq!(stored.platform, "PS5");
        assert_eq!(stored.tags, vec!["modded"]);
        assert_eq!(stored.notes.as_deref(), Some("Act 2 onwards"));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = PlayerRepository::connect("sqlite::memory:", 1).await.unwrap();
        repo.upsert(&create_player("laezel", "PC")).await.unwrap();

        assert!(repo.remove("laezel").await.unwrap());
        assert!(!repo.remove("laezel").await.unwrap());
        assert!(repo.get("laezel").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = PlayerRepository::connect("sqlite::memory:", 1).await.unwrap();
        assert!(repo.health_check().await.unwrap());
    }
}
