use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use crate::tracker::{Catalog, Series};

const META_CURRENT: &str = "current";
const META_SAVED_AT: &str = "saved_at";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {}", path.display()))?;
        debug!(path = %path.display(), "database opened");
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS series (
                name TEXT PRIMARY KEY,
                position INTEGER NOT NULL,
                seasons TEXT NOT NULL,
                cur_season INTEGER NOT NULL,
                last_episode INTEGER NOT NULL,
                deleted INTEGER NOT NULL DEFAULT 0
            );
            CREATE INDEX IF NOT EXISTS idx_series_position ON series(position);
            CREATE TABLE IF NOT EXISTS catalog_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Loads the stored catalog, or an empty one when nothing was saved yet.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let mut stmt = self.conn.prepare(
            "SELECT name, seasons, cur_season, last_episode, deleted FROM series ORDER BY position ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, bool>(4)?,
            ))
        })?;

        let mut series = Vec::new();
        for row in rows {
            let (name, seasons_json, cur_season, last_episode, deleted) = row?;
            let seasons: Vec<u32> = serde_json::from_str(&seasons_json)
                .with_context(|| format!("invalid season list stored for '{name}'"))?;
            let Some(item) = Series::restore(name.clone(), seasons, cur_season, last_episode, deleted)
            else {
                bail!("stored viewing pointer for '{name}' is outside its seasons");
            };
            series.push(item);
        }

        let current = self.meta(META_CURRENT)?.filter(|name| !name.is_empty());
        let count = series.len();
        let Some(catalog) = Catalog::from_parts(series, current) else {
            bail!("stored catalog is inconsistent: duplicate series or invalid current series");
        };
        info!(series = count, "catalog loaded");
        Ok(catalog)
    }

    /// Replaces the stored snapshot with `catalog` in a single transaction.
    pub fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("failed to start save transaction")?;
        tx.execute("DELETE FROM series", [])?;
        {
            let mut insert = tx.prepare(
                r#"
                INSERT INTO series (name, position, seasons, cur_season, last_episode, deleted)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for (position, series) in catalog.iter().enumerate() {
                let seasons = serde_json::to_string(series.seasons())?;
                insert.execute(params![
                    series.name(),
                    position as i64,
                    seasons,
                    series.cur_season(),
                    series.last_episode(),
                    series.is_deleted(),
                ])?;
            }
        }
        let now = Utc::now().to_rfc3339();
        upsert_meta(&tx, META_CURRENT, catalog.current().unwrap_or(""))?;
        upsert_meta(&tx, META_SAVED_AT, &now)?;
        tx.commit().context("failed to commit catalog snapshot")?;
        info!(series = catalog.iter().count(), "catalog saved");
        Ok(())
    }

    pub fn last_saved(&self) -> Result<Option<String>> {
        self.meta(META_SAVED_AT)
    }

    fn meta(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM catalog_meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

fn upsert_meta(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO catalog_meta (key, value)
        VALUES (?1, ?2)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value
        "#,
        params![key, value],
    )?;
    Ok(())
}
