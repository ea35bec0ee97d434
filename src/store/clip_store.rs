//! SQLite-backed clip ledger and blacklist
//!
//! The store is the single source of truth for which clips have ever been
//! seen (write-once rows keyed by slug) and which are blacklisted from random
//! serving. It is shared between the pipeline and the clip server; SQLite's
//! own locking (WAL journal) serializes conflicting writes, so no
//! application-level coordination exists beyond the connection mutex. Every
//! call runs its SQL on the blocking thread pool.

use crate::error::{Error, Result};
use crate::types::{BlacklistedClip, Clip, EligibleClip};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Durable dedup ledger and blacklist
#[derive(Clone)]
pub struct ClipStore {
    conn: Arc<Mutex<Connection>>,
}

impl ClipStore {
    /// Open (or create) the database at `path` and initialize the schema
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;",
        )?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS clips (
                slug             TEXT PRIMARY KEY,
                title            TEXT NOT NULL,
                url              TEXT NOT NULL,
                created_at       TEXT NOT NULL,
                duration_seconds INTEGER NOT NULL,
                curator_name     TEXT,
                curator_url      TEXT,
                thumbnail_url    TEXT NOT NULL,
                video_url        TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS blacklist (
                slug TEXT PRIMARY KEY REFERENCES clips(slug)
            );
            "#,
        )
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| Error::internal("clip store mutex poisoned"))?;
            f(&guard).map_err(Error::from)
        })
        .await?
    }

    /// Whether a clip record exists for `slug`
    pub async fn exists(&self, slug: &str) -> Result<bool> {
        let slug = slug.to_owned();
        self.with_conn(move |conn| {
            conn.query_row("SELECT 1 FROM clips WHERE slug = ?1", params![slug], |_| {
                Ok(())
            })
            .optional()
            .map(|row| row.is_some())
        })
        .await
    }

    /// Insert a clip record.
    ///
    /// Write-once: inserting an already-known slug is a harmless no-op.
    /// Returns whether a row was actually written, which is what gates
    /// forwarding to the delivery queue.
    pub async fn insert(&self, clip: &Clip) -> Result<bool> {
        let clip = clip.clone();
        self.with_conn(move |conn| {
            let changed = conn.execute(
                "INSERT OR IGNORE INTO clips
                 (slug, title, url, created_at, duration_seconds,
                  curator_name, curator_url, thumbnail_url, video_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    clip.slug,
                    clip.title,
                    clip.url,
                    clip.created_at,
                    clip.duration_seconds,
                    clip.curator_name,
                    clip.curator_url,
                    clip.thumbnail_url,
                    clip.video_url,
                ],
            )?;
            Ok(changed > 0)
        })
        .await
    }

    /// Whether `slug` is currently blacklisted
    pub async fn is_blacklisted(&self, slug: &str) -> Result<bool> {
        let slug = slug.to_owned();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT 1 FROM blacklist WHERE slug = ?1",
                params![slug],
                |_| Ok(()),
            )
            .optional()
            .map(|row| row.is_some())
        })
        .await
    }

    /// Blacklist a clip.
    ///
    /// Only effective if the slug is a known clip and not already
    /// blacklisted; otherwise a no-op. The guard is part of the statement so
    /// the rule holds under concurrent callers. Returns whether an entry was
    /// actually added.
    pub async fn blacklist_add(&self, slug: &str) -> Result<bool> {
        let slug = slug.to_owned();
        self.with_conn(move |conn| {
            let changed = conn.execute(
                "INSERT OR IGNORE INTO blacklist (slug)
                 SELECT ?1 WHERE EXISTS (SELECT 1 FROM clips WHERE slug = ?1)",
                params![slug],
            )?;
            Ok(changed > 0)
        })
        .await
    }

    /// Remove a clip from the blacklist.
    ///
    /// Only effective if the slug is currently blacklisted; otherwise a
    /// no-op. Returns whether an entry was actually removed.
    pub async fn blacklist_remove(&self, slug: &str) -> Result<bool> {
        let slug = slug.to_owned();
        self.with_conn(move |conn| {
            let changed = conn.execute("DELETE FROM blacklist WHERE slug = ?1", params![slug])?;
            Ok(changed > 0)
        })
        .await
    }

    /// Every blacklisted clip with its joined metadata, ordered by slug
    pub async fn list_blacklisted(&self) -> Result<Vec<BlacklistedClip>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.slug, c.title, c.url
                 FROM clips c JOIN blacklist b ON b.slug = c.slug
                 ORDER BY c.slug",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(BlacklistedClip {
                    slug: row.get(0)?,
                    title: row.get(1)?,
                    url: row.get(2)?,
                })
            })?;
            rows.collect()
        })
        .await
    }

    /// One uniformly-random clip that is not blacklisted, if any exists
    pub async fn random_eligible(&self) -> Result<Option<EligibleClip>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT slug, video_url, title FROM clips
                 WHERE slug NOT IN (SELECT slug FROM blacklist)
                 ORDER BY RANDOM() LIMIT 1",
                [],
                |row| {
                    Ok(EligibleClip {
                        slug: row.get(0)?,
                        video_url: row.get(1)?,
                        title: row.get(2)?,
                    })
                },
            )
            .optional()
        })
        .await
    }
}
