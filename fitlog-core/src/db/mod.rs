//! Storage for finished session summaries.

pub mod models;
pub mod operations;
pub mod schema;

use std::sync::Mutex;

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDateTime};
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{debug, info};

use crate::session::SessionSummary;
pub use models::StoredSummary;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; PRAGMA busy_timeout = 5000;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Open a pool and bring the schema up to date.
///
/// `:memory:` gets a single long-lived connection, since every sqlite
/// connection to `:memory:` is its own database.
pub fn open_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let builder = Pool::builder().connection_customizer(Box::new(SqlitePragmas));
    let builder = if database_url == MEMORY_DATABASE {
        builder.max_size(1).idle_timeout(None).max_lifetime(None)
    } else {
        builder.max_size(4)
    };
    let pool = builder
        .build(manager)
        .map_err(|e| anyhow!("Failed to create DB pool: {}", e))?;

    let mut conn = pool.get()?;
    init_database(&mut conn)?;
    debug!("Database ready at {}", database_url);
    Ok(pool)
}

pub fn init_database(conn: &mut SqliteConnection) -> Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!("Failed to run migrations: {}", e))?;
    for version in applied {
        info!("Migration {} applied successfully", version);
    }
    Ok(())
}

/// Where finished sessions go.
pub trait SummaryStore {
    /// Persist a summary, returning its new id.
    fn save(&self, summary: &SessionSummary) -> Result<i64>;
    /// All stored summaries, newest first.
    fn list(&self) -> Result<Vec<StoredSummary>>;
    fn get(&self, summary_id: i64) -> Result<Option<StoredSummary>>;
}

pub struct SqliteSummaryStore {
    pool: DbPool,
}

impl SqliteSummaryStore {
    pub fn open(database_url: &str) -> Result<Self> {
        Ok(Self {
            pool: open_pool(database_url)?,
        })
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn list_for_workout(&self, workout_id: i64) -> Result<Vec<StoredSummary>> {
        let mut conn = self.pool.get()?;
        operations::list_summaries_for_workout(&mut conn, workout_id)
    }

    pub fn delete(&self, summary_id: i64) -> Result<bool> {
        let mut conn = self.pool.get()?;
        Ok(operations::delete_summary(&mut conn, summary_id)? > 0)
    }
}

impl SummaryStore for SqliteSummaryStore {
    fn save(&self, summary: &SessionSummary) -> Result<i64> {
        let mut conn = self.pool.get()?;
        let id = operations::insert_summary(&mut conn, summary, &now())?;
        info!(
            "Saved summary {} for session {}",
            id, summary.session_id
        );
        Ok(id)
    }

    fn list(&self) -> Result<Vec<StoredSummary>> {
        let mut conn = self.pool.get()?;
        operations::list_summaries(&mut conn)
    }

    fn get(&self, summary_id: i64) -> Result<Option<StoredSummary>> {
        let mut conn = self.pool.get()?;
        operations::get_summary(&mut conn, summary_id)
    }
}

#[derive(Debug, Default)]
pub struct MemorySummaryStore {
    rows: Mutex<Vec<StoredSummary>>,
}

impl MemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SummaryStore for MemorySummaryStore {
    fn save(&self, summary: &SessionSummary) -> Result<i64> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| anyhow!("summary store lock poisoned"))?;
        let id = rows.last().map(|r| r.id + 1).unwrap_or(1);
        rows.push(StoredSummary {
            id,
            saved_at: now(),
            summary: summary.clone(),
        });
        Ok(id)
    }

    fn list(&self) -> Result<Vec<StoredSummary>> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| anyhow!("summary store lock poisoned"))?;
        Ok(rows.iter().rev().cloned().collect())
    }

    fn get(&self, summary_id: i64) -> Result<Option<StoredSummary>> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| anyhow!("summary store lock poisoned"))?;
        Ok(rows.iter().find(|r| r.id == summary_id).cloned())
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::{definition, fixed_start};
    use crate::session::WorkoutSession;

    fn finished_summary(notes: &str) -> SessionSummary {
        let mut session =
            WorkoutSession::start_at(definition(&[(1, 2, 90), (2, 1, 60)]), fixed_start())
                .unwrap();
        session.record_set(1, 0, Some(20.0), Some(10)).unwrap();
        session.record_set(1, 1, Some(22.5), Some(8)).unwrap();
        session.tick();
        session.record_set(2, 0, None, Some(15)).unwrap();
        session.complete_session(notes).unwrap()
    }

    #[test]
    fn sqlite_store_round_trips_summaries() {
        let store = SqliteSummaryStore::open(":memory:").unwrap();
        assert!(store.list().unwrap().is_empty());

        let first = finished_summary("first");
        let second = finished_summary("second");
        let first_id = store.save(&first).unwrap();
        let second_id = store.save(&second).unwrap();
        assert_ne!(first_id, second_id);

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second_id);
        assert_eq!(listed[1].summary, first);

        let fetched = store.get(first_id).unwrap().unwrap();
        assert_eq!(fetched.summary.per_exercise[1].sets[0].weight, None);
        assert_eq!(fetched.summary.started_at, Some(fixed_start()));
        assert!(store.get(9999).unwrap().is_none());

        assert_eq!(store.list_for_workout(42).unwrap().len(), 2);
        assert!(store.list_for_workout(7).unwrap().is_empty());
    }

    #[test]
    fn sqlite_store_rejects_duplicate_session() {
        let store = SqliteSummaryStore::open(":memory:").unwrap();
        let summary = finished_summary("once");
        store.save(&summary).unwrap();
        assert!(store.save(&summary).is_err());
    }

    #[test]
    fn sqlite_store_deletes() {
        let store = SqliteSummaryStore::open(":memory:").unwrap();
        let id = store.save(&finished_summary("gone")).unwrap();
        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn migrations_are_idempotent() {
        let pool = open_pool(":memory:").unwrap();
        let mut conn = pool.get().unwrap();
        init_database(&mut conn).unwrap();
    }

    #[test]
    fn memory_store_lists_newest_first() {
        let store = MemorySummaryStore::new();
        let a = store.save(&finished_summary("a")).unwrap();
        let b = store.save(&finished_summary("b")).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(
            listed.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![b, a]
        );
        assert_eq!(store.get(a).unwrap().unwrap().summary.notes, "a");
    }
}
