//! SQLite-backed plan store via libsql. Implements PlanStore as a small document store.
//!
//! One `workout_plans` row per plan: the id and owner are indexed columns and the
//! full `PlanRecord` is kept as a JSON document, so new plan fields need no migration.
//! All plans share one database file: data/plans.db

use crate::domain::{DomainError, PlanRecord};
use crate::ports::PlanStore;
use libsql::{Connection, Database, params};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PLANS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS workout_plans (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    doc TEXT NOT NULL,
    created_at INTEGER NOT NULL
)"#;
const PLANS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_workout_plans_owner ON workout_plans (user_id, created_at)";

/// SQLite plan store. One database file (plans.db) in the given base directory.
pub struct SqliteRepo {
    db: Database,
    db_path: PathBuf,
}

impl SqliteRepo {
    /// Connect to (or create) the SQLite database and ensure the schema exists.
    /// Call this once at startup; the returned repo is safe to share via Arc.
    ///
    /// Sets WAL mode and synchronous=NORMAL: request handlers read while
    /// another request writes.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Store(e.to_string()))?;
        let db_path = base.join("plans.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Store(e.to_string()))?;

        // PRAGMA returns a row (new value); consume it, execute() fails when rows are returned.
        Self::pragma(&conn, "PRAGMA journal_mode=WAL").await?;
        Self::pragma(&conn, "PRAGMA synchronous=NORMAL").await?;

        conn.execute(PLANS_TABLE, ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        conn.execute(PLANS_OWNER_INDEX, ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        info!(path = %db_path.display(), "SQLite plan store connected (WAL)");

        Ok(Self { db, db_path })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    async fn pragma(conn: &Connection, sql: &str) -> Result<(), DomainError> {
        let mut rows = conn
            .query(sql, ())
            .await
            .map_err(|e| DomainError::Store(format!("{} failed: {}", sql, e)))?;
        while rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
            .is_some()
        {}
        Ok(())
    }

    fn connection(&self) -> Result<Connection, DomainError> {
        self.db
            .connect()
            .map_err(|e| DomainError::Store(e.to_string()))
    }

    fn decode(doc: &str) -> Result<PlanRecord, DomainError> {
        serde_json::from_str(doc)
            .map_err(|e| DomainError::Store(format!("corrupt plan document: {}", e)))
    }
}

#[async_trait::async_trait]
impl PlanStore for SqliteRepo {
    async fn get_plan(&self, plan_id: &str) -> Result<Option<PlanRecord>, DomainError> {
        let conn = self.connection()?;
        let mut rows = conn
            .query(
                "SELECT doc FROM workout_plans WHERE id = ?1",
                params![plan_id],
            )
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;

        match rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            Some(row) => {
                let doc: String = row.get(0).map_err(|e| DomainError::Store(e.to_string()))?;
                Self::decode(&doc).map(Some)
            }
            None => {
                debug!(plan_id, "plan not in store");
                Ok(None)
            }
        }
    }

    async fn save_plan(&self, record: &PlanRecord) -> Result<(), DomainError> {
        let doc = serde_json::to_string(record).map_err(|e| DomainError::Store(e.to_string()))?;
        let conn = self.connection()?;
        conn.execute(
            r#"
            INSERT INTO workout_plans (id, user_id, doc, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (id) DO UPDATE SET
                user_id = excluded.user_id,
                doc = excluded.doc,
                created_at = excluded.created_at
            "#,
            params![
                record.id.as_str(),
                record.user_id.as_str(),
                doc,
                record.created_at.timestamp_micros()
            ],
        )
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;
        debug!(plan_id = %record.id, owner = %record.user_id, "plan saved");
        Ok(())
    }

    async fn list_plans(&self) -> Result<Vec<PlanRecord>, DomainError> {
        let conn = self.connection()?;
        let mut rows = conn
            .query(
                "SELECT doc FROM workout_plans ORDER BY created_at, id",
                (),
            )
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut plans = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            let doc: String = row.get(0).map_err(|e| DomainError::Store(e.to_string()))?;
            plans.push(Self::decode(&doc)?);
        }
        Ok(plans)
    }
}
