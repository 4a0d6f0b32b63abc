use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::model::{CaseFilter, TrackedCase};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tracked_case (
  id              INTEGER PRIMARY KEY AUTOINCREMENT,
  url             TEXT NOT NULL UNIQUE,
  case_reference  TEXT NOT NULL,
  subject         TEXT NOT NULL,
  court           TEXT NOT NULL,
  last_change     TEXT,
  appeal_occurred INTEGER NOT NULL DEFAULT 0,
  started_on      TEXT NOT NULL,
  ended_on        TEXT
);
CREATE INDEX IF NOT EXISTS idx_tracked_case_last_change ON tracked_case(last_change);
"#;

const COLUMNS: &str = "id, url, case_reference, subject, court, last_change, \
                       appeal_occurred, started_on, ended_on";

#[derive(Clone)]
pub struct CaseStore {
    pool: SqlitePool,
}

impl CaseStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `url` (e.g. `sqlite://hlidac.db?mode=rwc`).
    ///
    /// An in-memory database lives as long as its connection, so those get a
    /// single connection that is never recycled.
    pub async fn connect(url: &str) -> Result<Self> {
        let in_memory = url.contains(":memory:");
        let mut options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 4 });
        if in_memory {
            options = options.idle_timeout(None).max_lifetime(None);
        }
        let pool = options
            .connect(url)
            .await
            .with_context(|| format!("opening database {url}"))?;
        info!(database_url=%url, "store.connect");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the schema if it is missing. Safe to run on every start.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .context("creating tracked_case schema")?;
        debug!("store.migrate");
        Ok(())
    }

    /// Insert or refresh the row for `case.url`; returns the row id.
    pub async fn upsert(&self, case: &TrackedCase) -> Result<i64> {
        let row = sqlx::query(
            r#"INSERT INTO tracked_case
               (url, case_reference, subject, court, last_change, appeal_occurred, started_on, ended_on)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
               ON CONFLICT(url) DO UPDATE SET
                 case_reference=excluded.case_reference,
                 subject=excluded.subject,
                 court=excluded.court,
                 last_change=excluded.last_change,
                 appeal_occurred=excluded.appeal_occurred,
                 started_on=excluded.started_on,
                 ended_on=excluded.ended_on
               RETURNING id"#,
        )
        .bind(case.url.as_str())
        .bind(case.case_reference.as_str())
        .bind(case.subject.as_str())
        .bind(case.court.as_str())
        .bind(case.last_change)
        .bind(case.appeal_occurred)
        .bind(case.started_on)
        .bind(case.ended_on)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("saving case {}", case.case_reference))?;
        let id: i64 = row.try_get("id")?;
        info!(
            id,
            case_reference=%case.case_reference,
            concluded=case.concluded(),
            "store.upsert_case"
        );
        Ok(id)
    }

    pub async fn get_by_url(&self, url: &str) -> Result<Option<TrackedCase>> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM tracked_case WHERE url = ?"
        ))
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(r) => Ok(Some(from_row(&r)?)),
            None => {
                debug!(%url, "store.case_missing");
                Ok(None)
            }
        }
    }

    /// Matching cases, most recently changed first.
    pub async fn list(&self, filter: &CaseFilter) -> Result<Vec<TrackedCase>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {COLUMNS}
               FROM tracked_case
               WHERE (?1 IS NULL OR (ended_on IS NOT NULL) = ?1)
                 AND (?2 IS NULL OR subject = ?2)
                 AND (?3 IS NULL OR court = ?3)
               ORDER BY last_change DESC, id ASC"#
        ))
        .bind(filter.concluded)
        .bind(filter.subject.as_deref())
        .bind(filter.court.as_deref())
        .fetch_all(&self.pool)
        .await?;
        info!(
            concluded=?filter.concluded,
            subject=?filter.subject,
            court=?filter.court,
            rows=rows.len(),
            "store.list_cases"
        );
        rows.iter().map(from_row).collect()
    }
}

fn from_row(r: &SqliteRow) -> Result<TrackedCase> {
    Ok(TrackedCase {
        id: Some(r.try_get("id")?),
        url: r.try_get("url")?,
        case_reference: r.try_get("case_reference")?,
        subject: r.try_get("subject")?,
        court: r.try_get("court")?,
        last_change: r.try_get::<Option<NaiveDateTime>, _>("last_change")?,
        appeal_occurred: r.try_get::<i64, _>("appeal_occurred")? != 0,
        started_on: r.try_get::<NaiveDate, _>("started_on")?,
        ended_on: r.try_get::<Option<NaiveDate>, _>("ended_on")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrate_twice_is_fine() {
        let store = CaseStore::connect("sqlite::memory:").await.unwrap();
        store.migrate().await.unwrap();
        store.migrate().await.unwrap();
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tracked_case")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(n, 0);
    }
}
