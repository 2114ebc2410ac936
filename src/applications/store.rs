//! Application Storage
//! Mission: Single-table CRUD over SQLite with per-operation atomicity

use crate::applications::models::{Application, ApplicationCreate, ApplicationUpdate};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use rusqlite::{params, params_from_iter, types::Value, Connection, OpenFlags, Row};
use std::sync::Arc;
use tracing::{info, warn};

/// Schema applied idempotently at startup.
const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;

CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company TEXT NOT NULL,
    role TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'Applied',
    location TEXT,
    job_url TEXT,
    notes TEXT
);

CREATE INDEX IF NOT EXISTS idx_applications_status
    ON applications(status, id DESC);
"#;

const SELECT_COLUMNS: &str = "id, company, role, status, location, job_url, notes";

/// SQLite-backed store for application records.
pub struct ApplicationStore {
    conn: Arc<Mutex<Connection>>,
}

impl ApplicationStore {
    /// Open (or create) the database and apply the schema.
    pub fn new(db_path: &str) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX; // guarded by our own Mutex

        let conn = Connection::open_with_flags(db_path, flags)
            .with_context(|| format!("Failed to open database at {}", db_path))?;

        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize database schema")?;

        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap_or_default();
        if journal_mode.to_lowercase() != "wal" {
            warn!("WAL mode not active, journal_mode = {}", journal_mode);
        }

        info!("📊 Application database initialized at: {}", db_path);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// List records, newest first. `status` filters by exact match,
    /// `company` by case-insensitive substring; both combine with AND.
    pub fn list(&self, status: Option<&str>, company: Option<&str>) -> Result<Vec<Application>> {
        let mut sql = format!("SELECT {} FROM applications", SELECT_COLUMNS);
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(status) = status {
            clauses.push("status = ?");
            values.push(Value::Text(status.to_string()));
        }
        if let Some(company) = company {
            clauses.push("instr(lower(company), lower(?)) > 0");
            values.push(Value::Text(company.to_string()));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id DESC");

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let apps = stmt
            .query_map(params_from_iter(values), row_to_application)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(apps)
    }

    /// Fetch a single record by id.
    pub fn get(&self, id: i64) -> Result<Option<Application>> {
        let conn = self.conn.lock();
        get_by_id(&conn, id)
    }

    /// Insert a new record; the database assigns the id.
    pub fn create(&self, fields: &ApplicationCreate) -> Result<Application> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT INTO applications (company, role, status, location, job_url, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.company,
                fields.role,
                fields.status,
                fields.location,
                fields.job_url,
                fields.notes,
            ],
        )
        .context("Failed to insert application")?;

        let id = conn.last_insert_rowid();
        let created = get_by_id(&conn, id)?
            .context("Inserted application missing on read-back")?;

        info!("✅ Created application #{} ({})", created.id, created.company);

        Ok(created)
    }

    /// Apply a partial update. Only fields present in `fields` change;
    /// returns `None` when no record has the given id.
    pub fn update(&self, id: i64, fields: &ApplicationUpdate) -> Result<Option<Application>> {
        let conn = self.conn.lock();

        if fields.is_empty() {
            // Nothing to change, but the caller still gets existence checked
            return get_by_id(&conn, id);
        }

        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(company) = &fields.company {
            sets.push("company = ?");
            values.push(Value::Text(company.clone()));
        }
        if let Some(role) = &fields.role {
            sets.push("role = ?");
            values.push(Value::Text(role.clone()));
        }
        if let Some(status) = &fields.status {
            sets.push("status = ?");
            values.push(Value::Text(status.clone()));
        }
        if let Some(location) = &fields.location {
            sets.push("location = ?");
            values.push(text_or_null(location));
        }
        if let Some(job_url) = &fields.job_url {
            sets.push("job_url = ?");
            values.push(text_or_null(job_url));
        }
        if let Some(notes) = &fields.notes {
            sets.push("notes = ?");
            values.push(text_or_null(notes));
        }

        let sql = format!("UPDATE applications SET {} WHERE id = ?", sets.join(", "));
        values.push(Value::Integer(id));

        let changed = conn.execute(&sql, params_from_iter(values))?;
        if changed == 0 {
            return Ok(None);
        }

        get_by_id(&conn, id)
    }

    /// Permanently remove a record. Returns false when the id did not exist.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();

        let changed = conn.execute("DELETE FROM applications WHERE id = ?1", params![id])?;
        if changed > 0 {
            info!("🗑️  Deleted application #{}", id);
        }

        Ok(changed > 0)
    }
}

fn get_by_id(conn: &Connection, id: i64) -> Result<Option<Application>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM applications WHERE id = ?1",
        SELECT_COLUMNS
    ))?;

    match stmt.query_row(params![id], row_to_application) {
        Ok(app) => Ok(Some(app)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn row_to_application(row: &Row<'_>) -> rusqlite::Result<Application> {
    Ok(Application {
        id: row.get(0)?,
        company: row.get(1)?,
        role: row.get(2)?,
        status: row.get(3)?,
        location: row.get(4)?,
        job_url: row.get(5)?,
        notes: row.get(6)?,
    })
}

fn text_or_null(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::Text(s.clone()),
        None => Value::Null,
    }
}
