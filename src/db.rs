// Taxonomy store - SQLite schema, connections and normalized inserts
//
// Tables:
//   journals(id, identifier_1, identifier_2)
//   categories(id, name, quartile)        -- one row per (name, quartile)
//   areas(id, name)
//   journals_categories, journals_areas, areas_categories  -- junctions
//
// Surrogate `id` columns never leave this crate's SQL: query handlers strip
// them from every row they return.

use crate::entities::{IdentifierSet, Quartile};
use crate::error::Result;
use crate::parser::TaxonomyRecord;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::Serialize;
use std::path::Path;

/// Open an existing store for one query; the connection closes on drop
///
/// A missing file is an error rather than a fresh empty database, and the
/// connection refuses writes.
pub fn open_for_query(path: &str) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        Path::new(path),
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.pragma_update(None, "query_only", true)?;
    Ok(conn)
}

/// Open (creating if needed) the store for an upload
pub fn open_read_write(path: &str) -> Result<Connection> {
    let conn = Connection::open(Path::new(path))?;
    setup_database(&conn)?;
    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Entity tables
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS journals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            identifier_1 TEXT,
            identifier_2 TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            quartile TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS areas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        [],
    )?;

    // ==========================================================================
    // Junction tables
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS journals_categories (
            journal_id INTEGER NOT NULL REFERENCES journals(id),
            category_id INTEGER NOT NULL REFERENCES categories(id),
            PRIMARY KEY (journal_id, category_id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS journals_areas (
            journal_id INTEGER NOT NULL REFERENCES journals(id),
            area_id INTEGER NOT NULL REFERENCES areas(id),
            PRIMARY KEY (journal_id, area_id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS areas_categories (
            area_id INTEGER NOT NULL REFERENCES areas(id),
            category_id INTEGER NOT NULL REFERENCES categories(id),
            PRIMARY KEY (area_id, category_id)
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_journals_identifier_1 ON journals(identifier_1)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_journals_identifier_2 ON journals(identifier_2)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(name, quartile)",
        [],
    )?;

    Ok(())
}

/// Rows written by one upload (already-present rows are not counted)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadStats {
    pub journals: usize,
    pub categories: usize,
    pub areas: usize,
    pub assignments: usize,
}

/// Normalize taxonomy records into the six tables
///
/// Re-running with the same records inserts nothing new: entities are
/// looked up before insertion and junction rows are keyed.
pub fn insert_taxonomy_records(
    conn: &mut Connection,
    records: &[TaxonomyRecord],
) -> Result<UploadStats> {
    let tx = conn.transaction()?;
    let mut stats = UploadStats::default();

    for record in records {
        let ids = IdentifierSet::new(record.identifiers.iter().map(String::as_str))?;
        let mut slots = ids.iter();
        let identifier_1 = slots.next();
        let identifier_2 = slots.next();

        let journal_id = match tx
            .query_row(
                "SELECT id FROM journals WHERE identifier_1 IS ?1 AND identifier_2 IS ?2",
                params![identifier_1, identifier_2],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
        {
            Some(id) => id,
            None => {
                tx.execute(
                    "INSERT INTO journals (identifier_1, identifier_2) VALUES (?1, ?2)",
                    params![identifier_1, identifier_2],
                )?;
                stats.journals += 1;
                tx.last_insert_rowid()
            }
        };

        let mut category_ids = Vec::with_capacity(record.categories.len());
        for assignment in &record.categories {
            let quartile = Quartile::parse_optional(assignment.quartile.as_deref())?;
            let category_id = match tx
                .query_row(
                    "SELECT id FROM categories WHERE name = ?1 AND quartile IS ?2",
                    params![assignment.id, quartile],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?
            {
                Some(id) => id,
                None => {
                    tx.execute(
                        "INSERT INTO categories (name, quartile) VALUES (?1, ?2)",
                        params![assignment.id, quartile],
                    )?;
                    stats.categories += 1;
                    tx.last_insert_rowid()
                }
            };

            stats.assignments += tx.execute(
                "INSERT OR IGNORE INTO journals_categories (journal_id, category_id) VALUES (?1, ?2)",
                params![journal_id, category_id],
            )?;
            category_ids.push(category_id);
        }

        for area in &record.areas {
            let area_id = match tx
                .query_row(
                    "SELECT id FROM areas WHERE name = ?1",
                    params![area],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?
            {
                Some(id) => id,
                None => {
                    tx.execute("INSERT INTO areas (name) VALUES (?1)", params![area])?;
                    stats.areas += 1;
                    tx.last_insert_rowid()
                }
            };

            stats.assignments += tx.execute(
                "INSERT OR IGNORE INTO journals_areas (journal_id, area_id) VALUES (?1, ?2)",
                params![journal_id, area_id],
            )?;

            // Areas and categories listed on the same journal are co-assigned
            for category_id in &category_ids {
                stats.assignments += tx.execute(
                    "INSERT OR IGNORE INTO areas_categories (area_id, category_id) VALUES (?1, ?2)",
                    params![area_id, category_id],
                )?;
            }
        }
    }

    tx.commit()?;
    Ok(stats)
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;

    Ok(count)
}
