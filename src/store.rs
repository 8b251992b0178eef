use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use crate::error::Result;

const MEMORY_URL: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishRecord {
    pub id: i64,
    pub name: String,
    pub canonical_dish_key: Option<String>,
}

/// Open the catalog at `url`: a file path, `sqlite://path` or `:memory:`.
pub fn connect(url: &str) -> Result<Connection> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    let conn = if path == MEMORY_URL {
        Connection::open_in_memory()?
    } else {
        Connection::open(path)?
    };
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS dishes (
            id                 INTEGER PRIMARY KEY,
            name               TEXT NOT NULL,
            name_key           TEXT NOT NULL,
            canonical_dish_key TEXT
        );
        ",
    )?;
    add_name_key_column(conn)?;
    ensure_name_index(conn)
}

/// Uniqueness key for a dish name: Unicode lowercase.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

// Catalogs created before `name_key` existed get the column and a backfill.
fn add_name_key_column(conn: &Connection) -> Result<()> {
    let has_column = conn
        .prepare("SELECT 1 FROM pragma_table_info('dishes') WHERE name = 'name_key'")?
        .exists([])?;
    if has_column {
        return Ok(());
    }

    conn.execute_batch(
        "DROP INDEX IF EXISTS dishes_name_unique_idx;
         ALTER TABLE dishes ADD COLUMN name_key TEXT NOT NULL DEFAULT '';",
    )?;
    let rows = conn
        .prepare("SELECT id, name FROM dishes")?
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let mut stmt = conn.prepare("UPDATE dishes SET name_key = ?1 WHERE id = ?2")?;
    for (id, name) in rows {
        stmt.execute(params![name_key(&name), id])?;
    }
    Ok(())
}

/// Names are unique ignoring case.
pub fn ensure_name_index(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS dishes_name_key_unique_idx ON dishes (name_key);",
    )?;
    Ok(())
}

const INSERT_IF_ABSENT: &str =
    "INSERT INTO dishes (name, name_key) VALUES (?1, ?2) ON CONFLICT DO NOTHING";

/// Insert `name` unless its lowercase form is already present.
pub fn insert_name_if_absent(conn: &Connection, name: &str) -> Result<bool> {
    let n = conn
        .prepare_cached(INSERT_IF_ABSENT)?
        .execute(params![name, name_key(name)])?;
    Ok(n > 0)
}

/// Insert a batch of names in one transaction, returning rows inserted.
///
/// The unique index is created before the first insert. Any error rolls the
/// whole batch back.
pub fn insert_names<S: AsRef<str>>(conn: &Connection, names: &[S]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    init_schema(&tx)?;
    let mut count = 0;
    for name in names {
        if insert_name_if_absent(&tx, name.as_ref())? {
            count += 1;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub fn count_dishes(conn: &Connection) -> Result<usize> {
    let n: usize = conn.query_row("SELECT COUNT(*) FROM dishes", [], |r| r.get(0))?;
    Ok(n)
}

fn row_to_dish(row: &rusqlite::Row<'_>) -> rusqlite::Result<DishRecord> {
    Ok(DishRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        canonical_dish_key: row.get(2)?,
    })
}

// ── CRUD ──

/// Dishes whose name contains `q` (case-sensitive), by id.
///
/// A negative `limit` is treated as zero.
pub fn search_dishes(conn: &Connection, q: &str, limit: i64) -> Result<Vec<DishRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, canonical_dish_key FROM dishes
         WHERE instr(name, ?1) > 0
         ORDER BY id ASC
         LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(params![q, limit.max(0)], row_to_dish)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn get_dish(conn: &Connection, id: i64) -> Result<Option<DishRecord>> {
    let dish = conn
        .query_row(
            "SELECT id, name, canonical_dish_key FROM dishes WHERE id = ?1",
            params![id],
            row_to_dish,
        )
        .optional()?;
    Ok(dish)
}

pub fn create_dish(
    conn: &Connection,
    name: &str,
    canonical_dish_key: Option<&str>,
) -> Result<DishRecord> {
    let dish = conn.query_row(
        "INSERT INTO dishes (name, name_key, canonical_dish_key) VALUES (?1, ?2, ?3)
         RETURNING id, name, canonical_dish_key",
        params![name, name_key(name), canonical_dish_key],
        row_to_dish,
    )?;
    Ok(dish)
}

/// Fields to change; `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct DishChanges<'a> {
    pub name: Option<&'a str>,
    pub canonical_dish_key: Option<&'a str>,
}

impl DishChanges<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.canonical_dish_key.is_none()
    }
}

/// Apply `changes` to dish `id`; `None` when no such dish exists.
///
/// Callers reject empty change sets before getting here.
pub fn update_dish(
    conn: &Connection,
    id: i64,
    changes: &DishChanges<'_>,
) -> Result<Option<DishRecord>> {
    let key = changes.name.map(name_key);
    let mut sets = Vec::new();
    let mut params: Vec<&dyn rusqlite::types::ToSql> = Vec::new();

    if let (Some(name), Some(key)) = (&changes.name, &key) {
        sets.push(format!("name = ?{}", params.len() + 1));
        params.push(name);
        sets.push(format!("name_key = ?{}", params.len() + 1));
        params.push(key);
    }
    if let Some(key) = &changes.canonical_dish_key {
        sets.push(format!("canonical_dish_key = ?{}", params.len() + 1));
        params.push(key);
    }
    if sets.is_empty() {
        return get_dish(conn, id);
    }

    let sql = format!(
        "UPDATE dishes SET {} WHERE id = ?{}
         RETURNING id, name, canonical_dish_key",
        sets.join(", "),
        params.len() + 1
    );
    params.push(&id);

    let dish = conn
        .query_row(&sql, params.as_slice(), row_to_dish)
        .optional()?;
    Ok(dish)
}

/// Delete dish `id`; false when it did not exist.
pub fn delete_dish(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM dishes WHERE id = ?1", params![id])?;
    Ok(n > 0)
}
