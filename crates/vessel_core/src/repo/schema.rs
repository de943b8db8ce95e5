//! Connection readiness checks shared by the SQLite repositories.

use crate::db::migrations::{current_user_version, latest_version};
use crate::repo::{RepoError, RepoResult};
use rusqlite::Connection;

/// Tables (and their columns) a repository needs before it can run.
pub(crate) type TableRequirement = (&'static str, &'static [&'static str]);

pub(crate) const OWNERS_TABLE: TableRequirement = ("owners", &["id", "name"]);
pub(crate) const SHIPS_TABLE: TableRequirement = (
    "ships",
    &["id", "name", "imo_number", "type", "tonnage"],
);
pub(crate) const SHIP_OWNERS_TABLE: TableRequirement = ("ship_owners", &["owner_id", "ship_id"]);

pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    requirements: &[TableRequirement],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in requirements {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Encodes ids as one JSON array parameter for `json_each(?N)`.
/// The list is always one host parameter, whatever its length.
pub(crate) fn id_list_param(ids: &[i64]) -> RepoResult<String> {
    serde_json::to_string(ids)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode id list: {err}")))
}
