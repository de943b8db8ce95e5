//! Owner repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide single-entity reads, existence checks, insert and delete over
//!   the `owners` table.
//! - Resolve a batch of owner ids in one query for ship creation.
//!
//! # Invariants
//! - `add` validates the draft before the insert.
//! - `delete` removes every `ship_owners` row of the owner through the
//!   foreign-key cascade; ships are never touched.

use crate::model::owner::{Owner, OwnerDraft, OwnerId};
use crate::repo::schema::{
    ensure_connection_ready, id_list_param, OWNERS_TABLE, SHIP_OWNERS_TABLE,
};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{Connection, OptionalExtension, Row};

const OWNER_SELECT_SQL: &str = "SELECT id, name FROM owners";

/// Repository interface for owner storage.
pub trait OwnerRepository {
    /// Lists every owner ordered by id.
    fn get_all(&self) -> RepoResult<Vec<Owner>>;
    fn get_by_id(&self, id: OwnerId) -> RepoResult<Option<Owner>>;
    /// Returns the owners whose id appears in `ids`; unknown ids are skipped.
    fn get_by_ids(&self, ids: &[OwnerId]) -> RepoResult<Vec<Owner>>;
    fn exists(&self, id: OwnerId) -> RepoResult<bool>;
    /// Inserts one owner and returns it with its generated id.
    fn add(&self, draft: &OwnerDraft) -> RepoResult<Owner>;
    /// Deletes one owner and its links. Returns `false` when nothing matched.
    fn delete(&self, id: OwnerId) -> RepoResult<bool>;
}

/// SQLite-backed owner repository.
pub struct SqliteOwnerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOwnerRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[OWNERS_TABLE, SHIP_OWNERS_TABLE])?;
        Ok(Self { conn })
    }
}

impl OwnerRepository for SqliteOwnerRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<Owner>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OWNER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut owners = Vec::new();
        while let Some(row) = rows.next()? {
            owners.push(parse_owner_row(row)?);
        }
        Ok(owners)
    }

    fn get_by_id(&self, id: OwnerId) -> RepoResult<Option<Owner>> {
        let owner = self
            .conn
            .query_row(
                &format!("{OWNER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| Ok((row.get::<_, OwnerId>("id")?, row.get::<_, String>("name")?)),
            )
            .optional()?;

        owner
            .map(|(id, name)| check_owner(Owner { id, name }))
            .transpose()
    }

    fn get_by_ids(&self, ids: &[OwnerId]) -> RepoResult<Vec<Owner>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "{OWNER_SELECT_SQL} WHERE id IN (SELECT value FROM json_each(?1)) ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([id_list_param(ids)?])?;
        let mut owners = Vec::new();
        while let Some(row) = rows.next()? {
            owners.push(parse_owner_row(row)?);
        }
        Ok(owners)
    }

    fn exists(&self, id: OwnerId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM owners WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn add(&self, draft: &OwnerDraft) -> RepoResult<Owner> {
        let draft = draft.validated()?;
        self.conn
            .execute("INSERT INTO owners (name) VALUES (?1);", [draft.name.as_str()])?;

        Ok(Owner {
            id: self.conn.last_insert_rowid(),
            name: draft.name,
        })
    }

    fn delete(&self, id: OwnerId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM owners WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

pub(crate) fn parse_owner_row(row: &Row<'_>) -> RepoResult<Owner> {
    check_owner(Owner {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn check_owner(owner: Owner) -> RepoResult<Owner> {
    if owner.name.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "empty name in owners.name for id {}",
            owner.id
        )));
    }
    Ok(owner)
}
