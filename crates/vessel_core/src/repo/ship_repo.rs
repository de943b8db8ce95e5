//! Ship repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `ships` plus the eager owner view of one ship.
//! - Own the ship + owner-link insert as a single transaction.
//! - Manage individual `ship_owners` rows for explicit link management.
//!
//! # Invariants
//! - `imo_number` uniqueness is backstopped by `idx_ships_imo_number`; a
//!   violation surfaces as `RepoError::DuplicateImo`, never as a panic.
//! - `add_with_owner_links` skips links to owners that no longer exist at
//!   insert time instead of failing the whole insert; the caller reports
//!   the skipped ids.
//! - Scalar updates never touch `ship_owners`.

use crate::model::entity::EntityKind;
use crate::model::owner::{Owner, OwnerId};
use crate::model::ship::{Ship, ShipDetails, ShipDraft, ShipId, ShipLink};
use crate::repo::owner_repo::parse_owner_row;
use crate::repo::schema::{
    ensure_connection_ready, id_list_param, OWNERS_TABLE, SHIPS_TABLE, SHIP_OWNERS_TABLE,
};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{ffi, params, Connection, Row, Transaction, TransactionBehavior};

const SHIP_SELECT_SQL: &str = "SELECT
    id,
    name,
    imo_number,
    type,
    tonnage
FROM ships";

/// Outcome of inserting a ship together with its owner links.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedInsert {
    pub ship: Ship,
    /// Links actually written, in requested order.
    pub linked: Vec<ShipLink>,
    /// Requested owners that were gone by insert time.
    pub skipped_owner_ids: Vec<OwnerId>,
}

/// Repository interface for ship storage.
pub trait ShipRepository {
    /// Lists every ship ordered by id.
    fn get_all(&self) -> RepoResult<Vec<Ship>>;
    fn get_by_id(&self, id: ShipId) -> RepoResult<Option<Ship>>;
    fn get_by_ids(&self, ids: &[ShipId]) -> RepoResult<Vec<Ship>>;
    fn exists(&self, id: ShipId) -> RepoResult<bool>;
    /// Inserts one ship without owner links.
    fn add(&self, draft: &ShipDraft) -> RepoResult<Ship>;
    /// Deletes one ship and its links. Returns `false` when nothing matched.
    fn delete(&self, id: ShipId) -> RepoResult<bool>;
    /// Loads one ship with owners resolved through `ship_owners`.
    fn get_with_links(&self, id: ShipId) -> RepoResult<Option<ShipDetails>>;
    /// Checks whether any ship (other than `excluding`) holds `imo_number`.
    fn imo_exists(&self, imo_number: &str, excluding: Option<ShipId>) -> RepoResult<bool>;
    /// Overwrites all scalar fields of one ship.
    fn update(&self, id: ShipId, draft: &ShipDraft) -> RepoResult<Ship>;
    /// Inserts one ship and a link per distinct owner id in one transaction.
    fn add_with_owner_links(
        &self,
        draft: &ShipDraft,
        owner_ids: &[OwnerId],
    ) -> RepoResult<LinkedInsert>;
    /// Links one owner to one ship. Returns `false` when the link already existed.
    fn link_owner(&self, link: ShipLink) -> RepoResult<bool>;
    /// Removes one link. Returns `false` when no such link existed.
    fn unlink_owner(&self, link: ShipLink) -> RepoResult<bool>;
}

/// SQLite-backed ship repository.
pub struct SqliteShipRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteShipRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[SHIPS_TABLE, OWNERS_TABLE, SHIP_OWNERS_TABLE])?;
        Ok(Self { conn })
    }
}

impl ShipRepository for SqliteShipRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<Ship>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SHIP_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut ships = Vec::new();
        while let Some(row) = rows.next()? {
            ships.push(parse_ship_row(row)?);
        }
        Ok(ships)
    }

    fn get_by_id(&self, id: ShipId) -> RepoResult<Option<Ship>> {
        load_ship(self.conn, id)
    }

    fn get_by_ids(&self, ids: &[ShipId]) -> RepoResult<Vec<Ship>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "{SHIP_SELECT_SQL} WHERE id IN (SELECT value FROM json_each(?1)) ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([id_list_param(ids)?])?;
        let mut ships = Vec::new();
        while let Some(row) = rows.next()? {
            ships.push(parse_ship_row(row)?);
        }
        Ok(ships)
    }

    fn exists(&self, id: ShipId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM ships WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn add(&self, draft: &ShipDraft) -> RepoResult<Ship> {
        let draft = draft.validated()?;
        insert_ship(self.conn, &draft)
    }

    fn delete(&self, id: ShipId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM ships WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn get_with_links(&self, id: ShipId) -> RepoResult<Option<ShipDetails>> {
        // Both reads see one snapshot so owners match the ship row.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let Some(ship) = load_ship(&tx, id)? else {
            return Ok(None);
        };
        let owners = load_owners_of_ship(&tx, id)?;
        tx.commit()?;
        Ok(Some(ShipDetails { ship, owners }))
    }

    fn imo_exists(&self, imo_number: &str, excluding: Option<ShipId>) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM ships
                WHERE imo_number = ?1
                  AND (?2 IS NULL OR id <> ?2)
            );",
            params![imo_number, excluding],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn update(&self, id: ShipId, draft: &ShipDraft) -> RepoResult<Ship> {
        let draft = draft.validated()?;
        let changed = self
            .conn
            .execute(
                "UPDATE ships
                 SET
                    name = ?1,
                    imo_number = ?2,
                    type = ?3,
                    tonnage = ?4
                 WHERE id = ?5;",
                params![
                    draft.name.as_str(),
                    draft.imo_number.as_str(),
                    draft.ship_type.as_str(),
                    draft.tonnage,
                    id,
                ],
            )
            .map_err(|err| map_imo_conflict(err, &draft.imo_number))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Ship,
                id,
            });
        }

        Ok(ship_from_draft(id, draft))
    }

    fn add_with_owner_links(
        &self,
        draft: &ShipDraft,
        owner_ids: &[OwnerId],
    ) -> RepoResult<LinkedInsert> {
        let draft = draft.validated()?;
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let ship = insert_ship(&tx, &draft)?;

        let mut linked = Vec::new();
        let mut skipped_owner_ids = Vec::new();
        for &owner_id in owner_ids {
            let link = ShipLink {
                owner_id,
                ship_id: ship.id,
            };
            if insert_link_if_owner_exists(&tx, link)? {
                linked.push(link);
            } else if !linked.contains(&link) && !skipped_owner_ids.contains(&owner_id) {
                skipped_owner_ids.push(owner_id);
            }
        }
        tx.commit()?;

        Ok(LinkedInsert {
            ship,
            linked,
            skipped_owner_ids,
        })
    }

    fn link_owner(&self, link: ShipLink) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO ship_owners (owner_id, ship_id) VALUES (?1, ?2);",
            params![link.owner_id, link.ship_id],
        )?;
        Ok(changed > 0)
    }

    fn unlink_owner(&self, link: ShipLink) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM ship_owners WHERE owner_id = ?1 AND ship_id = ?2;",
            params![link.owner_id, link.ship_id],
        )?;
        Ok(changed > 0)
    }
}

fn load_ship(conn: &Connection, id: ShipId) -> RepoResult<Option<Ship>> {
    let mut stmt = conn.prepare(&format!("{SHIP_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_ship_row(row)?));
    }
    Ok(None)
}

fn load_owners_of_ship(conn: &Connection, ship_id: ShipId) -> RepoResult<Vec<Owner>> {
    let mut stmt = conn.prepare(
        "SELECT o.id, o.name
         FROM ship_owners so
         INNER JOIN owners o ON o.id = so.owner_id
         WHERE so.ship_id = ?1
         ORDER BY o.id ASC;",
    )?;
    let mut rows = stmt.query([ship_id])?;
    let mut owners = Vec::new();
    while let Some(row) = rows.next()? {
        owners.push(parse_owner_row(row)?);
    }
    Ok(owners)
}

fn insert_ship(conn: &Connection, draft: &ShipDraft) -> RepoResult<Ship> {
    conn.execute(
        "INSERT INTO ships (name, imo_number, type, tonnage) VALUES (?1, ?2, ?3, ?4);",
        params![
            draft.name.as_str(),
            draft.imo_number.as_str(),
            draft.ship_type.as_str(),
            draft.tonnage,
        ],
    )
    .map_err(|err| map_imo_conflict(err, &draft.imo_number))?;

    Ok(ship_from_draft(conn.last_insert_rowid(), draft.clone()))
}

fn insert_link_if_owner_exists(conn: &Connection, link: ShipLink) -> RepoResult<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO ship_owners (owner_id, ship_id)
         SELECT ?1, ?2
         WHERE EXISTS (SELECT 1 FROM owners WHERE id = ?1);",
        params![link.owner_id, link.ship_id],
    )?;
    Ok(changed > 0)
}

fn ship_from_draft(id: ShipId, draft: ShipDraft) -> Ship {
    Ship {
        id,
        name: draft.name,
        imo_number: draft.imo_number,
        ship_type: draft.ship_type,
        tonnage: draft.tonnage,
    }
}

fn parse_ship_row(row: &Row<'_>) -> RepoResult<Ship> {
    let ship = Ship {
        id: row.get("id")?,
        name: row.get("name")?,
        imo_number: row.get("imo_number")?,
        ship_type: row.get("type")?,
        tonnage: row.get("tonnage")?,
    };

    if ship.imo_number.len() != 7 || !ship.imo_number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RepoError::InvalidData(format!(
            "invalid imo number `{}` in ships.imo_number",
            ship.imo_number
        )));
    }
    if !ship.tonnage.is_finite() || ship.tonnage <= 0.0 {
        return Err(RepoError::InvalidData(format!(
            "invalid tonnage `{}` in ships.tonnage",
            ship.tonnage
        )));
    }

    Ok(ship)
}

fn map_imo_conflict(err: rusqlite::Error, imo_number: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateImo(imo_number.to_string())
        }
        _ => err.into(),
    }
}
