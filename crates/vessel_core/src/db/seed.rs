//! Sample fleet used for local runs and demos.

use super::DbResult;
use log::info;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Sample owners, ship and link were inserted.
    Seeded,
    /// Registry already held data; nothing was written.
    SkippedNotEmpty,
}

const SAMPLE_OWNERS: [&str; 2] = ["Example Cruises", "Maritime Inc."];
const SAMPLE_SHIP: (&str, &str, &str, f64) = ("Ocean Explorer", "1234567", "Cruise", 5000.0);

/// Inserts the sample fleet when both `owners` and `ships` are empty.
///
/// The ship is owned by the first sample owner. Runs in one transaction.
pub fn seed_sample_fleet(conn: &Connection) -> DbResult<SeedOutcome> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let populated: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM owners) OR EXISTS(SELECT 1 FROM ships);",
        [],
        |row| row.get(0),
    )?;
    if populated == 1 {
        info!("event=db_seed module=db status=skipped reason=not_empty");
        return Ok(SeedOutcome::SkippedNotEmpty);
    }

    let mut owner_ids = Vec::with_capacity(SAMPLE_OWNERS.len());
    for name in SAMPLE_OWNERS {
        tx.execute("INSERT INTO owners (name) VALUES (?1);", [name])?;
        owner_ids.push(tx.last_insert_rowid());
    }

    let (name, imo_number, ship_type, tonnage) = SAMPLE_SHIP;
    tx.execute(
        "INSERT INTO ships (name, imo_number, type, tonnage) VALUES (?1, ?2, ?3, ?4);",
        params![name, imo_number, ship_type, tonnage],
    )?;
    let ship_id = tx.last_insert_rowid();
    tx.execute(
        "INSERT INTO ship_owners (owner_id, ship_id) VALUES (?1, ?2);",
        params![owner_ids[0], ship_id],
    )?;
    tx.commit()?;

    info!(
        "event=db_seed module=db status=ok owners={} ships=1",
        owner_ids.len()
    );
    Ok(SeedOutcome::Seeded)
}
