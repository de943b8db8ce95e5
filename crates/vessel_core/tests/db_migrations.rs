use rusqlite::Connection;
use vessel_core::db::migrations::latest_version;
use vessel_core::db::{open_db, open_db_in_memory, seed_sample_fleet, DbError, SeedOutcome};
use vessel_core::{RepoError, SqliteOwnerRepository, SqliteShipRepository};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "owners");
    assert_table_exists(&conn, "ships");
    assert_table_exists(&conn, "ship_owners");
}

#[test]
fn opened_connection_enforces_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let err = conn
        .execute(
            "INSERT INTO ship_owners (owner_id, ship_id) VALUES (41, 42);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn schema_rejects_malformed_rows() {
    let conn = open_db_in_memory().unwrap();

    let bad_imo = conn.execute(
        "INSERT INTO ships (name, imo_number, type, tonnage) VALUES ('A', '12a4567', 'Cargo', 10);",
        [],
    );
    assert!(bad_imo.is_err());

    let bad_tonnage = conn.execute(
        "INSERT INTO ships (name, imo_number, type, tonnage) VALUES ('A', '1234567', 'Cargo', 0);",
        [],
    );
    assert!(bad_tonnage.is_err());

    let blank_owner = conn.execute("INSERT INTO owners (name) VALUES ('   ');", []);
    assert!(blank_owner.is_err());
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO owners (name) VALUES ('Kept');", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let owners: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM owners;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(owners, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repositories_reject_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteOwnerRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        }) => {
            assert_eq!(expected_version, latest_version());
            assert_eq!(actual_version, 0);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unmigrated connection must be rejected"),
    }
    assert!(SqliteShipRepository::try_new(&conn).is_err());
}

#[test]
fn seed_sample_fleet_inserts_once() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(seed_sample_fleet(&conn).unwrap(), SeedOutcome::Seeded);
    assert_eq!(
        seed_sample_fleet(&conn).unwrap(),
        SeedOutcome::SkippedNotEmpty
    );

    let owners: Vec<String> = conn
        .prepare("SELECT name FROM owners ORDER BY id;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(owners, vec!["Example Cruises", "Maritime Inc."]);

    let (ship, imo, owner): (String, String, String) = conn
        .query_row(
            "SELECT s.name, s.imo_number, o.name
             FROM ships s
             JOIN ship_owners so ON so.ship_id = s.id
             JOIN owners o ON o.id = so.owner_id;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(ship, "Ocean Explorer");
    assert_eq!(imo, "1234567");
    assert_eq!(owner, "Example Cruises");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
