use rolodex_core::db::migrations::latest_version;
use rolodex_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_customers_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_object_exists(&conn, "table", "Customers");
    assert_object_exists(&conn, "index", "IX_Customers_Email");
}

#[test]
fn opening_same_database_twice_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("customers.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO Customers (Name, Email) VALUES ('Ann', 'ann@test.com');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM Customers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn existing_customers_table_is_adopted_without_data_loss() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE Customers (
            CustomerID INTEGER PRIMARY KEY AUTOINCREMENT,
            Name TEXT NOT NULL,
            Email TEXT NOT NULL,
            PhoneNumber TEXT NULL
        );
        INSERT INTO Customers (Name, Email) VALUES ('Legacy', 'legacy@test.com');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let name: String = conn
        .query_row("SELECT Name FROM Customers WHERE CustomerID = 1;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "Legacy");
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
fn schema_rejects_rows_violating_column_constraints() {
    let conn = open_db_in_memory().unwrap();

    for (name, email, phone) in [
        ("   ", "blank@test.com", None),
        ("Ann", "not-an-email", None),
        ("Ann", "ann@test.com", Some("1".repeat(21))),
    ] {
        let err = conn
            .execute(
                "INSERT INTO Customers (Name, Email, PhoneNumber) VALUES (?1, ?2, ?3);",
                rusqlite::params![name, email, phone],
            )
            .unwrap_err();
        assert!(DbError::from(err).is_constraint_violation());
    }

    let long_name = "n".repeat(101);
    let err = conn
        .execute(
            "INSERT INTO Customers (Name, Email) VALUES (?1, 'long@test.com');",
            [long_name],
        )
        .unwrap_err();
    assert!(DbError::from(err).is_constraint_violation());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_object_exists(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
