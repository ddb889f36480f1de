use rolodex_core::db::migrations::latest_version;
use rolodex_core::db::open_db_in_memory;
use rolodex_core::{Customer, CustomerRepository, RepoError, SqliteCustomerRepository};
use rusqlite::Connection;

fn john() -> Customer {
    Customer::new("John", "john@test.com", Some("123".to_string()))
}

#[test]
fn create_assigns_id_and_get_by_id_roundtrips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let created = repo.create(&john()).unwrap();
    assert_eq!(created.id, 1);
    assert!(created.is_persisted());

    let loaded = repo.get_by_id(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_ignores_payload_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let payload = Customer::with_id(77, "Ann", "ann@test.com", None);
    let created = repo.create(&payload).unwrap();
    assert_eq!(created.id, 1);
    assert!(!repo.exists(77).unwrap());
}

#[test]
fn get_by_id_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    assert!(repo.get_by_id(5).unwrap().is_none());
    assert!(!repo.exists(5).unwrap());
}

#[test]
fn get_all_returns_rows_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let first = repo.create(&john()).unwrap();
    let second = repo
        .create(&Customer::new("Ann", "ann@test.com", None))
        .unwrap();

    assert_eq!(repo.get_all().unwrap(), vec![first, second]);
}

#[test]
fn update_overwrites_all_fields_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let mut customer = repo.create(&john()).unwrap();
    customer.name = "Johnny".to_string();
    customer.email = "johnny@test.com".to_string();
    customer.phone = None;
    assert!(repo.update(&customer).unwrap());
    assert_eq!(repo.get_by_id(customer.id).unwrap().unwrap(), customer);

    let missing = Customer::with_id(99, "Ghost", "ghost@test.com", None);
    assert!(!repo.update(&missing).unwrap());
}

#[test]
fn delete_removes_row_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let created = repo.create(&john()).unwrap();
    assert!(repo.delete(created.id).unwrap());
    assert!(!repo.exists(created.id).unwrap());
    assert!(!repo.delete(created.id).unwrap());
}

#[test]
fn deleted_ids_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let first = repo.create(&john()).unwrap();
    repo.delete(first.id).unwrap();
    let second = repo.create(&john()).unwrap();
    assert!(second.id > first.id);
}

#[test]
fn duplicate_email_is_a_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    repo.create(&john()).unwrap();
    let err = repo
        .create(&Customer::new("Other John", "john@test.com", None))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(err.is_constraint_violation());
    assert_eq!(repo.get_all().unwrap().len(), 1);
}

#[test]
fn repository_does_not_validate_but_storage_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCustomerRepository::try_new(&conn).unwrap();

    let err = repo
        .create(&Customer::new(" ", "blank@test.com", None))
        .unwrap_err();
    assert!(err.is_constraint_violation());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteCustomerRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_customers_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCustomerRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("Customers"))
    ));
}

#[test]
fn repository_rejects_customers_table_missing_phone_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE Customers (
            CustomerID INTEGER PRIMARY KEY AUTOINCREMENT,
            Name TEXT NOT NULL,
            Email TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCustomerRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "Customers",
            column: "PhoneNumber"
        })
    ));
}
