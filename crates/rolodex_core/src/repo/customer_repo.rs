//! Customer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate customer CRUD intents into single SQL statements.
//! - Decode `Customers` rows into `Customer` values.
//!
//! # Invariants
//! - Each call is one statement; SQLite's per-statement atomicity is the only
//!   transaction boundary.
//! - Insert ignores the payload id and returns the storage-assigned one.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::customer::{Customer, CustomerId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CUSTOMER_SELECT_SQL: &str = "SELECT
    CustomerID,
    Name,
    Email,
    PhoneNumber
FROM Customers";

const REQUIRED_COLUMNS: [&str; 4] = ["CustomerID", "Name", "Email", "PhoneNumber"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for customer persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns whether storage rejected the write on a schema constraint,
    /// e.g. a duplicate email.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_constraint_violation())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted customer data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for customer CRUD operations.
pub trait CustomerRepository {
    /// Returns every customer ordered by id.
    fn get_all(&self) -> RepoResult<Vec<Customer>>;
    /// Returns `None` when no row carries `id`.
    fn get_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Inserts a row and returns the customer with its assigned id.
    fn create(&self, customer: &Customer) -> RepoResult<Customer>;
    /// Overwrites the row matching `customer.id`; `false` when none matched.
    fn update(&self, customer: &Customer) -> RepoResult<bool>;
    /// Removes the row; `false` when it was already absent.
    fn delete(&self, id: CustomerId) -> RepoResult<bool>;
    fn exists(&self, id: CustomerId) -> RepoResult<bool>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Rejects connections that did not go through `open_db`/`open_db_in_memory`
    /// or whose `Customers` table lacks a required column.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} ORDER BY CustomerID ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();

        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }

        Ok(customers)
    }

    fn get_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE CustomerID = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_customer_row(row)?));
        }

        Ok(None)
    }

    fn create(&self, customer: &Customer) -> RepoResult<Customer> {
        self.conn.execute(
            "INSERT INTO Customers (Name, Email, PhoneNumber) VALUES (?1, ?2, ?3);",
            params![
                customer.name.as_str(),
                customer.email.as_str(),
                customer.phone.as_deref(),
            ],
        )?;

        Ok(Customer {
            id: self.conn.last_insert_rowid(),
            ..customer.clone()
        })
    }

    fn update(&self, customer: &Customer) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE Customers
             SET
                Name = ?1,
                Email = ?2,
                PhoneNumber = ?3
             WHERE CustomerID = ?4;",
            params![
                customer.name.as_str(),
                customer.email.as_str(),
                customer.phone.as_deref(),
                customer.id,
            ],
        )?;

        Ok(changed > 0)
    }

    fn delete(&self, id: CustomerId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM Customers WHERE CustomerID = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn exists(&self, id: CustomerId) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM Customers WHERE CustomerID = ?1;",
                [id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let id: CustomerId = row.get("CustomerID")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id `{id}` in Customers.CustomerID"
        )));
    }

    Ok(Customer {
        id,
        name: row.get("Name")?,
        email: row.get("Email")?,
        phone: row.get("PhoneNumber")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "Customers")? {
        return Err(RepoError::MissingRequiredTable("Customers"));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "Customers", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "Customers",
                column,
            });
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
