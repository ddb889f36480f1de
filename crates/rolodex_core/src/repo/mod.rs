//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the customer data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories never validate; business rules live in the service layer.
//! - Storage failures are surfaced unchanged as `RepoError::Db`.

pub mod customer_repo;
