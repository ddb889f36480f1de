//! Core domain logic for Rolodex customer management.
//! Owns the customer model, its storage and the business rules around it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::customer::{Customer, CustomerId, CustomerValidationError, UNASSIGNED_CUSTOMER_ID};
pub use repo::customer_repo::{CustomerRepository, RepoError, RepoResult, SqliteCustomerRepository};
pub use service::customer_service::{CustomerService, CustomerServiceError, CustomerServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
