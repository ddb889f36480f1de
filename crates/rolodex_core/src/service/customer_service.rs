//! Customer use-case service.
//!
//! # Responsibility
//! - Validate customer payloads at the service boundary.
//! - Map absence into `NotFound` and delegate persistence to the repository.
//!
//! # Invariants
//! - Preconditions fail fast in a fixed order: id mismatch, existence, fields.
//! - A rejected payload never reaches the repository write path.
//! - Storage errors are returned unchanged inside `Storage`.
//! - Log lines carry ids and outcomes only, never names, emails or phones.

use crate::model::customer::{Customer, CustomerId, CustomerValidationError};
use crate::repo::customer_repo::{CustomerRepository, RepoError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for customer use-cases.
#[derive(Debug)]
pub enum CustomerServiceError {
    /// Target customer does not exist.
    NotFound(CustomerId),
    /// Payload violates a field rule or carries the wrong id.
    Validation(CustomerValidationError),
    /// Persistence-layer failure, including constraint violations.
    Storage(RepoError),
}

impl CustomerServiceError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_failed",
            Self::Storage(err) if err.is_constraint_violation() => "constraint_violation",
            Self::Storage(_) => "storage_failed",
        }
    }
}

impl Display for CustomerServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Customer with ID {id} not found."),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CustomerServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<CustomerValidationError> for CustomerServiceError {
    fn from(value: CustomerValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CustomerServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

pub type CustomerServiceResult<T> = Result<T, CustomerServiceError>;

/// Customer service facade over repository implementations.
pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every customer.
    pub fn get_all(&self) -> CustomerServiceResult<Vec<Customer>> {
        let customers = self.repo.get_all().map_err(|err| {
            let err = CustomerServiceError::from(err);
            warn!(
                "event=customer_list module=service status=error error_code={} error={err}",
                err.code()
            );
            err
        })?;
        debug!(
            "event=customer_list module=service status=ok count={}",
            customers.len()
        );
        Ok(customers)
    }

    /// Gets one customer, failing with `NotFound` when absent.
    pub fn get_by_id(&self, id: CustomerId) -> CustomerServiceResult<Customer> {
        self.repo
            .get_by_id(id)
            .map_err(CustomerServiceError::from)
            .and_then(|found| found.ok_or(CustomerServiceError::NotFound(id)))
            .map_err(|err| log_failure("customer_get", id, err))
    }

    /// Validates and inserts a new customer; returns it with the assigned id.
    pub fn create(&self, customer: &Customer) -> CustomerServiceResult<Customer> {
        let result = customer
            .validate()
            .map_err(CustomerServiceError::from)
            .and_then(|()| self.repo.create(customer).map_err(CustomerServiceError::from));

        match result {
            Ok(created) => {
                info!(
                    "event=customer_create module=service status=ok customer_id={}",
                    created.id
                );
                Ok(created)
            }
            Err(err) => Err(log_failure("customer_create", customer.id, err)),
        }
    }

    /// Replaces name, email and phone of customer `id`.
    ///
    /// Returns the payload as given; the row is not read back.
    pub fn update(&self, id: CustomerId, customer: &Customer) -> CustomerServiceResult<Customer> {
        self.try_update(id, customer)
            .map_err(|err| log_failure("customer_update", id, err))?;
        info!("event=customer_update module=service status=ok customer_id={id}");
        Ok(customer.clone())
    }

    /// Hard-deletes customer `id`; returns whether a row was removed.
    pub fn delete(&self, id: CustomerId) -> CustomerServiceResult<bool> {
        let deleted = self
            .try_delete(id)
            .map_err(|err| log_failure("customer_delete", id, err))?;
        info!("event=customer_delete module=service status=ok customer_id={id} deleted={deleted}");
        Ok(deleted)
    }

    fn try_update(&self, id: CustomerId, customer: &Customer) -> CustomerServiceResult<()> {
        if id != customer.id {
            return Err(CustomerValidationError::IdMismatch {
                expected: id,
                actual: customer.id,
            }
            .into());
        }

        if !self.repo.exists(id)? {
            return Err(CustomerServiceError::NotFound(id));
        }

        customer.validate()?;

        if !self.repo.update(customer)? {
            return Err(CustomerServiceError::NotFound(id));
        }
        Ok(())
    }

    fn try_delete(&self, id: CustomerId) -> CustomerServiceResult<bool> {
        if !self.repo.exists(id)? {
            return Err(CustomerServiceError::NotFound(id));
        }
        Ok(self.repo.delete(id)?)
    }
}

fn log_failure(
    event: &'static str,
    id: CustomerId,
    err: CustomerServiceError,
) -> CustomerServiceError {
    warn!(
        "event={event} module=service status=error customer_id={id} error_code={} error={err}",
        err.code()
    );
    err
}
