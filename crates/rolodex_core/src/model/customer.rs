//! Customer record and field validation.
//!
//! # Invariants
//! - `id == UNASSIGNED_CUSTOMER_ID` until storage assigns one on insert.
//! - `validate()` reports the first violated rule only, in a fixed order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned customer identifier (`Customers.CustomerID`).
pub type CustomerId = i64;

/// Id carried by a customer that has not been inserted yet.
pub const UNASSIGNED_CUSTOMER_ID: CustomerId = 0;

pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 100;
pub const PHONE_MAX_CHARS: usize = 20;

// One `@`, no whitespace, a dot somewhere in the domain part.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-(). ]+$").expect("valid phone regex"));

/// Field rule violated by a customer payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerValidationError {
    /// Update target id differs from the id carried by the payload.
    IdMismatch {
        expected: CustomerId,
        actual: CustomerId,
    },
    NameRequired,
    EmailRequired,
    NameTooLong { chars: usize },
    EmailTooLong { chars: usize },
    InvalidEmail,
    PhoneTooLong { chars: usize },
    InvalidPhone,
}

impl Display for CustomerValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdMismatch { .. } => write!(f, "Customer ID mismatch."),
            Self::NameRequired => write!(f, "Customer name is required."),
            Self::EmailRequired => write!(f, "Customer email is required."),
            Self::NameTooLong { chars } => write!(
                f,
                "Customer name must be at most {NAME_MAX_CHARS} characters (got {chars})."
            ),
            Self::EmailTooLong { chars } => write!(
                f,
                "Customer email must be at most {EMAIL_MAX_CHARS} characters (got {chars})."
            ),
            Self::InvalidEmail => write!(f, "Customer email is not a valid email address."),
            Self::PhoneTooLong { chars } => write!(
                f,
                "Customer phone must be at most {PHONE_MAX_CHARS} characters (got {chars})."
            ),
            Self::InvalidPhone => write!(f, "Customer phone is not a valid phone number."),
        }
    }
}

impl Error for CustomerValidationError {}

/// Canonical customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Assigned by storage; `UNASSIGNED_CUSTOMER_ID` before insert.
    #[serde(default)]
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Customer {
    /// Creates a customer that has not been persisted yet.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
    ) -> Self {
        Self::with_id(UNASSIGNED_CUSTOMER_ID, name, email, phone)
    }

    /// Creates a customer carrying an existing storage id.
    ///
    /// Used for update payloads; does not check that `id` exists.
    pub fn with_id(
        id: CustomerId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone,
        }
    }

    /// Returns whether storage has assigned an id to this record.
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_CUSTOMER_ID
    }

    /// Checks field rules and returns the first violation.
    ///
    /// Order: name required, email required, name length, email length,
    /// email syntax, phone length, phone syntax.
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        if self.name.trim().is_empty() {
            return Err(CustomerValidationError::NameRequired);
        }
        if self.email.trim().is_empty() {
            return Err(CustomerValidationError::EmailRequired);
        }

        let name_chars = self.name.chars().count();
        if name_chars > NAME_MAX_CHARS {
            return Err(CustomerValidationError::NameTooLong { chars: name_chars });
        }

        let email_chars = self.email.chars().count();
        if email_chars > EMAIL_MAX_CHARS {
            return Err(CustomerValidationError::EmailTooLong { chars: email_chars });
        }
        if !EMAIL_RE.is_match(&self.email) {
            return Err(CustomerValidationError::InvalidEmail);
        }

        if let Some(phone) = self.phone.as_deref() {
            let phone_chars = phone.chars().count();
            if phone_chars > PHONE_MAX_CHARS {
                return Err(CustomerValidationError::PhoneTooLong { chars: phone_chars });
            }
            if !phone.trim().is_empty() && !PHONE_RE.is_match(phone) {
                return Err(CustomerValidationError::InvalidPhone);
            }
        }

        Ok(())
    }
}
