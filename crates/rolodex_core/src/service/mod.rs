//! Core use-case services.
//!
//! # Responsibility
//! - Enforce business rules before delegating to repositories.
//! - Keep the console layer decoupled from storage details.

pub mod customer_service;
