//! Customer domain model.
//!
//! # Responsibility
//! - Define the canonical customer record shared by every layer.
//! - Own the field rules checked before any write reaches storage.
//!
//! # Invariants
//! - A persisted customer always has a non-blank name and email.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod customer;
