//! Core domain concepts shared across all subdomains.
//!
//! - [`persona::Persona`]: the two fixed debate participants
//! - [`topic::Topic`]: a validated debate topic
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod persona;
pub mod topic;
