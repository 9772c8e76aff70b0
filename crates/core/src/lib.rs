//! Domain model for the PII-masking workflow console.
//!
//! Pure types and rules with no IO: roles and the permission table,
//! data-type categories, the PII attribute catalog, column mappings,
//! row filters, workflow drafts/definitions, execution records, and
//! constraint check results. The client and console crates build on
//! these.

pub mod category;
pub mod constraint;
pub mod error;
pub mod execution;
pub mod filter;
pub mod mapping;
pub mod permissions;
pub mod pii_catalog;
pub mod roles;
pub mod workflow;
