//! Stateful controllers for the PII-masking workflow console.
//!
//! Exposes the four-step workflow wizard, the execution lifecycle
//! controller, the constraint check aggregator, and the preview
//! projector, all working against the collaborator traits in
//! [`services`]. The HTTP adapters live in `maskadmin-client`; tests
//! substitute in-memory mocks.

pub mod constraints;
pub mod lifecycle;
pub mod notice;
pub mod preview;
pub mod services;
pub mod session;
pub mod wizard;
