//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//!
//! Adapters convert between domain types and infrastructure-specific
//! representations. They contain no business logic.

pub mod persistence;
