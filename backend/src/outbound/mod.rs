//! Outbound adapters implementing the domain's driven ports.
//!
//! - `persistence`: Diesel/PostgreSQL repositories and migrations.
//! - `security`: bcrypt password hashing and JWT signing.

pub mod persistence;
pub mod security;
