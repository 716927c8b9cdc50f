//! Business logic services.

pub mod application;
pub mod auth;
pub mod job;
pub mod revocation;
pub mod user;
