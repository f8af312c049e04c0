//! Data shapes exchanged with HTTP clients and the external auth service.

pub mod api;
pub mod auth;
pub mod profile;
