//! Database models and request-scoped models shared across the lognest API.

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod interaction;
pub mod log;
pub mod project;
pub mod tag;
pub mod user_profile;
