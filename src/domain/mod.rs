//! Domain aggregates exposed by the lognest service layer.

pub mod interaction;
pub mod log;
pub mod project;
pub mod tag;
pub mod types;
pub mod user_profile;
