//! CLI commands

pub mod clean;
pub mod generate;
pub mod hook;
pub mod list;
pub mod new;
pub mod show;
pub mod validate;
