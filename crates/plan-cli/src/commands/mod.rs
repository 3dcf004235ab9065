//! CLI command implementations

pub mod capacity;
pub mod catalog;
pub mod inventory;
pub mod plan;
pub mod validate;
