//! Emporia Core — shared types, traits, and errors.
//!
//! This crate provides the foundational types used across all Emporia crates.
//! It has no internal Emporia dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`descriptor`]: Per-resource REST descriptors
//! - [`page`]: Pagination state and list query parameters
//! - [`state`]: The resource state record mutated by containers
//! - [`traits`]: Core traits for entity identity

pub mod descriptor;
pub mod error;
pub mod page;
pub mod state;
pub mod traits;

// Re-export key types at crate root for convenience
pub use descriptor::ResourceDescriptor;
pub use error::{Error, Result};
pub use page::{ListParams, PageState, SortOrder};
pub use state::{ResourceState, StatMap};
pub use traits::Identify;
