//! Shared domain types for the filmlog workspace.
//!
//! Everything here is plain data: the transient [`movie::Movie`] shape the
//! metadata provider returns, the browse category tokens, and the common
//! error/id/timestamp types the other crates build on.

pub mod error;
pub mod movie;
pub mod types;
