//! Pattern matching module
//!
//! Destination paths and the policy keys they are looked up against.

pub mod matcher;

pub use matcher::{canonical_path, PathPattern};
