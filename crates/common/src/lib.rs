//! Shared types for the gridstream object-streaming controller.
//!
//! # Invariants
//! - `GridCell` is a plain value type; equality is exact integer comparison.
//! - Grid math is pure: the same world position always maps to the same cell.

pub mod types;

pub use types::{GridCell, ObjectId};

pub fn crate_info() -> &'static str {
    "gridstream-common v0.1.0"
}
