//! Cell registry: the static mapping from grid cell to spawn descriptor.
//!
//! # Invariants
//! - Each cell holds at most one descriptor; duplicate insertion is rejected.
//! - The registry is built once at startup and read-only afterwards.

pub mod registry;

pub use registry::{CellRegistry, RegistryConfig, RegistryError, SpawnDescriptor};

pub fn crate_info() -> &'static str {
    "gridstream-registry v0.1.0"
}
