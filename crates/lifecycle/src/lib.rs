//! Lifecycle sink: spawns and despawns objects as the window moves.
//!
//! # Invariants
//! - A cell is in the live index iff it is in the active window and has a
//!   registry descriptor.
//! - Object handles are owned: the factory hands one out on instantiate,
//!   and `destroy` consumes it. The sink is the single release point.

pub mod streamer;
pub mod world;

pub use streamer::{CellEvent, ObjectFactory, Streamer};
pub use world::{ObjectData, ObjectWorld};

pub fn crate_info() -> &'static str {
    "gridstream-lifecycle v0.1.0"
}
