//! Streaming window tracking: which cells are near the observer.
//!
//! # Invariants
//! - After each update the active window is exactly the square radius-R
//!   neighborhood of the observer's cell; it is never observable
//!   half-transitioned.
//! - A tick that stays within the same cell is O(1) and emits nothing.

pub mod tracker;

pub use tracker::{WindowConfig, WindowDelta, WindowError, WindowStats, WindowTracker};

pub fn crate_info() -> &'static str {
    "gridstream-window v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("window"));
    }
}
