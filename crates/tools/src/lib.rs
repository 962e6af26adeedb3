//! Developer tooling: read-only inspection of streamer state.
//!
//! # Invariants
//! - Everything here is a read-only snapshot query; core state is never
//!   mutated from this crate.

pub mod inspector;

pub use inspector::{StreamInspector, StreamSummary};

pub fn crate_info() -> &'static str {
    "gridstream-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
