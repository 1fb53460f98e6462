//! Shared parameter records for the umbra renderer.
//!
//! # Invariants
//! - Records are plain data, copied by value, and own no GPU resources.

mod types;

pub use types::{OrthoSettings, PerspectiveSettings};

pub fn crate_info() -> &'static str {
    "umbra-common v0.1.0"
}
