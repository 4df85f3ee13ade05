//! compression/mod.rs
//! Whole-buffer compression codecs.
//!
//! Notes:
//! - Every chunk is compressed independently, which keeps output deterministic
//!   and lets chunks be compressed in any order on any worker.
//! - The registry resolves codec kinds to shared `Arc<dyn Codec>` instances.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use registry::*;
