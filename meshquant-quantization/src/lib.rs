//! # meshquant quantization
//!
//! Adaptive normalization, quantization and reconstruction of mesh vertices.
//!
//! The pipeline inspects per-axis spread, picks a normalization strategy, maps the
//! normalized coordinates onto a fixed number of integer levels, reconstructs the
//! vertices from that lossy representation and measures how far they moved.

pub mod config;
pub mod selector;
pub mod normalize;
pub mod quantize;
pub mod evaluate;
pub mod pipeline;

// Re-export commonly used items
pub use config::*;
pub use selector::*;
pub use normalize::*;
pub use quantize::*;
pub use evaluate::*;
pub use pipeline::*;
