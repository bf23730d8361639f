//! Core data structures for meshquant
//!
//! This crate provides the vertex and face containers shared by every stage of the
//! quantization pipeline, the common error type, and per-axis geometry statistics.

pub mod point;
pub mod mesh;
pub mod statistics;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use statistics::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
