//! edgemap-core - Basic data structures for the edge-map pipeline
//!
//! This crate provides the containers shared by every stage:
//!
//! - [`ScalarField`] - A 2D array of `f64` values (intensity, gradient
//!   magnitude, normalized edge strength)
//! - [`GrayImage`] - An 8-bit grayscale raster, the quantized form of a
//!   field that is handed to encoders
//!
//! Fields are treated as values: every pipeline stage takes a `&ScalarField`
//! and returns a new one.

pub mod error;
pub mod field;
pub mod gray;

pub use error::{Error, Result};
pub use field::ScalarField;
pub use gray::GrayImage;
