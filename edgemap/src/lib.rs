//! edgemap - Gradient edge maps for Rust
//!
//! Turns grayscale images into stylized edge maps with four gradient
//! operator families (Roberts, Prewitt, Sobel, Frei-Chen), each followed by
//! its own normalization, contrast stretch, gamma and scale tuning.
//!
//! # Example
//!
//! ```
//! use edgemap::ScalarField;
//! use edgemap::filter::{OperatorKind, OperatorRegistry, apply};
//!
//! let field = ScalarField::from_rows(&[
//!     [0.0, 0.0, 0.0, 0.0],
//!     [0.0, 1.0, 1.0, 0.0],
//!     [0.0, 1.0, 1.0, 0.0],
//!     [0.0, 0.0, 0.0, 0.0],
//! ])
//! .unwrap();
//!
//! let registry = OperatorRegistry::standard();
//! let sobel = registry.get(OperatorKind::PrewittB).unwrap();
//! let edges = apply(&field, sobel).unwrap();
//! assert_eq!(edges.dimensions(), (4, 4));
//! ```
//!
//! Whole directories of images are processed with [`run_batch`].

// Re-export core types (primary data structures used everywhere)
pub use edgemap_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use edgemap_filter as filter;
pub use edgemap_io as io;

pub mod batch;

pub use batch::{BatchError, BatchInput, BatchOutput, BatchReport, BatchResult, run_batch};
