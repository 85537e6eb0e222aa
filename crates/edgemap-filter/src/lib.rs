//! edgemap-filter - Gradient edge operators
//!
//! This crate implements the edge-map pipeline:
//!
//! - Gradient kernels for the Roberts, Prewitt, Sobel and Frei-Chen families
//! - Convolution with reflective borders
//! - Gradient magnitude from a horizontal/vertical response pair
//! - Post-processing: min-max normalization, percentile contrast stretch,
//!   gamma remapping, linear scaling
//! - An immutable operator registry, optionally tuned from a JSON config
//!
//! # Example
//!
//! ```
//! use edgemap_core::ScalarField;
//! use edgemap_filter::{OperatorRegistry, apply};
//!
//! let field = ScalarField::from_rows(&[
//!     [0.0, 0.0, 1.0, 1.0],
//!     [0.0, 0.0, 1.0, 1.0],
//!     [0.0, 0.0, 1.0, 1.0],
//! ])
//! .unwrap();
//!
//! let registry = OperatorRegistry::standard();
//! for op in &registry {
//!     let edges = apply(&field, op).unwrap();
//!     assert_eq!(edges.dimensions(), field.dimensions());
//! }
//! ```

pub mod chain;
pub mod config;
pub mod convolve;
pub mod enhance;
mod error;
pub mod gradient;
pub mod kernel;
pub mod operator;
pub mod registry;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used items
pub use chain::{PostProcessChain, PostProcessParams, Stage};
pub use config::{OperatorConfig, ParamsOverride, load_config};
pub use convolve::convolve;
pub use enhance::{contrast_stretch, gamma_correct, normalize_min_max, percentile, scale_linear};
pub use gradient::{combine, gradient_magnitude};
pub use operator::{OperatorDefinition, OperatorKind, apply};
pub use registry::OperatorRegistry;
