//! Edge operators and the operator pipeline
//!
//! An [`OperatorDefinition`] bundles a horizontal/vertical kernel pair with
//! the post-processing tuning that gives the operator its visual style.
//! [`apply`] runs the whole pipeline:
//!
//! convolve(kernel_x) → gx, convolve(kernel_y) → gy, `sqrt(gx² + gy²)`,
//! then the post-processing chain.
//!
//! # Operator names
//!
//! `PrewittA` uses the Prewitt kernels and `PrewittB` the Sobel kernels.
//! Output files historically label them "Prewitt" and "Sobel", while the
//! intended visual styles were described the other way round. Both are kept
//! as separate families; see [`OperatorKind::label`].

use std::fmt;
use std::str::FromStr;

use crate::chain::{PostProcessChain, PostProcessParams};
use crate::gradient::gradient_magnitude;
use crate::{FilterError, FilterResult, Kernel};
use edgemap_core::ScalarField;
use log::debug;

/// The four gradient operator families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorKind {
    /// Roberts cross (2x2)
    Roberts,
    /// Prewitt kernels, bright relief style
    PrewittA,
    /// Sobel kernels, crisp white-line style
    PrewittB,
    /// Frei-Chen isotropic gradient masks
    FreiChen,
}

impl OperatorKind {
    /// All operators in processing order.
    pub const ALL: [OperatorKind; 4] = [
        OperatorKind::Roberts,
        OperatorKind::PrewittA,
        OperatorKind::PrewittB,
        OperatorKind::FreiChen,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Roberts => "roberts",
            OperatorKind::PrewittA => "prewitt-a",
            OperatorKind::PrewittB => "prewitt-b",
            OperatorKind::FreiChen => "frei-chen",
        }
    }

    /// Label used in output file names.
    pub fn label(self) -> &'static str {
        match self {
            OperatorKind::Roberts => "Roberts",
            OperatorKind::PrewittA => "Prewitt",
            OperatorKind::PrewittB => "Sobel",
            OperatorKind::FreiChen => "FreiChen",
        }
    }

    /// Look up an operator by canonical name or label, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name) || k.label().eq_ignore_ascii_case(name))
    }

    /// Horizontal and vertical kernels of this family.
    pub fn kernels(self) -> (Kernel, Kernel) {
        match self {
            OperatorKind::Roberts => (Kernel::roberts_x(), Kernel::roberts_y()),
            OperatorKind::PrewittA => (Kernel::prewitt_x(), Kernel::prewitt_y()),
            OperatorKind::PrewittB => (Kernel::sobel_x(), Kernel::sobel_y()),
            OperatorKind::FreiChen => (Kernel::frei_chen_x(), Kernel::frei_chen_y()),
        }
    }

    /// Reference post-processing tuning.
    pub fn default_params(self) -> PostProcessParams {
        match self {
            OperatorKind::Roberts => PostProcessParams::new(1.8).with_scale(0.8),
            OperatorKind::PrewittA => PostProcessParams::new(0.8).with_stretch(2.0, 99.0),
            OperatorKind::PrewittB => PostProcessParams::new(0.6).with_stretch(1.0, 98.0),
            OperatorKind::FreiChen => PostProcessParams::new(1.1)
                .with_stretch(1.0, 95.0)
                .with_scale(0.9),
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperatorKind {
    type Err = FilterError;

    fn from_str(s: &str) -> FilterResult<Self> {
        Self::from_name(s).ok_or_else(|| FilterError::Config(format!("unknown operator '{}'", s)))
    }
}

/// Kernels plus post-processing for one operator. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorDefinition {
    kind: OperatorKind,
    kernel_x: Kernel,
    kernel_y: Kernel,
    params: PostProcessParams,
    chain: PostProcessChain,
}

impl OperatorDefinition {
    /// The reference definition of `kind`.
    pub fn standard(kind: OperatorKind) -> Self {
        let (kernel_x, kernel_y) = kind.kernels();
        let params = kind.default_params();
        let chain = PostProcessChain::from_validated(&params);
        Self {
            kind,
            kernel_x,
            kernel_y,
            params,
            chain,
        }
    }

    /// Same kernels, different tuning.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `params` fail validation.
    pub fn with_params(&self, params: PostProcessParams) -> FilterResult<Self> {
        let chain = PostProcessChain::from_params(&params)?;
        Ok(Self {
            params,
            chain,
            ..self.clone()
        })
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn kernel_x(&self) -> &Kernel {
        &self.kernel_x
    }

    pub fn kernel_y(&self) -> &Kernel {
        &self.kernel_y
    }

    pub fn params(&self) -> &PostProcessParams {
        &self.params
    }

    pub fn chain(&self) -> &PostProcessChain {
        &self.chain
    }
}

/// Run the full operator pipeline on a grayscale field.
///
/// The result has the input's dimensions and, for the registry's
/// parameters, values in [0, 1].
///
/// Any finite input range is accepted. If the kernel sums overflow, the
/// field is divided by its largest absolute sample and the gradient is
/// recomputed; min-max normalization makes the result independent of that
/// factor.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] if the field is smaller than the
/// operator's kernels, and [`FilterError::InvalidParameters`] if the field
/// holds NaN or infinite samples.
pub fn apply(field: &ScalarField, operator: &OperatorDefinition) -> FilterResult<ScalarField> {
    if !field.is_finite() {
        return Err(FilterError::InvalidParameters(
            "input field contains non-finite samples".into(),
        ));
    }
    let mut magnitude = gradient_magnitude(field, &operator.kernel_x, &operator.kernel_y)?;
    if !magnitude.is_finite() {
        let (min, max) = field.min_max();
        let peak = min.abs().max(max.abs());
        debug!("{}: gradient overflow, rescaling input by 1/{:e}", operator.name(), peak);
        let scaled = field.map(|v| v / peak);
        magnitude = gradient_magnitude(&scaled, &operator.kernel_x, &operator.kernel_y)?;
    }
    debug!(
        "{}: {}x{} gradient magnitude range [{:.6}, {:.6}]",
        operator.name(),
        field.width(),
        field.height(),
        magnitude.min_value(),
        magnitude.max_value()
    );
    operator.chain.run(&magnitude)
}
