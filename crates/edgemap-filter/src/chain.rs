//! Post-processing chain
//!
//! Turns a raw gradient-magnitude field into a display-ready edge map by
//! running an ordered list of [`Stage`]s:
//!
//! 1. min-max normalization (always)
//! 2. percentile contrast stretch (when both bounds are set)
//! 3. gamma remapping (always)
//! 4. linear scale (when the factor is not 1.0)

use crate::enhance::{contrast_stretch, gamma_correct, normalize_min_max, scale_linear};
use crate::{FilterError, FilterResult};
use edgemap_core::ScalarField;
use log::trace;
use serde::{Deserialize, Serialize};

fn default_scale() -> f64 {
    1.0
}

/// Tuning of the post-processing chain for one operator.
///
/// `stretch_low` and `stretch_high` are percentiles in [0, 100]; the stretch
/// stage is omitted when both are `None`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostProcessParams {
    pub stretch_low: Option<f64>,
    pub stretch_high: Option<f64>,
    pub gamma: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl PostProcessParams {
    /// Gamma only: no stretch, scale 1.0.
    pub fn new(gamma: f64) -> Self {
        Self {
            stretch_low: None,
            stretch_high: None,
            gamma,
            scale: 1.0,
        }
    }

    pub fn with_stretch(mut self, low: f64, high: f64) -> Self {
        self.stretch_low = Some(low);
        self.stretch_high = Some(high);
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// The stretch bounds, if the stretch stage is enabled.
    pub fn stretch(&self) -> Option<(f64, f64)> {
        self.stretch_low.zip(self.stretch_high)
    }

    /// Check the recognized ranges: gamma > 0, scale > 0, stretch bounds
    /// both set or both unset with `0 <= low < high <= 100`.
    pub fn validate(&self) -> FilterResult<()> {
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(FilterError::InvalidParameters(format!(
                "gamma must be finite and > 0, got {}",
                self.gamma
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(FilterError::InvalidParameters(format!(
                "scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        match (self.stretch_low, self.stretch_high) {
            (None, None) => Ok(()),
            (Some(low), Some(high)) => {
                if (0.0..=100.0).contains(&low) && (0.0..=100.0).contains(&high) && low < high {
                    Ok(())
                } else {
                    Err(FilterError::InvalidParameters(format!(
                        "stretch bounds must satisfy 0 <= low < high <= 100, got ({}, {})",
                        low, high
                    )))
                }
            }
            _ => Err(FilterError::InvalidParameters(
                "stretch_low and stretch_high must be set together".into(),
            )),
        }
    }
}

/// One named step of the chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stage {
    /// Min-max normalization onto [0, 1]
    Normalize,
    /// Percentile contrast stretch
    ContrastStretch { low: f64, high: f64 },
    /// Power-law remapping
    Gamma(f64),
    /// Uniform linear scale
    Scale(f64),
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Normalize => "normalize",
            Stage::ContrastStretch { .. } => "contrast-stretch",
            Stage::Gamma(_) => "gamma",
            Stage::Scale(_) => "scale",
        }
    }

    pub fn apply(&self, field: &ScalarField) -> FilterResult<ScalarField> {
        match *self {
            Stage::Normalize => Ok(normalize_min_max(field)),
            Stage::ContrastStretch { low, high } => contrast_stretch(field, low, high),
            Stage::Gamma(gamma) => gamma_correct(field, gamma),
            Stage::Scale(factor) => Ok(scale_linear(field, factor)),
        }
    }
}

/// An ordered, immutable list of stages.
#[derive(Clone, Debug, PartialEq)]
pub struct PostProcessChain {
    stages: Vec<Stage>,
}

impl PostProcessChain {
    /// Build the chain described by `params`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `params` fail validation.
    pub fn from_params(params: &PostProcessParams) -> FilterResult<Self> {
        params.validate()?;
        Ok(Self::from_validated(params))
    }

    /// Build without validation; `params` must already satisfy
    /// [`PostProcessParams::validate`].
    pub(crate) fn from_validated(params: &PostProcessParams) -> Self {
        let mut stages = vec![Stage::Normalize];
        if let Some((low, high)) = params.stretch() {
            stages.push(Stage::ContrastStretch { low, high });
        }
        stages.push(Stage::Gamma(params.gamma));
        if params.scale != 1.0 {
            stages.push(Stage::Scale(params.scale));
        }
        Self { stages }
    }

    /// Build a chain from an explicit stage list.
    pub fn from_stages(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage in order.
    pub fn run(&self, field: &ScalarField) -> FilterResult<ScalarField> {
        let mut current = field.clone();
        for stage in &self.stages {
            current = stage.apply(&current)?;
            trace!(
                "stage {}: range [{:.6}, {:.6}]",
                stage.name(),
                current.min_value(),
                current.max_value()
            );
        }
        Ok(current)
    }
}
