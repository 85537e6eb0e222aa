//! Operator configuration
//!
//! Post-processing parameters can be overridden per operator from JSON:
//!
//! ```json
//! {
//!   "operators": {
//!     "Roberts": { "gamma": 1.6, "scale": 0.7 },
//!     "Prewitt": { "stretch_low": 2, "stretch_high": 99 },
//!     "FreiChen": { "stretch_low": null, "stretch_high": null }
//!   }
//! }
//! ```
//!
//! Keys are operator labels or canonical names. A missing field keeps the
//! registry value; an explicit `null` stretch bound disables the stretch.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::chain::PostProcessParams;
use crate::operator::OperatorKind;
use crate::{FilterError, FilterResult};
use serde::{Deserialize, Deserializer};

/// Parsed configuration file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorConfig {
    #[serde(default)]
    pub operators: BTreeMap<String, ParamsOverride>,
}

/// Partial parameters for one operator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamsOverride {
    /// `None`: keep; `Some(None)`: clear; `Some(Some(v))`: set.
    #[serde(default, deserialize_with = "explicit_null")]
    pub stretch_low: Option<Option<f64>>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub stretch_high: Option<Option<f64>>,
    pub gamma: Option<f64>,
    pub scale: Option<f64>,
}

/// Distinguish a present `null` from an absent field.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

impl ParamsOverride {
    /// Overlay this override on `base`. The result is not validated.
    pub fn apply_to(&self, base: PostProcessParams) -> PostProcessParams {
        PostProcessParams {
            stretch_low: self.stretch_low.unwrap_or(base.stretch_low),
            stretch_high: self.stretch_high.unwrap_or(base.stretch_high),
            gamma: self.gamma.unwrap_or(base.gamma),
            scale: self.scale.unwrap_or(base.scale),
        }
    }
}

impl OperatorConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json_str(data: &str) -> FilterResult<Self> {
        serde_json::from_str(data)
            .map_err(|e| FilterError::Config(format!("failed to parse config: {e}")))
    }

    /// Resolve every key to an operator.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Config`] on an unknown operator name or when
    /// two keys name the same operator.
    pub fn overrides(&self) -> FilterResult<Vec<(OperatorKind, ParamsOverride)>> {
        let mut resolved: Vec<(OperatorKind, ParamsOverride)> = Vec::new();
        for (key, params) in &self.operators {
            let kind: OperatorKind = key.parse()?;
            if resolved.iter().any(|(k, _)| *k == kind) {
                return Err(FilterError::Config(format!(
                    "operator '{}' configured more than once",
                    kind
                )));
            }
            resolved.push((kind, *params));
        }
        Ok(resolved)
    }
}

/// Read and parse a configuration file.
pub fn load_config(path: &Path) -> FilterResult<OperatorConfig> {
    let data = fs::read_to_string(path).map_err(|e| {
        FilterError::Config(format!("failed to read config {}: {e}", path.display()))
    })?;
    serde_json::from_str(&data).map_err(|e| {
        FilterError::Config(format!("failed to parse config {}: {e}", path.display()))
    })
}
