//! Operator registry
//!
//! The immutable set of operator definitions a run uses. Built once, then
//! shared by reference with every pipeline invocation.

use crate::config::OperatorConfig;
use crate::operator::{OperatorDefinition, OperatorKind};
use crate::{FilterError, FilterResult};
use log::debug;

/// Ordered collection of operator definitions, at most one per kind.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorRegistry {
    operators: Vec<OperatorDefinition>,
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl OperatorRegistry {
    /// All four operators with their reference tuning, in processing order.
    pub fn standard() -> Self {
        Self {
            operators: OperatorKind::ALL
                .into_iter()
                .map(OperatorDefinition::standard)
                .collect(),
        }
    }

    /// Build from explicit definitions.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Config`] if two definitions share a kind.
    pub fn from_definitions(operators: Vec<OperatorDefinition>) -> FilterResult<Self> {
        for (i, op) in operators.iter().enumerate() {
            if operators[..i].iter().any(|o| o.kind() == op.kind()) {
                return Err(FilterError::Config(format!(
                    "operator '{}' defined more than once",
                    op.kind()
                )));
            }
        }
        Ok(Self { operators })
    }

    /// Apply parameter overrides from `config`.
    ///
    /// Overrides for operators not in this registry are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Config`] for unknown operator names and
    /// [`FilterError::InvalidParameters`] when a resulting parameter set
    /// fails validation.
    pub fn with_config(&self, config: &OperatorConfig) -> FilterResult<Self> {
        let overrides = config.overrides()?;
        let mut operators = self.operators.clone();
        for (kind, params) in overrides {
            if let Some(op) = operators.iter_mut().find(|o| o.kind() == kind) {
                let merged = params.apply_to(*op.params());
                *op = op.with_params(merged)?;
                debug!("{}: configured {:?}", kind, merged);
            }
        }
        Ok(Self { operators })
    }

    /// Keep only the listed operators, in registry order.
    pub fn select(&self, kinds: &[OperatorKind]) -> Self {
        Self {
            operators: self
                .operators
                .iter()
                .filter(|o| kinds.contains(&o.kind()))
                .cloned()
                .collect(),
        }
    }

    pub fn get(&self, kind: OperatorKind) -> Option<&OperatorDefinition> {
        self.operators.iter().find(|o| o.kind() == kind)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OperatorDefinition> {
        self.operators.iter()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl<'a> IntoIterator for &'a OperatorRegistry {
    type Item = &'a OperatorDefinition;
    type IntoIter = std::slice::Iter<'a, OperatorDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_order() {
        let registry = OperatorRegistry::standard();
        let labels: Vec<_> = registry.iter().map(|o| o.label()).collect();
        assert_eq!(labels, ["Roberts", "Prewitt", "Sobel", "FreiChen"]);
        assert_eq!(registry, OperatorRegistry::default());
    }

    #[test]
    fn test_select_keeps_registry_order() {
        let registry =
            OperatorRegistry::standard().select(&[OperatorKind::FreiChen, OperatorKind::Roberts]);
        let kinds: Vec<_> = registry.iter().map(|o| o.kind()).collect();
        assert_eq!(kinds, [OperatorKind::Roberts, OperatorKind::FreiChen]);
        assert!(registry.get(OperatorKind::PrewittA).is_none());
    }

    #[test]
    fn test_with_config_overrides() {
        let config = OperatorConfig::from_json_str(
            r#"{"operators": {"Prewitt": {"gamma": 0.5, "stretch_low": 5, "stretch_high": 95}}}"#,
        )
        .unwrap();
        let registry = OperatorRegistry::standard().with_config(&config).unwrap();
        let p = registry.get(OperatorKind::PrewittA).unwrap().params();
        assert_eq!((p.gamma, p.stretch()), (0.5, Some((5.0, 95.0))));
        // Others untouched
        assert_eq!(
            registry.get(OperatorKind::Roberts),
            OperatorRegistry::standard().get(OperatorKind::Roberts)
        );
    }

    #[test]
    fn test_with_config_invalid_result() {
        let half = OperatorConfig::from_json_str(
            r#"{"operators": {"Roberts": {"stretch_low": 2}}}"#,
        )
        .unwrap();
        assert!(matches!(
            OperatorRegistry::standard().with_config(&half),
            Err(FilterError::InvalidParameters(_))
        ));

        let negative =
            OperatorConfig::from_json_str(r#"{"operators": {"Sobel": {"scale": -1}}}"#).unwrap();
        assert!(OperatorRegistry::standard().with_config(&negative).is_err());
    }

    #[test]
    fn test_from_definitions_rejects_duplicates() {
        let op = OperatorDefinition::standard(OperatorKind::Roberts);
        assert!(OperatorRegistry::from_definitions(vec![op.clone(), op.clone()]).is_err());
        assert_eq!(OperatorRegistry::from_definitions(vec![op]).unwrap().len(), 1);
    }
}
