//! Metric descriptor value types.
//!
//! Descriptors are immutable after construction and hold no references to
//! other descriptors; a computed metric records its dependencies by name
//! only, and the names are resolved against a value registry at evaluation
//! time.

use crate::error::{Error, Result};
use crate::metrics::aggregation::{AggregationKind, ComputedFormula};
use crate::metrics::registry::MetricValueSet;
use serde::{Deserialize, Serialize};

/// A metric derived from one dimension and one aggregation kind, or supplied
/// wholesale as a custom metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    /// Canonical metric name, unique within its report category.
    pub name: String,
    /// Locale-resolved display name.
    pub translated_name: String,
    /// Locale-resolved documentation text.
    pub documentation: String,
    /// Report category inherited from the source dimension.
    pub category_id: String,
    /// Aggregation expression over the dimension's storage column. Opaque to
    /// this engine; executed elsewhere.
    pub expression: String,
    /// Aggregation kind the name and expression were derived from.
    /// `None` for custom metrics, which bypass the naming policy.
    pub aggregation: Option<AggregationKind>,
}

/// A metric derived from two other metrics via a ratio formula.
///
/// Dependencies are name-keyed weak references: the dependent metrics need
/// not exist when the descriptor is constructed, and lookup happens only at
/// evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedMetricDescriptor {
    /// Canonical metric name composed from the dependency names.
    pub name: String,
    /// Locale-resolved display name.
    pub translated_name: String,
    /// Locale-resolved documentation text.
    pub documentation: String,
    /// Report category inherited from the first dependency's owning
    /// dimension.
    pub category_id: String,
    /// Ratio formula applied at evaluation time.
    pub formula: ComputedFormula,
    /// Dependent metric names, numerator first. Order is semantically
    /// significant and always preserved.
    pub dependencies: [String; 2],
}

impl ComputedMetricDescriptor {
    /// Names of the dependent metrics, numerator first.
    pub fn dependent_metrics(&self) -> &[String] {
        &self.dependencies
    }

    /// Numerator metric name.
    pub fn numerator(&self) -> &str {
        &self.dependencies[0]
    }

    /// Denominator metric name.
    pub fn denominator(&self) -> &str {
        &self.dependencies[1]
    }

    /// Evaluate this metric against a registry of already-computed values.
    ///
    /// A dependency absent from the value set is an
    /// [`Error::UnresolvedDependency`]; a zero denominator resolves to
    /// `Ok(0.0)`.
    pub fn evaluate(&self, values: &MetricValueSet) -> Result<f64> {
        let numerator = values
            .get(self.numerator())
            .ok_or_else(|| Error::UnresolvedDependency(self.numerator().to_string()))?;
        let denominator = values
            .get(self.denominator())
            .ok_or_else(|| Error::UnresolvedDependency(self.denominator().to_string()))?;

        Ok(self.formula.evaluate(numerator, denominator))
    }
}
