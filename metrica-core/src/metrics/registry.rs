//! Metric registries.
//!
//! [`MetricRegistry`] owns registered descriptors and indexes them by name
//! for discovery and category listings. [`MetricValueSet`] holds
//! already-computed metric values; computed metrics resolve their
//! dependencies against it by name at evaluation time, never by reference,
//! so a computed metric may legally be registered before its dependencies.

use crate::error::{Error, Result};
use crate::metrics::descriptor::{ComputedMetricDescriptor, MetricDescriptor};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
enum MetricHandle {
    Base(usize),
    Computed(usize),
}

/// A registered metric, base or computed.
#[derive(Debug, Clone, Copy)]
pub enum RegisteredMetric<'a> {
    Base(&'a MetricDescriptor),
    Computed(&'a ComputedMetricDescriptor),
}

impl<'a> RegisteredMetric<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            RegisteredMetric::Base(m) => &m.name,
            RegisteredMetric::Computed(m) => &m.name,
        }
    }

    pub fn category_id(&self) -> &'a str {
        match self {
            RegisteredMetric::Base(m) => &m.category_id,
            RegisteredMetric::Computed(m) => &m.category_id,
        }
    }

    pub fn translated_name(&self) -> &'a str {
        match self {
            RegisteredMetric::Base(m) => &m.translated_name,
            RegisteredMetric::Computed(m) => &m.translated_name,
        }
    }
}

/// Registry of metric descriptors produced by factories.
///
/// Descriptors live in arenas and are addressed through a name index, so
/// registration order is preserved for listings.
#[derive(Debug, Default)]
pub struct MetricRegistry {
    base: Vec<MetricDescriptor>,
    computed: Vec<ComputedMetricDescriptor>,
    index: HashMap<String, MetricHandle>,
}

impl MetricRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a base or custom metric.
    ///
    /// Names are unique within a registry; re-registering a name is an
    /// [`Error::DuplicateMetric`].
    pub fn register(&mut self, metric: MetricDescriptor) -> Result<()> {
        self.claim_name(&metric.name)?;
        tracing::debug!(metric = %metric.name, category = %metric.category_id, "Registered metric");
        self.index
            .insert(metric.name.clone(), MetricHandle::Base(self.base.len()));
        self.base.push(metric);
        Ok(())
    }

    /// Register a computed metric.
    ///
    /// Its dependencies are not validated here; they may be registered later
    /// or live in another registry entirely.
    pub fn register_computed(&mut self, metric: ComputedMetricDescriptor) -> Result<()> {
        self.claim_name(&metric.name)?;
        tracing::debug!(
            metric = %metric.name,
            dependencies = ?metric.dependent_metrics(),
            "Registered computed metric"
        );
        self.index.insert(
            metric.name.clone(),
            MetricHandle::Computed(self.computed.len()),
        );
        self.computed.push(metric);
        Ok(())
    }

    /// Look up a metric by name.
    pub fn get(&self, name: &str) -> Option<RegisteredMetric<'_>> {
        match self.index.get(name)? {
            MetricHandle::Base(i) => Some(RegisteredMetric::Base(&self.base[*i])),
            MetricHandle::Computed(i) => Some(RegisteredMetric::Computed(&self.computed[*i])),
        }
    }

    /// All registered metric names, base metrics first, in registration order.
    pub fn metric_names(&self) -> Vec<&str> {
        self.metrics().map(|m| m.name()).collect()
    }

    /// All registered metrics, base metrics first, in registration order.
    pub fn metrics(&self) -> impl Iterator<Item = RegisteredMetric<'_>> {
        self.base
            .iter()
            .map(RegisteredMetric::Base)
            .chain(self.computed.iter().map(RegisteredMetric::Computed))
    }

    /// Metrics filed under a report category.
    pub fn metrics_for_category(&self, category_id: &str) -> Vec<RegisteredMetric<'_>> {
        self.metrics()
            .filter(|m| m.category_id() == category_id)
            .collect()
    }

    /// Number of registered metrics.
    pub fn len(&self) -> usize {
        self.base.len() + self.computed.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.computed.is_empty()
    }

    fn claim_name(&self, name: &str) -> Result<()> {
        if self.index.contains_key(name) {
            return Err(Error::DuplicateMetric(name.to_string()));
        }
        Ok(())
    }
}

/// Already-computed metric values, keyed by metric name.
#[derive(Debug, Default, Clone)]
pub struct MetricValueSet {
    values: HashMap<String, f64>,
}

impl MetricValueSet {
    /// Create an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a computed value for a metric name.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Look up a metric value by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::aggregation::{AggregationKind, ComputedFormula};

    fn base_metric(name: &str, category: &str) -> MetricDescriptor {
        MetricDescriptor {
            name: name.to_string(),
            translated_name: name.to_string(),
            documentation: String::new(),
            category_id: category.to_string(),
            expression: format!("count({name})"),
            aggregation: Some(AggregationKind::Count),
        }
    }

    fn computed_metric(name: &str, deps: [&str; 2]) -> ComputedMetricDescriptor {
        ComputedMetricDescriptor {
            name: name.to_string(),
            translated_name: name.to_string(),
            documentation: String::new(),
            category_id: "General_Visitors".to_string(),
            formula: ComputedFormula::Rate,
            dependencies: [deps[0].to_string(), deps[1].to_string()],
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = MetricRegistry::new();
        assert!(registry.is_empty());

        registry
            .register(base_metric("nb_visits", "General_Visitors"))
            .expect("register");
        registry
            .register_computed(computed_metric(
                "bounce_count_visits_rate",
                ["bounce_count", "nb_visits"],
            ))
            .expect("register computed");

        assert_eq!(registry.len(), 2);
        assert!(matches!(
            registry.get("nb_visits"),
            Some(RegisteredMetric::Base(_))
        ));
        assert!(matches!(
            registry.get("bounce_count_visits_rate"),
            Some(RegisteredMetric::Computed(_))
        ));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut registry = MetricRegistry::new();
        registry
            .register(base_metric("nb_visits", "General_Visitors"))
            .expect("register");

        let err = registry
            .register_computed(computed_metric("nb_visits", ["a", "b"]))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateMetric(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_computed_metric_may_precede_its_dependencies() {
        let mut registry = MetricRegistry::new();
        registry
            .register_computed(computed_metric(
                "bounce_count_visits_rate",
                ["bounce_count", "nb_visits"],
            ))
            .expect("register computed first");
        registry
            .register(base_metric("nb_visits", "General_Visitors"))
            .expect("register dependency later");

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_category_listing() {
        let mut registry = MetricRegistry::new();
        registry
            .register(base_metric("nb_visits", "General_Visitors"))
            .expect("register");
        registry
            .register(base_metric("nb_orders", "Goals_Ecommerce"))
            .expect("register");
        registry
            .register_computed(computed_metric(
                "bounce_count_visits_rate",
                ["bounce_count", "nb_visits"],
            ))
            .expect("register computed");

        let visitors = registry.metrics_for_category("General_Visitors");
        let names: Vec<_> = visitors.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["nb_visits", "bounce_count_visits_rate"]);

        assert_eq!(registry.metrics_for_category("Goals_Ecommerce").len(), 1);
        assert!(registry.metrics_for_category("Missing").is_empty());
    }

    #[test]
    fn test_value_set_round_trip() {
        let mut values = MetricValueSet::new();
        assert!(values.is_empty());

        values.insert("nb_visits", 100.0);
        assert_eq!(values.get("nb_visits"), Some(100.0));
        assert_eq!(values.get("missing"), None);
        assert_eq!(values.len(), 1);
    }
}
