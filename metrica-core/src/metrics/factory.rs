//! Metric factory
//!
//! The façade callers use to derive metric descriptors from a dimension.
//! It composes the naming policy and expression templates of
//! [`AggregationKind`], the dimension's locale-resolved labels, and the
//! computed-metric resolver. The factory is stateless beyond the dimension
//! and translation provider it was constructed with, performs no I/O, and
//! produces only immutable descriptors.

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::metrics::aggregation::{AggregationKind, ComputedFormula};
use crate::metrics::computed::ComputedMetricResolver;
use crate::metrics::descriptor::{ComputedMetricDescriptor, MetricDescriptor};
use crate::translation::TranslationProvider;

/// Substitution placeholder expected in custom aggregation templates.
const TEMPLATE_PLACEHOLDER: &str = "%s";

/// Builds metric descriptors for one dimension.
pub struct DimensionMetricFactory<'a> {
    dimension: &'a dyn Dimension,
    translator: &'a dyn TranslationProvider,
}

impl<'a> DimensionMetricFactory<'a> {
    pub fn new(dimension: &'a dyn Dimension, translator: &'a dyn TranslationProvider) -> Self {
        Self {
            dimension,
            translator,
        }
    }

    /// Derive a base metric for an aggregation kind.
    ///
    /// Name, expression, labels, and category are all functions of the
    /// dimension and the kind; calling twice with the same kind yields an
    /// identical descriptor.
    pub fn create_metric(&self, kind: AggregationKind) -> MetricDescriptor {
        let name = kind.metric_name(&self.dimension.metric_slug());
        let expression = kind.expression(self.dimension.column_expression());
        let (translated_name, documentation) = self.base_labels(kind);

        tracing::debug!(
            metric = %name,
            kind = kind.as_str(),
            dimension = self.dimension.id(),
            "Derived base metric"
        );

        MetricDescriptor {
            name,
            translated_name,
            documentation,
            category_id: self.dimension.category_id().to_string(),
            expression,
            aggregation: Some(kind),
        }
    }

    /// Build a custom metric with caller-supplied name, labels, and
    /// aggregation template.
    ///
    /// The template must contain exactly one `%s` placeholder, which is
    /// replaced with the dimension's column expression. The category is
    /// still inherited from the dimension.
    pub fn create_custom_metric(
        &self,
        name: impl Into<String>,
        translated_name: impl Into<String>,
        aggregation_template: &str,
        documentation: impl Into<String>,
    ) -> Result<MetricDescriptor> {
        let expression =
            substitute_column(aggregation_template, self.dimension.column_expression())?;

        Ok(MetricDescriptor {
            name: name.into(),
            translated_name: translated_name.into(),
            documentation: documentation.into(),
            category_id: self.dimension.category_id().to_string(),
            expression,
            aggregation: None,
        })
    }

    /// Derive a computed metric from two existing metric names.
    ///
    /// The named metrics need not exist yet; dependency resolution is
    /// deferred to evaluation. The category is inherited from this factory's
    /// dimension.
    pub fn create_computed_metric(
        &self,
        metric_name1: &str,
        metric_name2: &str,
        formula: ComputedFormula,
    ) -> ComputedMetricDescriptor {
        ComputedMetricResolver::new(self.translator).resolve(
            metric_name1,
            metric_name2,
            formula,
            self.dimension.category_id(),
        )
    }

    /// Per-kind generic translated-name and documentation templates, keyed on
    /// the dimension's singular/plural labels.
    fn base_labels(&self, kind: AggregationKind) -> (String, String) {
        let label = self.dimension.label();
        let plural = self.dimension.plural_label();

        match kind {
            AggregationKind::Count => (plural.clone(), format!("The number of {plural}")),
            AggregationKind::UniqueCount => (
                format!("Unique {plural}"),
                format!("The unique number of {plural}"),
            ),
            AggregationKind::Sum => (
                format!("Total {plural}"),
                format!("The total number (sum) of {plural}"),
            ),
            AggregationKind::Min => (
                format!("Min {plural}"),
                format!("The minimum value for {label}"),
            ),
            AggregationKind::Max => (
                format!("Max {plural}"),
                format!("The maximum value for {label}"),
            ),
            AggregationKind::CountWithNumericValue => (
                format!("Entries with {label}"),
                format!("The number of entries that have a value set for {label}"),
            ),
        }
    }
}

/// Substitute the column expression into a custom aggregation template.
fn substitute_column(template: &str, column: &str) -> Result<String> {
    let placeholders = template.matches(TEMPLATE_PLACEHOLDER).count();
    if placeholders != 1 {
        return Err(Error::InvalidTemplate {
            template: template.to_string(),
            placeholders,
        });
    }
    Ok(template.replacen(TEMPLATE_PLACEHOLDER, column, 1))
}
