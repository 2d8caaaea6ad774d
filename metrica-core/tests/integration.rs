//! Integration tests for the metric-definition engine
//!
//! Drives `DimensionMetricFactory` end-to-end over a country dimension,
//! checking every derived artifact: names, labels, documentation, category,
//! and aggregation expressions, plus computed-metric dependency tracking and
//! evaluation against a value registry.

use metrica_core::{
    AggregationKind, Catalog, ColumnDimension, ComputedFormula, Dimension,
    DimensionMetricFactory, MetricRegistry, MetricValueSet, RegisteredMetric,
};
use std::sync::Arc;

/// Catalog resembling a loaded English locale.
fn english_catalog() -> Catalog {
    Catalog::from_toml_str(
        r#"
        "UserCountry_Country" = "Country"
        "UserCountry_Countries" = "Countries"
        bounce_count = "Bounces"
        nb_visits = "Visits"
        "#,
    )
    .expect("parse catalog")
}

fn country_dimension(catalog: &Catalog) -> ColumnDimension {
    ColumnDimension::new(
        "country",
        "UserCountry",
        "UserCountry_VisitLocation",
        "log_visit.location_country",
        "UserCountry_Country",
        "UserCountry_Countries",
        Arc::new(catalog.clone()),
    )
}

// ============================================
// Base metrics
// ============================================

#[test]
fn test_create_metric_count() {
    let catalog = english_catalog();
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let metric = factory.create_metric(AggregationKind::Count);

    assert_eq!(metric.name, "nb_usercountry_country");
    assert_eq!(metric.translated_name, "Countries");
    assert_eq!(metric.documentation, "The number of Countries");
    assert_eq!(metric.category_id, "UserCountry_VisitLocation");
    assert_eq!(metric.expression, "count(log_visit.location_country)");
}

#[test]
fn test_create_metric_unique_count() {
    let catalog = english_catalog();
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let metric = factory.create_metric(AggregationKind::UniqueCount);

    assert_eq!(metric.name, "nb_uniq_usercountry_country");
    assert_eq!(metric.translated_name, "Unique Countries");
    assert_eq!(metric.documentation, "The unique number of Countries");
    assert_eq!(metric.category_id, "UserCountry_VisitLocation");
    assert_eq!(
        metric.expression,
        "count(distinct log_visit.location_country)"
    );
}

#[test]
fn test_create_metric_sum() {
    let catalog = english_catalog();
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let metric = factory.create_metric(AggregationKind::Sum);

    assert_eq!(metric.name, "sum_usercountry_country");
    assert_eq!(metric.translated_name, "Total Countries");
    assert_eq!(metric.documentation, "The total number (sum) of Countries");
    assert_eq!(metric.expression, "sum(log_visit.location_country)");
}

#[test]
fn test_create_metric_min_and_max() {
    let catalog = english_catalog();
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let min = factory.create_metric(AggregationKind::Min);
    assert_eq!(min.name, "min_usercountry_country");
    assert_eq!(min.translated_name, "Min Countries");
    assert_eq!(min.documentation, "The minimum value for Country");
    assert_eq!(min.expression, "min(log_visit.location_country)");

    let max = factory.create_metric(AggregationKind::Max);
    assert_eq!(max.name, "max_usercountry_country");
    assert_eq!(max.translated_name, "Max Countries");
    assert_eq!(max.documentation, "The maximum value for Country");
    assert_eq!(max.expression, "max(log_visit.location_country)");
}

#[test]
fn test_create_metric_count_with_numeric_value() {
    let catalog = english_catalog();
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let metric = factory.create_metric(AggregationKind::CountWithNumericValue);

    assert_eq!(metric.name, "nb_with_usercountry_country");
    assert_eq!(metric.translated_name, "Entries with Country");
    assert_eq!(
        metric.documentation,
        "The number of entries that have a value set for Country"
    );
    assert_eq!(
        metric.expression,
        "sum(if(log_visit.location_country > 0, 1, 0))"
    );
}

// ============================================
// Custom metrics
// ============================================

#[test]
fn test_create_custom_metric() {
    let catalog = english_catalog();
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let metric = factory
        .create_custom_metric("sum_times_10", "MyMetric", "sum(%s) * 10", "FoobarBaz")
        .expect("custom metric");

    assert_eq!(metric.name, "sum_times_10");
    assert_eq!(metric.translated_name, "MyMetric");
    assert_eq!(metric.documentation, "FoobarBaz");
    assert_eq!(metric.category_id, "UserCountry_VisitLocation");
    assert_eq!(metric.expression, "sum(log_visit.location_country) * 10");
}

// ============================================
// Computed metrics
// ============================================

#[test]
fn test_create_computed_metric_average() {
    let catalog = english_catalog();
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let metric =
        factory.create_computed_metric("bounce_count", "nb_visits", ComputedFormula::Average);

    assert_eq!(metric.name, "avg_bounce_count_per_visits");
    assert_eq!(metric.translated_name, "Avg. Bounces per Visits");
    assert_eq!(
        metric.documentation,
        "Average value of \"Bounces\" per \"Visits\"."
    );
    assert_eq!(metric.category_id, "UserCountry_VisitLocation");
    assert_eq!(metric.dependent_metrics().len(), 2);
}

#[test]
fn test_create_computed_metric_rate() {
    let catalog = english_catalog();
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let metric = factory.create_computed_metric("bounce_count", "nb_visits", ComputedFormula::Rate);

    assert_eq!(metric.name, "bounce_count_visits_rate");
    assert_eq!(metric.translated_name, "Bounces Rate");
    assert_eq!(
        metric.documentation,
        "The ratio of \"Bounces\" out of all \"Visits\"."
    );
    assert_eq!(metric.category_id, "UserCountry_VisitLocation");
    assert_eq!(metric.dependent_metrics().len(), 2);
}

#[test]
fn test_computed_metric_with_translation_override() {
    let mut catalog = english_catalog();
    catalog.insert_contextual("bounce_count", "rate", "Bounce Rate");
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let metric = factory.create_computed_metric("bounce_count", "nb_visits", ComputedFormula::Rate);

    assert_eq!(metric.translated_name, "Bounce Rate");
    // Documentation still falls back to the generic template.
    assert_eq!(
        metric.documentation,
        "The ratio of \"Bounces\" out of all \"Visits\"."
    );
}

// ============================================
// Registry and evaluation
// ============================================

#[test]
fn test_registry_and_deferred_evaluation() {
    let catalog = english_catalog();
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let mut registry = MetricRegistry::new();

    // Declared before its dependencies exist anywhere.
    let rate = factory.create_computed_metric("bounce_count", "nb_visits", ComputedFormula::Rate);
    registry
        .register_computed(rate.clone())
        .expect("register computed");

    for kind in AggregationKind::ALL {
        registry
            .register(factory.create_metric(kind))
            .expect("register base metric");
    }

    assert_eq!(registry.len(), 7);
    assert_eq!(
        registry
            .metrics_for_category(dimension.category_id())
            .len(),
        7
    );
    assert!(matches!(
        registry.get("bounce_count_visits_rate"),
        Some(RegisteredMetric::Computed(_))
    ));

    // Evaluation fails while the registry of values lacks a dependency.
    let mut values = MetricValueSet::new();
    values.insert("bounce_count", 40.0);
    assert!(rate.evaluate(&values).is_err());

    // Both dependencies present: Rate = v1 / v2 * 100.
    values.insert("nb_visits", 200.0);
    assert_eq!(rate.evaluate(&values).expect("evaluate"), 20.0);

    // Zero denominator is a defined zero result.
    values.insert("nb_visits", 0.0);
    assert_eq!(rate.evaluate(&values).expect("evaluate"), 0.0);
}

#[test]
fn test_computed_name_strips_prefixes_independently() {
    let catalog = english_catalog();
    let dimension = country_dimension(&catalog);
    let factory = DimensionMetricFactory::new(&dimension, &catalog);

    let metric =
        factory.create_computed_metric("sum_times_10", "nb_visits", ComputedFormula::Average);

    // `sum_times_10` starts with the `sum_` prefix, so it strips to
    // `times_10`; a fully unrecognized name passes through unchanged.
    assert_eq!(metric.name, "avg_times_10_per_visits");

    let metric =
        factory.create_computed_metric("bounce_count", "nb_visits", ComputedFormula::Average);
    assert_eq!(metric.name, "avg_bounce_count_per_visits");
}
