//! # metrica-core
//!
//! Core library for metrica - a metric-definition engine for recorded
//! analytics data.
//!
//! This library provides:
//! - Reporting-dimension and translation-provider collaborator traits
//! - Deterministic derivation of base, custom, and computed metric
//!   descriptors
//! - A name-indexed metric registry and computed-metric evaluation
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! A [`DimensionMetricFactory`] is constructed per dimension and composes
//! three pure pieces:
//! - **Naming policy:** each [`AggregationKind`] carries a fixed name prefix
//!   applied to the dimension's canonical slug
//! - **Expression builder:** each kind carries a fixed aggregation-expression
//!   template over the dimension's storage column
//! - **Computed-metric resolver:** derives ratio metrics from two existing
//!   metric names, recording dependencies by name so they can be declared
//!   before the dependent metrics exist
//!
//! Descriptors are immutable values; evaluation happens later against a
//! [`MetricValueSet`] of already-computed values.
//!
//! ## Example
//!
//! ```rust
//! use metrica_core::{
//!     AggregationKind, Catalog, ColumnDimension, DimensionMetricFactory,
//! };
//! use std::sync::Arc;
//!
//! let catalog = Catalog::from_entries([
//!     ("UserCountry_Country", "Country"),
//!     ("UserCountry_Countries", "Countries"),
//! ]);
//! let dimension = ColumnDimension::new(
//!     "country",
//!     "UserCountry",
//!     "UserCountry_VisitLocation",
//!     "log_visit.location_country",
//!     "UserCountry_Country",
//!     "UserCountry_Countries",
//!     Arc::new(catalog.clone()),
//! );
//!
//! let factory = DimensionMetricFactory::new(&dimension, &catalog);
//! let metric = factory.create_metric(AggregationKind::Count);
//! assert_eq!(metric.name, "nb_usercountry_country");
//! assert_eq!(metric.expression, "count(log_visit.location_country)");
//! ```

// Re-export commonly used items at the crate root
pub use dimension::{ColumnDimension, Dimension};
pub use error::{Error, Result};
pub use metrics::{
    strip_metric_prefix, AggregationKind, ComputedFormula, ComputedMetricDescriptor,
    ComputedMetricResolver, DimensionMetricFactory, MetricDescriptor, MetricRegistry,
    MetricValueSet, RegisteredMetric,
};
pub use translation::{Catalog, TranslationProvider};

// Public modules
pub mod dimension;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod translation;
