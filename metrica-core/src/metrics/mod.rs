//! Metric-definition engine
//!
//! Derives metric descriptors from reporting dimensions:
//! - [`aggregation`] holds the closed sets of aggregation kinds and computed
//!   formulas, with their naming and expression tables
//! - [`descriptor`] holds the immutable descriptor value types
//! - [`factory`] is the façade callers use to derive descriptors
//! - [`computed`] resolves computed metrics and their dependency lists
//! - [`registry`] indexes descriptors by name and evaluates computed metrics
//!   against already-produced values

pub mod aggregation;
pub mod computed;
pub mod descriptor;
pub mod factory;
pub mod registry;

pub use aggregation::{strip_metric_prefix, AggregationKind, ComputedFormula};
pub use computed::ComputedMetricResolver;
pub use descriptor::{ComputedMetricDescriptor, MetricDescriptor};
pub use factory::DimensionMetricFactory;
pub use registry::{MetricRegistry, MetricValueSet, RegisteredMetric};
