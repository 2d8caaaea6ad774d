//! Aggregation kinds, naming policy, and expression templates.
//!
//! Each [`AggregationKind`] carries a fixed metric-name prefix and a fixed
//! aggregation-expression template. Both tables are matched exhaustively so
//! adding a kind is a compile-time-checked, single-location change.

use serde::{Deserialize, Serialize};

/// Supported aggregation operations for base metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationKind {
    Count,
    UniqueCount,
    Sum,
    Min,
    Max,
    CountWithNumericValue,
}

impl AggregationKind {
    /// All kinds, in prefix-table order.
    pub const ALL: [AggregationKind; 6] = [
        AggregationKind::Count,
        AggregationKind::UniqueCount,
        AggregationKind::Sum,
        AggregationKind::Min,
        AggregationKind::Max,
        AggregationKind::CountWithNumericValue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationKind::Count => "count",
            AggregationKind::UniqueCount => "unique_count",
            AggregationKind::Sum => "sum",
            AggregationKind::Min => "min",
            AggregationKind::Max => "max",
            AggregationKind::CountWithNumericValue => "count_with_numeric_value",
        }
    }

    /// Fixed metric-name prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            AggregationKind::Count => "nb_",
            AggregationKind::UniqueCount => "nb_uniq_",
            AggregationKind::Sum => "sum_",
            AggregationKind::Min => "min_",
            AggregationKind::Max => "max_",
            AggregationKind::CountWithNumericValue => "nb_with_",
        }
    }

    /// Canonical metric name for a dimension slug: `prefix + slug`.
    pub fn metric_name(&self, slug: &str) -> String {
        format!("{}{}", self.prefix(), slug)
    }

    /// Aggregation expression over a storage column.
    pub fn expression(&self, column: &str) -> String {
        match self {
            AggregationKind::Count => format!("count({column})"),
            AggregationKind::UniqueCount => format!("count(distinct {column})"),
            AggregationKind::Sum => format!("sum({column})"),
            AggregationKind::Min => format!("min({column})"),
            AggregationKind::Max => format!("max({column})"),
            AggregationKind::CountWithNumericValue => {
                format!("sum(if({column} > 0, 1, 0))")
            }
        }
    }
}

/// Ratio formulas for computed metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputedFormula {
    /// `value(a) / value(b)`
    Average,
    /// `value(a) / value(b) * 100`
    Rate,
}

impl ComputedFormula {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputedFormula::Average => "avg",
            ComputedFormula::Rate => "rate",
        }
    }

    /// Canonical name for a computed metric over two dependent metrics.
    ///
    /// Recognized aggregation prefixes are stripped from both operands
    /// independently; operands without a recognized prefix pass through
    /// unchanged.
    pub fn metric_name(&self, name1: &str, name2: &str) -> String {
        let a = strip_metric_prefix(name1);
        let b = strip_metric_prefix(name2);
        match self {
            ComputedFormula::Average => format!("avg_{a}_per_{b}"),
            ComputedFormula::Rate => format!("{a}_{b}_rate"),
        }
    }

    /// Apply the formula to already-computed dependent values.
    ///
    /// A zero denominator resolves to `0.0`; it is a defined result, not an
    /// error.
    pub fn evaluate(&self, numerator: f64, denominator: f64) -> f64 {
        if denominator == 0.0 {
            return 0.0;
        }
        match self {
            ComputedFormula::Average => numerator / denominator,
            ComputedFormula::Rate => numerator / denominator * 100.0,
        }
    }
}

// Longer prefixes first so `nb_uniq_x` strips to `x`, not `uniq_x`.
const PREFIXES_LONGEST_FIRST: [&str; 6] = ["nb_uniq_", "nb_with_", "nb_", "sum_", "min_", "max_"];

/// Strip a recognized aggregation prefix from a metric name, if present.
///
/// Names without a recognized prefix (custom metrics) are returned unchanged.
pub fn strip_metric_prefix(name: &str) -> &str {
    for prefix in PREFIXES_LONGEST_FIRST {
        if let Some(rest) = name.strip_prefix(prefix) {
            if !rest.is_empty() {
                return rest;
            }
        }
    }
    name
}
