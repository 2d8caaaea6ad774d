//! Computed-metric resolution.
//!
//! Derives the name, label, documentation, and dependency list of a computed
//! metric from two existing metric names and a formula kind. The dependent
//! metrics do not need to exist yet; only their names are recorded.

use crate::metrics::aggregation::ComputedFormula;
use crate::metrics::descriptor::ComputedMetricDescriptor;
use crate::translation::TranslationProvider;

/// Translation context suffix for documentation overrides. A label override
/// for `(rate, bounce_count)` lives under context `rate`; its documentation
/// override under `rate_doc`.
fn doc_context(formula: ComputedFormula) -> String {
    format!("{}_doc", formula.as_str())
}

/// Resolves computed-metric descriptors against a translation provider.
pub struct ComputedMetricResolver<'a> {
    translator: &'a dyn TranslationProvider,
}

impl<'a> ComputedMetricResolver<'a> {
    pub fn new(translator: &'a dyn TranslationProvider) -> Self {
        Self { translator }
    }

    /// Derive a computed metric from two dependent metric names.
    ///
    /// `name1` is the numerator, `name2` the denominator; the dependency list
    /// preserves that order. The category id is supplied by the caller, taken
    /// from the first dependency's owning dimension.
    pub fn resolve(
        &self,
        name1: &str,
        name2: &str,
        formula: ComputedFormula,
        category_id: &str,
    ) -> ComputedMetricDescriptor {
        let name = formula.metric_name(name1, name2);

        tracing::debug!(
            metric = %name,
            formula = formula.as_str(),
            numerator = name1,
            denominator = name2,
            "Derived computed metric"
        );

        ComputedMetricDescriptor {
            translated_name: self.translated_name(formula, name1, name2),
            documentation: self.documentation(formula, name1, name2),
            name,
            category_id: category_id.to_string(),
            formula,
            dependencies: [name1.to_string(), name2.to_string()],
        }
    }

    /// Display label for a dependent metric, falling back to the raw name.
    fn metric_label(&self, name: &str) -> String {
        self.translator
            .resolve(name, None)
            .unwrap_or_else(|| name.to_string())
    }

    fn translated_name(&self, formula: ComputedFormula, name1: &str, name2: &str) -> String {
        if let Some(label) = self.translator.resolve(name1, Some(formula.as_str())) {
            return label;
        }

        let label1 = self.metric_label(name1);
        let label2 = self.metric_label(name2);
        match formula {
            ComputedFormula::Average => format!("Avg. {label1} per {label2}"),
            ComputedFormula::Rate => format!("{label1} Rate"),
        }
    }

    fn documentation(&self, formula: ComputedFormula, name1: &str, name2: &str) -> String {
        if let Some(doc) = self.translator.resolve(name1, Some(&doc_context(formula))) {
            return doc;
        }

        let label1 = self.metric_label(name1);
        let label2 = self.metric_label(name2);
        match formula {
            ComputedFormula::Average => {
                format!("Average value of \"{label1}\" per \"{label2}\".")
            }
            ComputedFormula::Rate => {
                format!("The ratio of \"{label1}\" out of all \"{label2}\".")
            }
        }
    }
}
