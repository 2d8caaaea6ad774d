//! Reporting dimensions
//!
//! A dimension describes one column of recorded analytics data: a stable
//! identifier, the storage column expression the aggregations run over, the
//! report category it files under, and locale-sensitive display labels.
//!
//! The engine never stores dimensions; it only reads them through the
//! [`Dimension`] trait when deriving metric descriptors.

use crate::translation::TranslationProvider;
use std::sync::Arc;

/// Read-only view of a reporting dimension.
///
/// Label methods are resolved on every call and must not be cached by
/// implementors across locale changes.
pub trait Dimension: Send + Sync {
    /// Stable identifier, unique within the owning module (e.g. `country`).
    fn id(&self) -> &str;

    /// Owning module key (e.g. `UserCountry`).
    fn module(&self) -> &str;

    /// Report category this dimension's metrics file under.
    fn category_id(&self) -> &str;

    /// Storage column expression aggregations run over
    /// (e.g. `log_visit.location_country`).
    fn column_expression(&self) -> &str;

    /// Singular display label, locale-resolved.
    fn label(&self) -> String;

    /// Plural display label, locale-resolved.
    fn plural_label(&self) -> String;

    /// Canonical lowercase fragment used in generated metric names.
    ///
    /// A `country` dimension in the `UserCountry` module yields
    /// `usercountry_country`.
    fn metric_slug(&self) -> String {
        format!("{}_{}", self.module(), self.id()).to_lowercase()
    }
}

/// A dimension backed by a single storage column, with labels resolved
/// through a translation provider.
#[derive(Clone)]
pub struct ColumnDimension {
    id: String,
    module: String,
    category_id: String,
    column: String,
    label_key: String,
    plural_label_key: String,
    translator: Arc<dyn TranslationProvider>,
}

impl ColumnDimension {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        module: impl Into<String>,
        category_id: impl Into<String>,
        column: impl Into<String>,
        label_key: impl Into<String>,
        plural_label_key: impl Into<String>,
        translator: Arc<dyn TranslationProvider>,
    ) -> Self {
        Self {
            id: id.into(),
            module: module.into(),
            category_id: category_id.into(),
            column: column.into(),
            label_key: label_key.into(),
            plural_label_key: plural_label_key.into(),
            translator,
        }
    }

    fn resolve_label(&self, key: &str) -> String {
        self.translator
            .resolve(key, None)
            .unwrap_or_else(|| key.to_string())
    }
}

impl Dimension for ColumnDimension {
    fn id(&self) -> &str {
        &self.id
    }

    fn module(&self) -> &str {
        &self.module
    }

    fn category_id(&self) -> &str {
        &self.category_id
    }

    fn column_expression(&self) -> &str {
        &self.column
    }

    fn label(&self) -> String {
        self.resolve_label(&self.label_key)
    }

    fn plural_label(&self) -> String {
        self.resolve_label(&self.plural_label_key)
    }
}

impl std::fmt::Debug for ColumnDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDimension")
            .field("id", &self.id)
            .field("module", &self.module)
            .field("category_id", &self.category_id)
            .field("column", &self.column)
            .finish()
    }
}
