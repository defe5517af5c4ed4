use tracing::{debug, info};

use super::visibility::{DEFAULT_EXTENSION_KEY, Visibility, VisibilityFilter};
use crate::spec::ApiDocument;

/// Documents that can be filtered by operation visibility.
///
/// Implemented for both dialects. Partitioning never fails: unknown tags exclude their
/// operation, and references to missing definitions are ignored.
pub trait Partitionable: ApiDocument + Sized {
    /// Returns `true` when at least one operation carries the `key` extension.
    fn has_visibility_tags(&self, key: &str) -> bool;

    /// Builds the document holding the operations matched by `filter`.
    ///
    /// Metadata is copied as is. Path items left without operation are dropped, definitions
    /// are pruned to the ones reachable from the kept operations, and so are the referenced
    /// component parameters, responses, request bodies and headers.
    fn partition(&self, filter: &VisibilityFilter) -> Self;

    /// Number of operations, for logging.
    fn operation_count(&self) -> usize;

    /// Number of named schema definitions, for logging.
    fn definition_count(&self) -> usize;

    /// Splits the document with the [default key](DEFAULT_EXTENSION_KEY).
    ///
    /// Returns `None` when no operation is tagged: the document is its own single partition.
    fn split_by_visibility(&self) -> Option<VisibilityPartitions<Self>> {
        self.split_by_visibility_key(DEFAULT_EXTENSION_KEY)
    }

    /// Splits the document, reading the tag from the `key` extension.
    fn split_by_visibility_key(&self, key: &str) -> Option<VisibilityPartitions<Self>> {
        if !self.has_visibility_tags(key) {
            debug!(key, "no visibility tag, document left whole");
            return None;
        }

        let [public, private] = [Visibility::Public, Visibility::Private]
            .map(|visibility| VisibilityFilter::new(visibility).with_extension_key(key).apply(self));

        Some(VisibilityPartitions { public, private })
    }
}

impl VisibilityFilter {
    /// Builds the partition of `document` selected by this filter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use swagbridge_core::partition::{Visibility, VisibilityFilter};
    /// use swagbridge_core::spec::v3;
    ///
    /// let mut document = v3::OpenApi::new("Pets", "1.0.0");
    /// let mut private = v3::Operation::default();
    /// private.extensions.insert("x-visibility".to_owned(), "private".into());
    /// document.paths.entry("/admin".to_owned()).or_default().get = Some(private);
    ///
    /// let public = VisibilityFilter::new(Visibility::Public).apply(&document);
    ///
    /// assert!(public.paths.is_empty());
    /// ```
    pub fn apply<D: Partitionable>(&self, document: &D) -> D {
        let partition = document.partition(self);
        info!(
            visibility = %self.visibility(),
            title = partition.title(),
            operations = partition.operation_count(),
            of_operations = document.operation_count(),
            definitions = partition.definition_count(),
            of_definitions = document.definition_count(),
            "visibility partition built"
        );
        partition
    }
}

/// The public and private partitions of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityPartitions<D> {
    /// Untagged and `public` operations.
    pub public: D,
    /// Untagged and `private` operations.
    pub private: D,
}

impl<D> VisibilityPartitions<D> {
    /// Returns the partition of `visibility`.
    pub fn get(&self, visibility: Visibility) -> &D {
        match visibility {
            Visibility::Public => &self.public,
            Visibility::Private => &self.private,
        }
    }

    /// Iterates over both partitions, public first.
    pub fn iter(&self) -> impl Iterator<Item = (Visibility, &D)> {
        [(Visibility::Public, &self.public), (Visibility::Private, &self.private)].into_iter()
    }
}
