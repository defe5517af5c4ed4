use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::spec::Extensions;

/// The operation extension read by default.
pub const DEFAULT_EXTENSION_KEY: &str = "x-visibility";

/// The audience of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visibility {
    /// Published to every consumer.
    Public,
    /// Internal consumers only.
    Private,
}

impl Visibility {
    /// The tag value written in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A visibility tag that is neither `public` nor `private`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown visibility '{value}', expected 'public' or 'private'")]
pub struct UnknownVisibility {
    /// The rejected tag.
    pub value: String,
}

impl FromStr for Visibility {
    type Err = UnknownVisibility;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(UnknownVisibility {
                value: value.to_owned(),
            }),
        }
    }
}

/// Selects the operations of one partition.
///
/// # Example
///
/// ```rust
/// use swagbridge_core::partition::{Visibility, VisibilityFilter};
///
/// let filter = VisibilityFilter::new(Visibility::Public).with_extension_key("x-audience");
///
/// assert_eq!(filter.visibility(), Visibility::Public);
/// assert_eq!(filter.extension_key(), "x-audience");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityFilter {
    visibility: Visibility,
    extension_key: String,
}

impl VisibilityFilter {
    /// Creates a filter reading [`DEFAULT_EXTENSION_KEY`].
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            extension_key: DEFAULT_EXTENSION_KEY.to_owned(),
        }
    }

    /// Reads the tag from another operation extension.
    #[must_use]
    pub fn with_extension_key(mut self, key: impl Into<String>) -> Self {
        self.extension_key = key.into();
        self
    }

    /// The partition this filter selects.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The operation extension holding the tag.
    pub fn extension_key(&self) -> &str {
        &self.extension_key
    }

    /// Returns `true` when an operation with these extensions belongs to the partition.
    ///
    /// Untagged operations belong to every partition. An empty or non-string tag counts as
    /// untagged; an unknown string belongs to none.
    pub fn matches(&self, extensions: &Extensions) -> bool {
        let Some(tag) = extensions.get(&self.extension_key) else {
            return true;
        };
        let Some(tag) = tag.as_str().filter(|tag| !tag.is_empty()) else {
            return true;
        };
        match tag.parse::<Visibility>() {
            Ok(visibility) => visibility == self.visibility,
            Err(error) => {
                warn!(key = %self.extension_key, %error, "operation excluded from partition");
                false
            }
        }
    }
}

/// Returns `true` when the extensions carry `key`, whatever its value.
pub(crate) fn is_tagged(extensions: &Extensions, key: &str) -> bool {
    extensions.contains_key(key)
}
