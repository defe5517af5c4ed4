//! Lossy-conversion records returned next to every converted document.

use std::fmt;

use tracing::debug;

/// One lossy or approximated transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// JSON pointer to the source construct, e.g. `/paths/~1pets/get/requestBody`.
    ///
    /// Empty for document-level warnings.
    pub pointer: String,
    /// Human readable description of what was dropped or approximated.
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer.is_empty() {
            write!(formatter, "{}", self.message)
        } else {
            write!(formatter, "{}: {}", self.pointer, self.message)
        }
    }
}

/// Ordered, append-only list of [`Warning`]s.
///
/// Warnings are never de-duplicated: the same construct used twice is reported twice,
/// each time with its own pointer.
#[derive(Debug, Clone, Default)]
pub struct Warnings {
    entries: Vec<Warning>,
    location: Vec<String>,
}

impl Warnings {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `scope` with `segment` appended to the current pointer.
    pub(crate) fn at<R>(
        &mut self,
        segment: impl fmt::Display,
        scope: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let segment = segment.to_string().replace('~', "~0").replace('/', "~1");
        self.location.push(segment);
        let result = scope(self);
        self.location.pop();
        result
    }

    /// Records a warning at the current pointer.
    pub(crate) fn push(&mut self, message: impl Into<String>) {
        let pointer = self
            .location
            .iter()
            .map(|segment| format!("/{segment}"))
            .collect::<String>();
        let warning = Warning {
            pointer,
            message: message.into(),
        };
        debug!(pointer = %warning.pointer, message = %warning.message, "lossy conversion");
        self.entries.push(warning);
    }

    /// Iterates over the warnings in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.entries.iter()
    }

    /// Number of recorded warnings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The bare messages, without pointers.
    pub fn messages(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|warning| warning.message.as_str())
            .collect()
    }

    /// Returns `true` when one message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .iter()
            .any(|warning| warning.message.contains(needle))
    }

    /// Removes every recorded warning.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Consumes the list.
    pub fn into_vec(self) -> Vec<Warning> {
        self.entries
    }
}

impl fmt::Display for Warnings {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for warning in &self.entries {
            writeln!(formatter, "{warning}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Warnings {
    type Item = Warning;
    type IntoIter = std::vec::IntoIter<Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
