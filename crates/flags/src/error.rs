//! Error types produced when defining or querying a flag vocabulary.

use thiserror::Error;

/// Errors that can occur while building an [`Enumeration`](crate::Enumeration).
///
/// Both variants are raised at construction time and carry enough context to
/// point at the offending definition without re-running the factory.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DefinitionError {
    /// More names were supplied than the 64-bit representation can hold.
    ///
    /// Silently wrapping or truncating bit positions would alias two flags,
    /// so the factory rejects oversized vocabularies outright.
    #[error("cannot define {requested} flags; at most {capacity} distinct bits are available")]
    FlagOverflow {
        /// Number of names supplied to the factory.
        requested: usize,
        /// Number of distinct bit positions the representation offers.
        capacity: u32,
    },
    /// The same name appeared more than once in the definition list.
    ///
    /// Two bindings under one lookup key would leave only the later one
    /// reachable. Rejecting the definition keeps every supplied name
    /// addressable and surfaces the mistake where it was made.
    #[error("duplicate flag name \"{name}\" (positions {first} and {second})")]
    DuplicateName {
        /// The name that appeared more than once.
        name: String,
        /// 0-based position of the first occurrence.
        first: usize,
        /// 0-based position of the offending repeat.
        second: usize,
    },
}

impl DefinitionError {
    /// Returns the duplicated name when the definition failed on a repeat.
    #[must_use]
    pub fn duplicate_name(&self) -> Option<&str> {
        match self {
            Self::DuplicateName { name, .. } => Some(name.as_str()),
            Self::FlagOverflow { .. } => None,
        }
    }

    /// Returns the requested name count when the definition exceeded the
    /// available bit width.
    #[must_use]
    pub const fn requested_flags(&self) -> Option<usize> {
        match self {
            Self::FlagOverflow { requested, .. } => Some(*requested),
            Self::DuplicateName { .. } => None,
        }
    }
}

/// Error returned when looking up a name that is not part of the vocabulary.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown flag name \"{name}\"")]
pub struct UnknownNameError {
    name: String,
}

impl UnknownNameError {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }

    /// Returns the name that failed to resolve.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_display_reports_request_and_capacity() {
        let err = DefinitionError::FlagOverflow {
            requested: 65,
            capacity: 64,
        };

        assert_eq!(
            err.to_string(),
            "cannot define 65 flags; at most 64 distinct bits are available"
        );
        assert_eq!(err.requested_flags(), Some(65));
        assert_eq!(err.duplicate_name(), None);
    }

    #[test]
    fn duplicate_display_names_both_positions() {
        let err = DefinitionError::DuplicateName {
            name: "OPEN".to_owned(),
            first: 0,
            second: 3,
        };

        assert_eq!(
            err.to_string(),
            "duplicate flag name \"OPEN\" (positions 0 and 3)"
        );
        assert_eq!(err.duplicate_name(), Some("OPEN"));
        assert_eq!(err.requested_flags(), None);
    }

    #[test]
    fn unknown_name_display_echoes_the_probe() {
        let err = UnknownNameError::new("KEEPALIVE");

        assert_eq!(err.to_string(), "unknown flag name \"KEEPALIVE\"");
        assert_eq!(err.name(), "KEEPALIVE");
    }
}
