//! Query value types for the paginated list operations.
//!
//! The backing API filters by a `*`-bounded glob pattern and sorts by a
//! 1-character direction prefix concatenated with a field name (`+name`).
//! Both are wrapped in value types so controllers cannot send a malformed
//! query string.

use serde::Serialize;
use std::fmt;

/// A glob-style name filter, wildcard-anchored on both ends.
///
/// Derived from raw user input with [`NamePattern::from_input`]: the input is
/// trimmed and wrapped in `*`; empty or absent input yields the match-all
/// pattern `*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamePattern(String);

impl NamePattern {
    /// The match-all pattern.
    pub fn match_all() -> Self {
        Self("*".to_owned())
    }

    /// Derive the pattern for a raw filter input.
    ///
    /// `Some("  jane ")` becomes `*jane*`; `None`, `Some("")` and whitespace
    /// input all become `*`.
    pub fn from_input(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|trimmed| !trimmed.is_empty()) {
            Some(trimmed) => Self(format!("*{trimmed}*")),
            None => Self::match_all(),
        }
    }

    /// The wire form of the pattern.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `name` satisfies the pattern.
    ///
    /// `*` matches any run of characters; the comparison is
    /// case-insensitive, matching the search behaviour the list pages expect.
    pub fn matches(&self, name: &str) -> bool {
        let pattern = self.0.to_lowercase();
        let name = name.to_lowercase();

        let mut rest = name.as_str();
        let mut fragments = pattern.split('*').peekable();

        // A pattern without a leading `*` anchors its first fragment.
        if !pattern.starts_with('*') {
            let first = fragments.next().unwrap_or_default();
            match rest.strip_prefix(first) {
                Some(stripped) => rest = stripped,
                None => return false,
            }
        }

        while let Some(fragment) = fragments.next() {
            if fragment.is_empty() {
                continue;
            }
            if fragments.peek().is_none() && !pattern.ends_with('*') {
                // Last fragment of a pattern without a trailing `*` anchors
                // the end of the name.
                return rest.ends_with(fragment);
            }
            match rest.find(fragment) {
                Some(at) => rest = &rest[at + fragment.len()..],
                None => return false,
            }
        }

        pattern.ends_with('*') || rest.is_empty()
    }
}

impl Default for NamePattern {
    fn default() -> Self {
        Self::match_all()
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NamePattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NamePattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// The direction of a sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The 1-character wire prefix (`+` or `-`).
    pub fn prefix(self) -> char {
        match self {
            Self::Ascending => '+',
            Self::Descending => '-',
        }
    }
}

/// A sort order for a paginated list: direction prefix plus field name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    direction: SortDirection,
    field: String,
}

impl SortOrder {
    /// Sort ascending by `field`.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            direction: SortDirection::Ascending,
            field: field.into(),
        }
    }

    /// Sort descending by `field`.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            direction: SortDirection::Descending,
            field: field.into(),
        }
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.prefix(), self.field)
    }
}

impl Serialize for SortOrder {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_derivation_wraps_trimmed_input() {
        assert_eq!(NamePattern::from_input(Some("  jane ")).as_str(), "*jane*");
        assert_eq!(NamePattern::from_input(Some("doe")).as_str(), "*doe*");
    }

    #[test]
    fn test_pattern_derivation_of_empty_input_is_match_all() {
        assert_eq!(NamePattern::from_input(None).as_str(), "*");
        assert_eq!(NamePattern::from_input(Some("")).as_str(), "*");
        assert_eq!(NamePattern::from_input(Some("   ")).as_str(), "*");
        assert_eq!(NamePattern::default().as_str(), "*");
    }

    #[test]
    fn test_pattern_matching() {
        let pattern = NamePattern::from_input(Some("ja"));
        assert!(pattern.matches("Jane Doe"));
        assert!(pattern.matches("benjamin"));
        assert!(!pattern.matches("John"));

        assert!(NamePattern::match_all().matches(""));
        assert!(NamePattern::match_all().matches("anything"));
    }

    #[test]
    fn test_pattern_matching_respects_fragment_order() {
        let pattern = NamePattern("*ja*doe*".to_owned());
        assert!(pattern.matches("Jane Doe"));
        assert!(!pattern.matches("Doe Jane"));
        assert!(!pattern.matches("doe ja"));
    }

    #[test]
    fn test_sort_order_renders_prefix_and_field() {
        assert_eq!(SortOrder::ascending("name").to_string(), "+name");
        assert_eq!(SortOrder::descending("id").to_string(), "-id");
    }
}
