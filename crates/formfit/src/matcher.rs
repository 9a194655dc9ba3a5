//! Option text matching for selection lists.
//!
//! Options are always matched against their visible text, never their
//! underlying `value` attribute, so page-object callers can write edits in
//! the labels a user sees.

use crate::result::{FitError, FitResult};
use regex::Regex;

/// Matcher applied to the visible text of each option
#[derive(Debug, Clone)]
pub enum TextMatcher {
    /// Option text equals the literal exactly (case-sensitive, untrimmed)
    Exact(String),
    /// Option text contains a match for the pattern (anchor with `^`/`$` as needed)
    Pattern(Regex),
}

impl TextMatcher {
    /// Create an exact-text matcher
    #[must_use]
    pub fn exact(text: impl Into<String>) -> Self {
        Self::Exact(text.into())
    }

    /// Compile a pattern matcher
    ///
    /// # Errors
    ///
    /// Returns [`FitError::InvalidPattern`] if the pattern does not compile.
    pub fn pattern(pattern: &str) -> FitResult<Self> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|e| FitError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Check whether an option's visible text satisfies the matcher
    #[must_use]
    pub fn matches(&self, option_text: &str) -> bool {
        match self {
            Self::Exact(expected) => option_text == expected,
            Self::Pattern(re) => re.is_match(option_text),
        }
    }

    /// Index of the first option whose text matches
    #[must_use]
    pub fn first_match<'a, I>(&self, options: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        options.into_iter().position(|text| self.matches(text))
    }

    /// Literal text or pattern source
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Exact(text) => text,
            Self::Pattern(re) => re.as_str(),
        }
    }

    /// Whether this is a pattern matcher
    #[must_use]
    pub const fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }
}

impl PartialEq for TextMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.is_pattern() == other.is_pattern() && self.source() == other.source()
    }
}

impl Eq for TextMatcher {}

impl std::fmt::Display for TextMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(text) => write!(f, "{text:?}"),
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<&str> for TextMatcher {
    fn from(text: &str) -> Self {
        Self::Exact(text.to_string())
    }
}

impl From<String> for TextMatcher {
    fn from(text: String) -> Self {
        Self::Exact(text)
    }
}

impl From<Regex> for TextMatcher {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod exact_tests {
        use super::*;

        #[test]
        fn test_exact_match() {
            let matcher = TextMatcher::exact("Option B");
            assert!(matcher.matches("Option B"));
            assert!(!matcher.matches("Option B "));
            assert!(!matcher.matches("option b"));
            assert!(!matcher.matches("Option"));
        }

        #[test]
        fn test_from_str_is_exact() {
            let matcher: TextMatcher = "Canada".into();
            assert!(!matcher.is_pattern());
            assert_eq!(matcher.source(), "Canada");
        }

        #[test]
        fn test_regex_metacharacters_are_literal() {
            let matcher = TextMatcher::exact("a.c");
            assert!(matcher.matches("a.c"));
            assert!(!matcher.matches("abc"));
        }
    }

    mod pattern_tests {
        use super::*;

        #[test]
        fn test_anchored_pattern() {
            let matcher = TextMatcher::pattern("^Opt").unwrap();
            assert!(matcher.matches("Option A"));
            assert!(!matcher.matches("No Option"));
        }

        #[test]
        fn test_unanchored_pattern_searches() {
            let matcher = TextMatcher::pattern("tion").unwrap();
            assert!(matcher.matches("Option A"));
        }

        #[test]
        fn test_invalid_pattern() {
            let err = TextMatcher::pattern("(unclosed").unwrap_err();
            assert!(matches!(err, FitError::InvalidPattern { .. }));
        }

        #[test]
        fn test_from_regex() {
            let matcher: TextMatcher = Regex::new(r"\d+").unwrap().into();
            assert!(matcher.is_pattern());
            assert!(matcher.matches("Room 101"));
        }
    }

    mod first_match_tests {
        use super::*;

        #[test]
        fn test_first_of_several() {
            let options = ["Alpha", "Option A", "Option B"];
            let matcher = TextMatcher::pattern("^Opt").unwrap();
            assert_eq!(matcher.first_match(options), Some(1));
        }

        #[test]
        fn test_no_match() {
            let options = ["Alpha", "Beta"];
            assert_eq!(TextMatcher::exact("Gamma").first_match(options), None);
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn test_display() {
            assert_eq!(TextMatcher::exact("UK").to_string(), "\"UK\"");
            assert_eq!(TextMatcher::pattern("^U").unwrap().to_string(), "/^U/");
        }

        #[test]
        fn test_equality_by_kind_and_source() {
            assert_eq!(TextMatcher::exact("x"), TextMatcher::exact("x"));
            assert_ne!(TextMatcher::exact("x"), TextMatcher::pattern("x").unwrap());
            assert_eq!(
                TextMatcher::pattern("^a").unwrap(),
                TextMatcher::pattern("^a").unwrap()
            );
        }
    }
}
