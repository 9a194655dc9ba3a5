//! Normalized toggle state and caller-side transforms.
//!
//! The dispatcher only ever sees a [`ToggleState`]. Mapping a domain value
//! (`"YES"`, `"NO"`, `true`, an enum) to a state is the caller's job, done
//! either with a closure at the call site or with a [`TransformTable`].

use crate::result::{FitError, FitResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Requested state of a checkbox or radio button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToggleState {
    /// Checked
    Set,
    /// Unchecked
    Clear,
}

impl ToggleState {
    /// Whether this is [`ToggleState::Set`]
    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(self, Self::Set)
    }

    /// The opposite state
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Set => Self::Clear,
            Self::Clear => Self::Set,
        }
    }
}

impl From<bool> for ToggleState {
    fn from(active: bool) -> Self {
        if active {
            Self::Set
        } else {
            Self::Clear
        }
    }
}

impl std::fmt::Display for ToggleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set => f.write_str("Set"),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

/// Lookup table from domain vocabulary to toggle states
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformTable {
    entries: HashMap<String, ToggleState>,
}

impl TransformTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(domain value, state)` pairs
    #[must_use]
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, ToggleState)>,
        K: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// `"YES"` maps to `Set`, `"NO"` to `Clear`
    #[must_use]
    pub fn yes_no() -> Self {
        Self::from_pairs([("YES", ToggleState::Set), ("NO", ToggleState::Clear)])
    }

    /// Add a mapping
    #[must_use]
    pub fn with(mut self, value: impl Into<String>, state: ToggleState) -> Self {
        let _ = self.entries.insert(value.into(), state);
        self
    }

    /// Look up a domain value; unmapped values yield `None`
    #[must_use]
    pub fn get(&self, value: &str) -> Option<ToggleState> {
        self.entries.get(value).copied()
    }

    /// Look up a domain value, failing when it is unmapped
    ///
    /// # Errors
    ///
    /// Returns [`FitError::UnmappedValue`] if the table has no entry.
    pub fn require(&self, value: &str) -> FitResult<ToggleState> {
        self.get(value).ok_or_else(|| FitError::UnmappedValue {
            value: value.to_string(),
        })
    }

    /// Number of mappings
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
