//! Control primitives exposed by the driver collaborator.
//!
//! A page object owns its elements; the core only borrows them for the
//! duration of a fit call and drives them through these traits. Element
//! lookup, waiting and the wire protocol all live behind the primitives.

use crate::matcher::TextMatcher;
use crate::result::FitResult;
use serde::{Deserialize, Serialize};

/// Behavioral category of a control, fixed when the control is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Free-text input (clear, then type)
    TextInput,
    /// Option list matched by visible option text
    SelectionList,
    /// Checkbox or radio button
    ToggleControl,
}

impl Variant {
    /// All variants, in declaration order
    pub const ALL: [Self; 3] = [Self::TextInput, Self::SelectionList, Self::ToggleControl];

    /// Variant name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TextInput => "TextInput",
            Self::SelectionList => "SelectionList",
            Self::ToggleControl => "ToggleControl",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Queries shared by every control variant
pub trait Element: std::fmt::Debug {
    /// Whether the element is present in the current UI tree
    fn exists(&self) -> FitResult<bool>;

    /// Whether the element is enabled, visible and writable
    fn is_interactable(&self) -> FitResult<bool>;
}

/// Text input primitives
pub trait TextEntry: Element {
    /// Remove the current content
    fn clear(&mut self) -> FitResult<()>;

    /// Enter text keystroke by keystroke (not a raw value assignment)
    fn type_text(&mut self, text: &str) -> FitResult<()>;
}

/// Selection list primitives
pub trait OptionList: Element {
    /// Select the first option whose visible text satisfies `matcher`.
    ///
    /// Returns `false`, leaving the selection untouched, when no option matches.
    fn select_by_text(&mut self, matcher: &TextMatcher) -> FitResult<bool>;
}

/// Checkbox / radio button primitives
pub trait Toggle: Element {
    /// Whether the control is currently checked
    fn is_active(&self) -> FitResult<bool>;

    /// Check the control
    fn activate(&mut self) -> FitResult<()>;

    /// Uncheck the control
    fn deactivate(&mut self) -> FitResult<()>;
}

impl<T: Element + ?Sized> Element for &mut T {
    fn exists(&self) -> FitResult<bool> {
        (**self).exists()
    }

    fn is_interactable(&self) -> FitResult<bool> {
        (**self).is_interactable()
    }
}

impl<T: Element + ?Sized> Element for Box<T> {
    fn exists(&self) -> FitResult<bool> {
        (**self).exists()
    }

    fn is_interactable(&self) -> FitResult<bool> {
        (**self).is_interactable()
    }
}

impl<T: TextEntry + ?Sized> TextEntry for &mut T {
    fn clear(&mut self) -> FitResult<()> {
        (**self).clear()
    }

    fn type_text(&mut self, text: &str) -> FitResult<()> {
        (**self).type_text(text)
    }
}

impl<T: TextEntry + ?Sized> TextEntry for Box<T> {
    fn clear(&mut self) -> FitResult<()> {
        (**self).clear()
    }

    fn type_text(&mut self, text: &str) -> FitResult<()> {
        (**self).type_text(text)
    }
}

impl<T: OptionList + ?Sized> OptionList for &mut T {
    fn select_by_text(&mut self, matcher: &TextMatcher) -> FitResult<bool> {
        (**self).select_by_text(matcher)
    }
}

impl<T: OptionList + ?Sized> OptionList for Box<T> {
    fn select_by_text(&mut self, matcher: &TextMatcher) -> FitResult<bool> {
        (**self).select_by_text(matcher)
    }
}

impl<T: Toggle + ?Sized> Toggle for &mut T {
    fn is_active(&self) -> FitResult<bool> {
        (**self).is_active()
    }

    fn activate(&mut self) -> FitResult<()> {
        (**self).activate()
    }

    fn deactivate(&mut self) -> FitResult<()> {
        (**self).deactivate()
    }
}

impl<T: Toggle + ?Sized> Toggle for Box<T> {
    fn is_active(&self) -> FitResult<bool> {
        (**self).is_active()
    }

    fn activate(&mut self) -> FitResult<()> {
        (**self).activate()
    }

    fn deactivate(&mut self) -> FitResult<()> {
        (**self).deactivate()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::TextInput.to_string(), "TextInput");
        assert_eq!(Variant::SelectionList.to_string(), "SelectionList");
        assert_eq!(Variant::ToggleControl.to_string(), "ToggleControl");
    }

    #[test]
    fn test_variant_serde() {
        let json = serde_json::to_string(&Variant::SelectionList).unwrap();
        assert_eq!(json, "\"SelectionList\"");
        let back: Variant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Variant::SelectionList);
    }

    #[test]
    fn test_all_variants_distinct() {
        let all = Variant::ALL;
        assert_ne!(all[0], all[1]);
        assert_ne!(all[1], all[2]);
        assert_ne!(all[0], all[2]);
    }
}
