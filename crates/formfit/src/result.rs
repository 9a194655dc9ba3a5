//! Result and error types for Formfit.

use crate::control::Variant;
use thiserror::Error;

/// Result type for fit operations
pub type FitResult<T> = Result<T, FitError>;

/// Errors that can occur while fitting a value into a control
#[derive(Debug, Error)]
pub enum FitError {
    /// Control is absent from the current UI tree
    #[error("Control '{control}' not found")]
    ElementNotFound {
        /// Declared control name
        control: String,
    },

    /// Control is present but disabled, hidden or read-only
    #[error("Control '{control}' is not interactable")]
    ElementNotInteractable {
        /// Declared control name
        control: String,
    },

    /// No option text satisfied the matcher
    #[error("Control '{control}' has no option matching {matcher}")]
    NoMatchingOption {
        /// Declared control name
        control: String,
        /// Rendered matcher (`"literal"` or `/pattern/`)
        matcher: String,
    },

    /// A selection pattern failed to compile
    #[error("Invalid option pattern /{pattern}/: {message}")]
    InvalidPattern {
        /// Pattern source
        pattern: String,
        /// Compiler message
        message: String,
    },

    /// A value of one variant was handed to a control of another
    #[error("Control '{control}' is a {expected} but received a {actual} value")]
    VariantMismatch {
        /// Declared control name
        control: String,
        /// Variant of the control
        expected: Variant,
        /// Variant the value was built for
        actual: Variant,
    },

    /// A transform table has no entry for the domain value
    #[error("No toggle state mapped for value '{value}'")]
    UnmappedValue {
        /// The unmapped domain value
        value: String,
    },

    /// An edit request named a control the form does not declare
    #[error("Unknown control '{name}'")]
    UnknownControl {
        /// Requested control name
        name: String,
    },

    /// The driver collaborator reported a failure (including its own timeout)
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FitError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Name of the control the error refers to, if any
    #[must_use]
    pub fn control(&self) -> Option<&str> {
        match self {
            Self::ElementNotFound { control }
            | Self::ElementNotInteractable { control }
            | Self::NoMatchingOption { control, .. }
            | Self::VariantMismatch { control, .. } => Some(control),
            Self::UnknownControl { name } => Some(name),
            Self::InvalidPattern { .. }
            | Self::UnmappedValue { .. }
            | Self::Driver { .. }
            | Self::Json(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = FitError::ElementNotFound {
            control: "username".to_string(),
        };
        assert_eq!(err.to_string(), "Control 'username' not found");
        assert_eq!(err.control(), Some("username"));
    }

    #[test]
    fn test_no_matching_option_message() {
        let err = FitError::NoMatchingOption {
            control: "country".to_string(),
            matcher: "/^Atl/".to_string(),
        };
        assert!(err.to_string().contains("/^Atl/"));
    }

    #[test]
    fn test_variant_mismatch_message() {
        let err = FitError::VariantMismatch {
            control: "agree".to_string(),
            expected: Variant::ToggleControl,
            actual: Variant::TextInput,
        };
        assert_eq!(
            err.to_string(),
            "Control 'agree' is a ToggleControl but received a TextInput value"
        );
    }

    #[test]
    fn test_driver_error_has_no_control() {
        let err = FitError::driver("session closed");
        assert_eq!(err.to_string(), "Driver error: session closed");
        assert!(err.control().is_none());
    }
}
