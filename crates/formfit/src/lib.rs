//! Formfit: Conditional Fit for Page-Object Form Controls
//!
//! Data-driven edits in browser tests usually carry a value for every field
//! of a form, most of them unchanged. Formfit lets the edit hand every
//! candidate value to its control unconditionally: an absent value is a
//! no-op, a present value is applied the way the control's variant demands.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  Option<value>  ┌───────────────┐  primitives  ┌──────────────┐
//! │ Edit request │───────────────►│ FitDispatcher │─────────────►│ Driver       │
//! │ (data object)│                 │ per variant   │              │ (page object │
//! └──────────────┘                 └───────────────┘              │  elements)   │
//!                                                                 └──────────────┘
//! ```
//!
//! - **TextInput**: clear, then type
//! - **SelectionList**: select the first option whose visible text matches
//! - **ToggleControl**: activate / deactivate only when the state differs
//!
//! # Example
//!
//! ```
//! use formfit::prelude::*;
//!
//! let checkbox = MockElement::checkbox(false);
//! let mut agree = ToggleControl::new("agree", checkbox.clone());
//!
//! agree.fit(None)?;
//! assert!(!checkbox.is_checked());
//!
//! agree.fit_with(Some("YES"), |v| ToggleState::from(v == "YES"))?;
//! assert!(checkbox.is_checked());
//! # Ok::<(), FitError>(())
//! ```

#![warn(missing_docs)]

mod control;
mod dispatch;
mod form;
mod matcher;
/// In-memory elements for testing page objects without a browser
pub mod mock;
mod result;
mod toggle;

pub use control::{Element, OptionList, TextEntry, Toggle, Variant};
pub use dispatch::{
    Control, Fit, FitDispatcher, FitOptions, FitValue, SelectionList, TextInput, ToggleControl,
};
pub use form::{EditOutcome, EditPolicy, EditRequest, EditSummary, FailedField, Form, FormBuilder};
pub use matcher::TextMatcher;
pub use result::{FitError, FitResult};
pub use toggle::{ToggleState, TransformTable};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::control::*;
    pub use super::dispatch::*;
    pub use super::form::*;
    pub use super::matcher::*;
    pub use super::mock::*;
    pub use super::result::*;
    pub use super::toggle::*;
}
