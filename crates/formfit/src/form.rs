//! Form page objects and multi-field edits.
//!
//! A [`Form`] groups the controls a page object declares. An
//! [`EditRequest`] carries one optional value per field; [`Form::apply`]
//! runs every field through fit in request order and reports which values
//! were accepted, so the caller can persist exactly those into its data
//! object afterwards.
//!
//! # Example
//!
//! ```ignore
//! let mut form = FormBuilder::new()
//!     .with_url_pattern("/profile")
//!     .text_input("name", name_element)
//!     .selection_list("country", country_element)
//!     .toggle("newsletter", newsletter_element)
//!     .build();
//!
//! let outcome = form.apply(
//!     EditRequest::new()
//!         .text("name", update.name.as_deref())
//!         .select("country", update.country)
//!         .toggle_with("newsletter", update.newsletter, |v| ToggleState::from(v == "YES")),
//! )?;
//! record.apply_accepted(outcome.accepted_values());
//! ```

use crate::control::{OptionList, TextEntry, Toggle};
use crate::dispatch::{Control, FitDispatcher, FitOptions, FitValue};
use crate::matcher::TextMatcher;
use crate::result::{FitError, FitResult};
use crate::toggle::ToggleState;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to do when one field of a multi-field edit fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditPolicy {
    /// Stop at the first failing field and return its error
    #[default]
    AbortOnError,
    /// Record the failure and carry on with the remaining fields
    ContinueOnError,
}

/// Builder for forms
#[derive(Debug, Default)]
pub struct FormBuilder {
    url_pattern: String,
    controls: Vec<Control>,
    options: FitOptions,
}

impl FormBuilder {
    /// Create a new form builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URL pattern of the page hosting the form
    #[must_use]
    pub fn with_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.url_pattern = pattern.into();
        self
    }

    /// Set fit options
    #[must_use]
    pub const fn with_options(mut self, options: FitOptions) -> Self {
        self.options = options;
        self
    }

    /// Declare a text input
    #[must_use]
    pub fn text_input(self, name: impl Into<String>, element: impl TextEntry + 'static) -> Self {
        self.control(Control::text_input(name, element))
    }

    /// Declare a selection list
    #[must_use]
    pub fn selection_list(
        self,
        name: impl Into<String>,
        element: impl OptionList + 'static,
    ) -> Self {
        self.control(Control::selection_list(name, element))
    }

    /// Declare a toggle control
    #[must_use]
    pub fn toggle(self, name: impl Into<String>, element: impl Toggle + 'static) -> Self {
        self.control(Control::toggle(name, element))
    }

    /// Declare a control; a later declaration replaces an earlier one of the same name
    #[must_use]
    pub fn control(mut self, control: Control) -> Self {
        match self.controls.iter().position(|c| c.name() == control.name()) {
            Some(index) => {
                debug!(
                    control = control.name(),
                    replaced = %self.controls[index].variant(),
                    variant = %control.variant(),
                    "control redeclared"
                );
                self.controls[index] = control;
            }
            None => self.controls.push(control),
        }
        self
    }

    /// Build the form
    #[must_use]
    pub fn build(self) -> Form {
        Form {
            url_pattern: self.url_pattern,
            controls: self.controls,
            dispatcher: FitDispatcher::new(self.options),
        }
    }
}

/// A page object grouping named controls
#[derive(Debug)]
pub struct Form {
    url_pattern: String,
    controls: Vec<Control>,
    dispatcher: FitDispatcher,
}

impl Form {
    /// URL pattern of the page hosting the form
    #[must_use]
    pub fn url_pattern(&self) -> &str {
        &self.url_pattern
    }

    /// Fit options in effect
    #[must_use]
    pub const fn options(&self) -> &FitOptions {
        self.dispatcher.options()
    }

    /// Get a control by name
    #[must_use]
    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.name() == name)
    }

    /// Get a control by name, mutably
    pub fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.name() == name)
    }

    /// Control names in declaration order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.controls.iter().map(Control::name).collect()
    }

    /// Number of declared controls
    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether the form declares no controls
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Fit a single field
    ///
    /// # Errors
    ///
    /// Returns [`FitError::UnknownControl`] for an undeclared name, otherwise
    /// whatever the control's fit returns.
    pub fn fit(&mut self, name: &str, value: Option<FitValue>) -> FitResult<()> {
        let dispatcher = &self.dispatcher;
        let control = self
            .controls
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| FitError::UnknownControl {
                name: name.to_string(),
            })?;
        control.fit_using(dispatcher, value)
    }

    /// Run every field of `request` through fit, in request order.
    ///
    /// Fields already fitted stay applied in the UI when a later field
    /// fails; nothing is rolled back.
    ///
    /// # Errors
    ///
    /// Under [`EditPolicy::AbortOnError`], the first field failure.
    pub fn apply(&mut self, request: EditRequest) -> FitResult<EditOutcome> {
        let policy = self.options().edit_policy;
        let mut outcome = EditOutcome::default();

        for (field, value) in request.fields {
            match self.fit(&field, value.clone()) {
                Ok(()) => match value {
                    Some(value) => outcome.applied.push((field, value)),
                    None => outcome.skipped.push(field),
                },
                Err(err) => match policy {
                    EditPolicy::AbortOnError => {
                        debug!(form = %self.url_pattern, %field, error = %err, "edit aborted");
                        return Err(err);
                    }
                    EditPolicy::ContinueOnError => outcome.failures.push((field, err)),
                },
            }
        }

        debug!(
            form = %self.url_pattern,
            applied = outcome.applied.len(),
            skipped = outcome.skipped.len(),
            failed = outcome.failures.len(),
            "edit applied"
        );
        Ok(outcome)
    }
}

/// Ordered set of candidate field values for one edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRequest {
    fields: Vec<(String, Option<FitValue>)>,
}

impl EditRequest {
    /// Create an empty request
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with an arbitrary candidate value
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: Option<FitValue>) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// Add a text field
    #[must_use]
    pub fn text<S: Into<String>>(self, name: impl Into<String>, value: Option<S>) -> Self {
        self.field(name, value.map(FitValue::text))
    }

    /// Add a selection field
    #[must_use]
    pub fn select<M: Into<TextMatcher>>(self, name: impl Into<String>, value: Option<M>) -> Self {
        self.field(name, value.map(FitValue::select))
    }

    /// Add a toggle field
    #[must_use]
    pub fn toggle(self, name: impl Into<String>, value: Option<ToggleState>) -> Self {
        self.field(name, value.map(FitValue::Toggle))
    }

    /// Add a toggle field from a raw domain value; `transform` runs only if present
    #[must_use]
    pub fn toggle_with<T, F>(self, name: impl Into<String>, raw: Option<T>, transform: F) -> Self
    where
        F: FnOnce(T) -> ToggleState,
    {
        self.toggle(name, raw.map(transform))
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the request has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Result of a multi-field edit
#[derive(Debug, Default)]
pub struct EditOutcome {
    applied: Vec<(String, FitValue)>,
    skipped: Vec<String>,
    failures: Vec<(String, FitError)>,
}

impl EditOutcome {
    /// Fields whose present value was fitted, with that value
    #[must_use]
    pub fn applied(&self) -> &[(String, FitValue)] {
        &self.applied
    }

    /// Fields that had no value
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Fields that failed (only under [`EditPolicy::ContinueOnError`])
    #[must_use]
    pub fn failures(&self) -> &[(String, FitError)] {
        &self.failures
    }

    /// Whether no field failed
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Accepted `(field, value)` pairs for the caller to persist
    pub fn accepted_values(&self) -> impl Iterator<Item = (&str, &FitValue)> {
        self.applied.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Serializable summary (field names and error messages, no values)
    #[must_use]
    pub fn summary(&self) -> EditSummary {
        EditSummary {
            applied: self.applied.iter().map(|(name, _)| name.clone()).collect(),
            skipped: self.skipped.clone(),
            failed: self
                .failures
                .iter()
                .map(|(field, err)| FailedField {
                    field: field.clone(),
                    error: err.to_string(),
                })
                .collect(),
        }
    }

    /// Summary as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns [`FitError::Json`] if serialization fails.
    pub fn to_json(&self) -> FitResult<String> {
        Ok(serde_json::to_string_pretty(&self.summary())?)
    }
}

/// Report of a multi-field edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSummary {
    /// Fields whose value was fitted
    pub applied: Vec<String>,
    /// Fields without a value
    pub skipped: Vec<String>,
    /// Fields that failed
    pub failed: Vec<FailedField>,
}

/// A failed field in an [`EditSummary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedField {
    /// Field name
    pub field: String,
    /// Error message
    pub error: String,
}
