//! Conditional fit dispatch.
//!
//! Every fit entry point takes an `Option`: `None` means the caller has no
//! new value for the field, and the call succeeds without touching the
//! element at all (no precondition query, no driver command). A present
//! value is applied the way its variant demands:
//!
//! | Variant         | Driver commands                                  |
//! |-----------------|--------------------------------------------------|
//! | `TextInput`     | clear, then type (always both)                   |
//! | `SelectionList` | select first option whose text matches           |
//! | `ToggleControl` | activate / deactivate, only if the state differs |
//!
//! Typed handles ([`TextInput`], [`SelectionList`], [`ToggleControl`]) give a
//! compile-time check that the value fits the control. [`Control`] wraps them
//! in a closed enum for page objects that keep heterogeneous controls.

use crate::control::{Element, OptionList, TextEntry, Toggle, Variant};
use crate::form::EditPolicy;
use crate::matcher::TextMatcher;
use crate::result::{FitError, FitResult};
use crate::toggle::ToggleState;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

const REDACTED: &str = "<redacted>";

/// Options for fit dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Log typed text and selection matchers as `<redacted>`
    pub redact_values: bool,
    /// What a form does when one field of a multi-field edit fails
    pub edit_policy: EditPolicy,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            redact_values: true,
            edit_policy: EditPolicy::AbortOnError,
        }
    }
}

impl FitOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set value redaction in logs
    #[must_use]
    pub const fn redact_values(mut self, redact: bool) -> Self {
        self.redact_values = redact;
        self
    }

    /// Set the multi-field edit policy
    #[must_use]
    pub const fn edit_policy(mut self, policy: EditPolicy) -> Self {
        self.edit_policy = policy;
        self
    }
}

/// Applies present values to controls and ignores absent ones
#[derive(Debug, Clone, Default)]
pub struct FitDispatcher {
    options: FitOptions,
}

impl FitDispatcher {
    /// Create a dispatcher with the given options
    #[must_use]
    pub const fn new(options: FitOptions) -> Self {
        Self { options }
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Clear the text input, then type `value`.
    ///
    /// Clear-then-type is unconditional, even when the input already holds
    /// `value`, so input-triggered page behavior always runs.
    pub fn fit_text<E>(&self, name: &str, element: &mut E, value: Option<&str>) -> FitResult<()>
    where
        E: TextEntry + ?Sized,
    {
        let Some(text) = value else {
            trace!(control = name, variant = %Variant::TextInput, "fit skipped: no value");
            return Ok(());
        };
        debug!(control = name, variant = %Variant::TextInput, value = %self.shown(&text), "fit");

        let result = ensure_ready(name, &*element).and_then(|()| {
            element.clear()?;
            element.type_text(text)
        });
        log_failure(name, Variant::TextInput, result)
    }

    /// Select the first option whose visible text satisfies `matcher`
    pub fn fit_selection<E>(
        &self,
        name: &str,
        element: &mut E,
        matcher: Option<&TextMatcher>,
    ) -> FitResult<()>
    where
        E: OptionList + ?Sized,
    {
        let Some(matcher) = matcher else {
            trace!(control = name, variant = %Variant::SelectionList, "fit skipped: no value");
            return Ok(());
        };
        debug!(
            control = name,
            variant = %Variant::SelectionList,
            matcher = %self.shown(matcher),
            "fit"
        );

        let result = ensure_ready(name, &*element).and_then(|()| {
            if element.select_by_text(matcher)? {
                Ok(())
            } else {
                Err(FitError::NoMatchingOption {
                    control: name.to_string(),
                    matcher: matcher.to_string(),
                })
            }
        });
        log_failure(name, Variant::SelectionList, result)
    }

    /// Bring the toggle into `state`, issuing a command only if it differs
    pub fn fit_toggle<E>(
        &self,
        name: &str,
        element: &mut E,
        state: Option<ToggleState>,
    ) -> FitResult<()>
    where
        E: Toggle + ?Sized,
    {
        let Some(state) = state else {
            trace!(control = name, variant = %Variant::ToggleControl, "fit skipped: no value");
            return Ok(());
        };
        debug!(control = name, variant = %Variant::ToggleControl, %state, "fit");

        let result = ensure_ready(name, &*element).and_then(|()| {
            match (state, element.is_active()?) {
                (ToggleState::Set, false) => element.activate(),
                (ToggleState::Clear, true) => element.deactivate(),
                _ => {
                    trace!(control = name, %state, "fit unchanged: already in state");
                    Ok(())
                }
            }
        });
        log_failure(name, Variant::ToggleControl, result)
    }

    fn shown(&self, value: &dyn std::fmt::Display) -> String {
        if self.options.redact_values {
            REDACTED.to_string()
        } else {
            value.to_string()
        }
    }
}

fn ensure_ready<E: Element + ?Sized>(name: &str, element: &E) -> FitResult<()> {
    if !element.exists()? {
        return Err(FitError::ElementNotFound {
            control: name.to_string(),
        });
    }
    if !element.is_interactable()? {
        return Err(FitError::ElementNotInteractable {
            control: name.to_string(),
        });
    }
    Ok(())
}

fn log_failure(name: &str, variant: Variant, result: FitResult<()>) -> FitResult<()> {
    if let Err(err) = &result {
        debug!(control = name, %variant, error = %err, "fit failed");
    }
    result
}

/// A control that accepts an optional value
pub trait Fit {
    /// Value type this control accepts
    type Value;

    /// Variant of this control
    const VARIANT: Variant;

    /// Fit `value` using a specific dispatcher
    fn fit_using(&mut self, dispatcher: &FitDispatcher, value: Option<Self::Value>)
        -> FitResult<()>;

    /// Fit `value` with default options; `None` is a no-op
    fn fit(&mut self, value: Option<Self::Value>) -> FitResult<()> {
        self.fit_using(&FitDispatcher::default(), value)
    }

    /// Variant of this control
    fn variant(&self) -> Variant {
        Self::VARIANT
    }
}

macro_rules! control_handle {
    ($(#[$doc:meta])* $handle:ident, $primitive:ident) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $handle<E = Box<dyn $primitive>> {
            name: String,
            element: E,
        }

        impl<E: $primitive> $handle<E> {
            /// Declare a control over a page element
            #[must_use]
            pub fn new(name: impl Into<String>, element: E) -> Self {
                Self {
                    name: name.into(),
                    element,
                }
            }

            /// Declared name
            #[must_use]
            pub fn name(&self) -> &str {
                &self.name
            }

            /// Underlying element
            #[must_use]
            pub const fn element(&self) -> &E {
                &self.element
            }

            /// Underlying element, mutably
            pub fn element_mut(&mut self) -> &mut E {
                &mut self.element
            }

            /// Release the underlying element
            #[must_use]
            pub fn into_element(self) -> E {
                self.element
            }
        }
    };
}

control_handle!(
    /// Free-text input control
    TextInput,
    TextEntry
);
control_handle!(
    /// Selection list control, matched by visible option text
    SelectionList,
    OptionList
);
control_handle!(
    /// Checkbox or radio button control
    ToggleControl,
    Toggle
);

impl<E: TextEntry> Fit for TextInput<E> {
    type Value = String;
    const VARIANT: Variant = Variant::TextInput;

    fn fit_using(&mut self, dispatcher: &FitDispatcher, value: Option<String>) -> FitResult<()> {
        dispatcher.fit_text(&self.name, &mut self.element, value.as_deref())
    }
}

impl<E: OptionList> Fit for SelectionList<E> {
    type Value = TextMatcher;
    const VARIANT: Variant = Variant::SelectionList;

    fn fit_using(
        &mut self,
        dispatcher: &FitDispatcher,
        value: Option<TextMatcher>,
    ) -> FitResult<()> {
        dispatcher.fit_selection(&self.name, &mut self.element, value.as_ref())
    }
}

impl<E: Toggle> Fit for ToggleControl<E> {
    type Value = ToggleState;
    const VARIANT: Variant = Variant::ToggleControl;

    fn fit_using(
        &mut self,
        dispatcher: &FitDispatcher,
        value: Option<ToggleState>,
    ) -> FitResult<()> {
        dispatcher.fit_toggle(&self.name, &mut self.element, value)
    }
}

impl<E: Toggle> ToggleControl<E> {
    /// Fit a raw domain value through a caller-supplied transform.
    ///
    /// The transform runs only when a value is present.
    pub fn fit_with<T, F>(&mut self, raw: Option<T>, transform: F) -> FitResult<()>
    where
        F: FnOnce(T) -> ToggleState,
    {
        self.fit(raw.map(transform))
    }
}

/// Candidate value for a [`Control`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitValue {
    /// Text for a `TextInput`
    Text(String),
    /// Matcher for a `SelectionList`
    Selection(TextMatcher),
    /// State for a `ToggleControl`
    Toggle(ToggleState),
}

impl FitValue {
    /// Text value
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Selection value (literal text or a compiled pattern)
    #[must_use]
    pub fn select(matcher: impl Into<TextMatcher>) -> Self {
        Self::Selection(matcher.into())
    }

    /// Toggle value
    #[must_use]
    pub const fn toggle(state: ToggleState) -> Self {
        Self::Toggle(state)
    }

    /// Variant this value is meant for
    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Text(_) => Variant::TextInput,
            Self::Selection(_) => Variant::SelectionList,
            Self::Toggle(_) => Variant::ToggleControl,
        }
    }
}

impl From<ToggleState> for FitValue {
    fn from(state: ToggleState) -> Self {
        Self::Toggle(state)
    }
}

impl From<TextMatcher> for FitValue {
    fn from(matcher: TextMatcher) -> Self {
        Self::Selection(matcher)
    }
}

impl std::fmt::Display for FitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Selection(matcher) => write!(f, "{matcher}"),
            Self::Toggle(state) => write!(f, "{state}"),
        }
    }
}

/// A declared control of any variant
#[derive(Debug)]
pub enum Control {
    /// Text input
    TextInput(TextInput),
    /// Selection list
    SelectionList(SelectionList),
    /// Checkbox or radio button
    ToggleControl(ToggleControl),
}

impl Control {
    /// Declare a text input
    #[must_use]
    pub fn text_input(name: impl Into<String>, element: impl TextEntry + 'static) -> Self {
        let element: Box<dyn TextEntry> = Box::new(element);
        Self::TextInput(TextInput::new(name, element))
    }

    /// Declare a selection list
    #[must_use]
    pub fn selection_list(name: impl Into<String>, element: impl OptionList + 'static) -> Self {
        let element: Box<dyn OptionList> = Box::new(element);
        Self::SelectionList(SelectionList::new(name, element))
    }

    /// Declare a toggle control
    #[must_use]
    pub fn toggle(name: impl Into<String>, element: impl Toggle + 'static) -> Self {
        let element: Box<dyn Toggle> = Box::new(element);
        Self::ToggleControl(ToggleControl::new(name, element))
    }

    /// Declared name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::TextInput(c) => c.name(),
            Self::SelectionList(c) => c.name(),
            Self::ToggleControl(c) => c.name(),
        }
    }

    /// Variant, fixed at declaration
    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::TextInput(_) => Variant::TextInput,
            Self::SelectionList(_) => Variant::SelectionList,
            Self::ToggleControl(_) => Variant::ToggleControl,
        }
    }

    /// Fit `value` with default options
    pub fn fit(&mut self, value: Option<FitValue>) -> FitResult<()> {
        self.fit_using(&FitDispatcher::default(), value)
    }

    /// Fit `value` using a specific dispatcher.
    ///
    /// `None` is a no-op for every variant. A present value built for a
    /// different variant fails with [`FitError::VariantMismatch`] before any
    /// driver command is issued.
    pub fn fit_using(
        &mut self,
        dispatcher: &FitDispatcher,
        value: Option<FitValue>,
    ) -> FitResult<()> {
        let Some(value) = value else {
            return match self {
                Self::TextInput(c) => c.fit_using(dispatcher, None),
                Self::SelectionList(c) => c.fit_using(dispatcher, None),
                Self::ToggleControl(c) => c.fit_using(dispatcher, None),
            };
        };

        match (self, value) {
            (Self::TextInput(c), FitValue::Text(text)) => c.fit_using(dispatcher, Some(text)),
            (Self::SelectionList(c), FitValue::Selection(matcher)) => {
                c.fit_using(dispatcher, Some(matcher))
            }
            (Self::ToggleControl(c), FitValue::Toggle(state)) => {
                c.fit_using(dispatcher, Some(state))
            }
            (control, value) => {
                let err = FitError::VariantMismatch {
                    control: control.name().to_string(),
                    expected: control.variant(),
                    actual: value.variant(),
                };
                debug!(control = control.name(), error = %err, "fit rejected");
                Err(err)
            }
        }
    }
}
