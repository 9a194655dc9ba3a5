//! In-memory element for unit testing page objects without a browser.
//!
//! A [`MockElement`] is a cheap handle over shared state: clone it before
//! handing it to a control and keep the clone to inspect what the fit did.
//! State queries (`exists`, `is_interactable`, `is_active`, option search)
//! are counted but never recorded as driver commands.

use crate::control::{Element, OptionList, TextEntry, Toggle};
use crate::matcher::TextMatcher;
use crate::result::{FitError, FitResult};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A state-changing command issued to an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverCommand {
    /// Content cleared
    Clear,
    /// Text typed
    Type(String),
    /// Option selected (by its visible text)
    Select(String),
    /// Toggle checked
    Activate,
    /// Toggle unchecked
    Deactivate,
}

#[derive(Debug)]
struct MockState {
    exists: bool,
    interactable: bool,
    text: String,
    options: Vec<String>,
    selected: Option<usize>,
    active: bool,
    failure: Option<String>,
    commands: Vec<DriverCommand>,
    queries: usize,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            exists: true,
            interactable: true,
            text: String::new(),
            options: Vec::new(),
            selected: None,
            active: false,
            failure: None,
            commands: Vec::new(),
            queries: 0,
        }
    }
}

/// Mock element implementing every control primitive
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    state: Arc<Mutex<MockState>>,
}

impl MockElement {
    /// Create a present, interactable, empty element
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text field with initial content
    #[must_use]
    pub fn text_field(initial: impl Into<String>) -> Self {
        let element = Self::new();
        element.lock().text = initial.into();
        element
    }

    /// Selection list with the given option texts and nothing selected
    #[must_use]
    pub fn select<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let element = Self::new();
        element.lock().options = options.into_iter().map(Into::into).collect();
        element
    }

    /// Checkbox in the given state
    #[must_use]
    pub fn checkbox(active: bool) -> Self {
        let element = Self::new();
        element.lock().active = active;
        element
    }

    /// Detach the element from the UI tree
    #[must_use]
    pub fn missing(self) -> Self {
        self.set_exists(false);
        self
    }

    /// Make the element disabled / read-only
    #[must_use]
    pub fn disabled(self) -> Self {
        self.set_interactable(false);
        self
    }

    /// Make every state-changing command fail with a driver error
    #[must_use]
    pub fn with_driver_failure(self, message: impl Into<String>) -> Self {
        self.lock().failure = Some(message.into());
        self
    }

    /// Preselect an option by index
    #[must_use]
    pub fn with_selected(self, index: usize) -> Self {
        {
            let mut state = self.lock();
            if index < state.options.len() {
                state.selected = Some(index);
            }
        }
        self
    }

    /// Attach or detach the element
    pub fn set_exists(&self, exists: bool) {
        self.lock().exists = exists;
    }

    /// Enable or disable the element
    pub fn set_interactable(&self, interactable: bool) {
        self.lock().interactable = interactable;
    }

    /// Current text content
    #[must_use]
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// Text of the selected option
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        let state = self.lock();
        let index = state.selected?;
        state.options.get(index).cloned()
    }

    /// Whether the toggle is checked
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.lock().active
    }

    /// Commands issued so far
    #[must_use]
    pub fn commands(&self) -> Vec<DriverCommand> {
        self.lock().commands.clone()
    }

    /// Number of commands issued so far
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.lock().commands.len()
    }

    /// Number of state queries made so far
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.lock().queries
    }

    /// Forget recorded commands and queries
    pub fn clear_history(&self) {
        let mut state = self.lock();
        state.commands.clear();
        state.queries = 0;
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn query<T>(&self, read: impl FnOnce(&MockState) -> T) -> T {
        let mut state = self.lock();
        state.queries += 1;
        read(&*state)
    }

    fn command(&self, command: DriverCommand, apply: impl FnOnce(&mut MockState)) -> FitResult<()> {
        let mut state = self.lock();
        if let Some(message) = &state.failure {
            return Err(FitError::driver(message.clone()));
        }
        if !state.exists {
            return Err(FitError::driver("no such element"));
        }
        apply(&mut *state);
        state.commands.push(command);
        Ok(())
    }
}

impl Element for MockElement {
    fn exists(&self) -> FitResult<bool> {
        Ok(self.query(|s| s.exists))
    }

    fn is_interactable(&self) -> FitResult<bool> {
        Ok(self.query(|s| s.interactable))
    }
}

impl TextEntry for MockElement {
    fn clear(&mut self) -> FitResult<()> {
        self.command(DriverCommand::Clear, |s| s.text.clear())
    }

    fn type_text(&mut self, text: &str) -> FitResult<()> {
        self.command(DriverCommand::Type(text.to_string()), |s| s.text.push_str(text))
    }
}

impl OptionList for MockElement {
    fn select_by_text(&mut self, matcher: &TextMatcher) -> FitResult<bool> {
        let found = self.query(|s| {
            matcher
                .first_match(s.options.iter().map(String::as_str))
                .map(|i| (i, s.options[i].clone()))
        });
        match found {
            Some((index, text)) => {
                self.command(DriverCommand::Select(text), |s| s.selected = Some(index))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Toggle for MockElement {
    fn is_active(&self) -> FitResult<bool> {
        Ok(self.query(|s| s.active))
    }

    fn activate(&mut self) -> FitResult<()> {
        self.command(DriverCommand::Activate, |s| s.active = true)
    }

    fn deactivate(&mut self) -> FitResult<()> {
        self.command(DriverCommand::Deactivate, |s| s.active = false)
    }
}
