//! Remote control: physical buttons bound to devices, groups or scenes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ValidationErrorKind;
use crate::target::TargetKind;

/// Number of physical buttons on a remote.
pub const BUTTON_COUNT: u8 = 6;

/// A physical button, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Button(u8);

impl Button {
    /// Build a button from its 1-based number.
    #[must_use]
    pub fn new(number: u8) -> Option<Self> {
        (1..=BUTTON_COUNT).contains(&number).then_some(Self(number))
    }

    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }

    /// Interpret a normalized column name as a button.
    ///
    /// Returns `None` when the column is not a button column at all, and
    /// `Some(Err(_))` when it looks like one (`button…`) but names no
    /// physical button.
    #[must_use]
    pub fn from_column(column: &str) -> Option<Result<Self, ValidationErrorKind>> {
        let suffix = column.strip_prefix("button")?;
        let number = suffix.strip_prefix('_').unwrap_or(suffix);
        Some(
            number
                .parse::<u8>()
                .ok()
                .and_then(Self::new)
                .ok_or_else(|| ValidationErrorKind::UnknownButton {
                    column: column.to_string(),
                }),
        )
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "button_{}", self.0)
    }
}

impl Serialize for Button {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What a button triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub target: String,
    pub kind: TargetKind,
}

/// A named remote and its button bindings.
///
/// Buttons missing from `bindings` are intentionally unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteControl {
    pub name: String,
    pub bindings: BTreeMap<Button, Binding>,
}

impl RemoteControl {
    /// Create a builder for constructing a [`RemoteControl`].
    #[must_use]
    pub fn builder() -> RemoteControlBuilder {
        RemoteControlBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::EmptyName`] when `name` is blank.
    pub fn validate(&self) -> Result<(), ValidationErrorKind> {
        if self.name.trim().is_empty() {
            return Err(ValidationErrorKind::EmptyName);
        }
        Ok(())
    }
}

/// Step-by-step builder for [`RemoteControl`].
#[derive(Debug, Default)]
pub struct RemoteControlBuilder {
    name: Option<String>,
    bindings: BTreeMap<Button, Binding>,
}

impl RemoteControlBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn bind(mut self, button: Button, binding: Binding) -> Self {
        self.bindings.insert(button, binding);
        self
    }

    /// Consume the builder, validate, and return a [`RemoteControl`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::EmptyName`] if the name is missing or blank.
    pub fn build(self) -> Result<RemoteControl, ValidationErrorKind> {
        let remote = RemoteControl {
            name: self.name.unwrap_or_default(),
            bindings: self.bindings,
        };
        remote.validate()?;
        Ok(remote)
    }
}
