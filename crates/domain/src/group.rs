//! Group: a named set of devices addressed together.

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrorKind;

/// A named, ordered list of member devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub members: Vec<String>,
}

impl Group {
    /// Create a builder for constructing a [`Group`].
    #[must_use]
    pub fn builder() -> GroupBuilder {
        GroupBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind`] when:
    /// - `name` is empty ([`ValidationErrorKind::EmptyName`])
    /// - `members` is empty ([`ValidationErrorKind::NoMembers`])
    pub fn validate(&self) -> Result<(), ValidationErrorKind> {
        if self.name.trim().is_empty() {
            return Err(ValidationErrorKind::EmptyName);
        }
        if self.members.is_empty() {
            return Err(ValidationErrorKind::NoMembers);
        }
        Ok(())
    }
}

/// Split a member-list cell into device names.
///
/// Names may be separated by commas, semicolons or line breaks; blanks are
/// dropped and order is kept.
#[must_use]
pub fn split_members(raw: &str) -> Vec<String> {
    raw.split([',', ';', '\n', '\r'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Step-by-step builder for [`Group`].
#[derive(Debug, Default)]
pub struct GroupBuilder {
    name: Option<String>,
    members: Vec<String>,
}

impl GroupBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn member(mut self, device: impl Into<String>) -> Self {
        self.members.push(device.into());
        self
    }

    /// Consume the builder, validate, and return a [`Group`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind`] if the name or the member list is empty.
    pub fn build(self) -> Result<Group, ValidationErrorKind> {
        let group = Group {
            name: self.name.unwrap_or_default(),
            members: self.members,
        };
        group.validate()?;
        Ok(group)
    }
}
