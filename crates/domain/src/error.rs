//! Common error types used across the workspace.
//!
//! Validation problems are plain data ([`ValidationError`]) so that a single
//! compilation run can collect every problem before reporting. Failures of
//! the surrounding IO layers use [`RoomConfError`], and each adapter converts
//! its own error type into it via `From`.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::device::DeviceKind;
use crate::scene::CommandName;
use crate::section::SectionKind;

/// The closed vocabulary of things that can be wrong with a row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationErrorKind {
    #[error("missing required column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("name is empty")]
    EmptyName,

    #[error("unsupported device type `{value}`")]
    UnsupportedDeviceType { value: String },

    #[error("invalid value for `{column}`: {reason}")]
    InvalidAttribute { column: &'static str, reason: String },

    #[error("duplicate name")]
    DuplicateName,

    #[error("unresolved device reference")]
    UnresolvedDevice,

    #[error("unresolved target reference")]
    UnresolvedTarget,

    #[error("group has no member devices")]
    NoMembers,

    #[error("device listed more than once")]
    DuplicateMember,

    #[error("scene has no actions")]
    NoActions,

    #[error("action {index} has no target")]
    MissingTarget { index: u32 },

    #[error("action {index} has no command")]
    MissingCommand { index: u32 },

    #[error("unknown command `{command}`")]
    UnknownCommand { command: String },

    #[error("command `{command}` is not supported by {device_kind}")]
    UnsupportedCommand {
        command: CommandName,
        device_kind: DeviceKind,
    },

    #[error("command `{command}` takes no value")]
    UnexpectedValue { command: CommandName },

    #[error("command `{command}` requires a value")]
    MissingValue { command: CommandName },

    #[error("invalid value for `{command}`: {reason}")]
    InvalidValue { command: CommandName, reason: String },

    #[error("unknown button `{column}`")]
    UnknownButton { column: String },

    #[error("duplicate button assignment")]
    DuplicateButton,

    #[error("malformed section: {reason}")]
    MalformedSection { reason: String },
}

/// One problem found while compiling a section.
///
/// `subject` is the name the problem concerns (a device, group, scene or
/// remote, or `row N` when the row has no name). `owner` is set when the
/// subject is a *referenced* name, and names the entity that referenced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub section: SectionKind,
    pub subject: String,
    #[serde(rename = "message", serialize_with = "serialize_display")]
    pub kind: ValidationErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(section: SectionKind, subject: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            section,
            subject: subject.into(),
            kind,
            owner: None,
        }
    }

    /// Attach the name of the entity that referenced `subject`.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// The user-facing message, without subject or owner.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.kind)?;
        if let Some(owner) = &self.owner {
            write!(f, " (in {} '{owner}')", self.section.entity_label())?;
        }
        Ok(())
    }
}

fn serialize_display<T: fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Every problem reported by one failed compilation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("configuration has {} validation error(s)", .0.len())]
pub struct CompilationErrors(pub Vec<ValidationError>);

impl CompilationErrors {
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

/// Top-level error for the layers around the compiler.
#[derive(Debug, thiserror::Error)]
pub enum RoomConfError {
    #[error("compilation failed")]
    Compilation(#[from] CompilationErrors),

    #[error("JSON content is empty")]
    EmptyDocument,

    #[error("failed to serialize configuration")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_subject_and_message() {
        let err = ValidationError::new(
            SectionKind::Devices,
            "Lamp",
            ValidationErrorKind::UnsupportedDeviceType {
                value: "LAVA".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Lamp: unsupported device type `LAVA`");
    }

    #[test]
    fn should_mention_owner_when_present() {
        let err = ValidationError::new(
            SectionKind::Groups,
            "Light2",
            ValidationErrorKind::UnresolvedDevice,
        )
        .with_owner("Living Room");
        assert_eq!(
            err.to_string(),
            "Light2: unresolved device reference (in group 'Living Room')"
        );
    }

    #[test]
    fn should_serialize_message_as_text() {
        let err = ValidationError::new(
            SectionKind::Groups,
            "Light2",
            ValidationErrorKind::UnresolvedDevice,
        );
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "section": "groups",
                "subject": "Light2",
                "message": "unresolved device reference"
            })
        );
    }

    #[test]
    fn should_serialize_owner_when_present() {
        let err = ValidationError::new(
            SectionKind::RemoteControls,
            "button_2",
            ValidationErrorKind::DuplicateButton,
        )
        .with_owner("Bedside");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["section"], "remoteControls");
        assert_eq!(json["owner"], "Bedside");
    }

    #[test]
    fn should_count_errors_in_compilation_errors_display() {
        let errors = CompilationErrors(vec![
            ValidationError::new(SectionKind::Devices, "a", ValidationErrorKind::EmptyName),
            ValidationError::new(SectionKind::Devices, "b", ValidationErrorKind::DuplicateName),
        ]);
        assert_eq!(errors.to_string(), "configuration has 2 validation error(s)");
    }

    #[test]
    fn should_wrap_compilation_errors_into_room_conf_error() {
        let err: RoomConfError = CompilationErrors(vec![]).into();
        assert!(matches!(err, RoomConfError::Compilation(_)));
    }
}
