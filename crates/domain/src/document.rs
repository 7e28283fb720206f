//! Document: the compiled room configuration handed to the control backend.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::device::Device;
use crate::error::{CompilationErrors, ValidationError};
use crate::group::Group;
use crate::remote::RemoteControl;
use crate::scene::Scene;

/// The merged output of every section, in fixed key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigDocument {
    pub devices: Vec<Device>,
    pub groups: Vec<Group>,
    pub scenes: Vec<Scene>,
    #[serde(rename = "remoteControls")]
    pub remote_controls: Vec<RemoteControl>,
}

impl ConfigDocument {
    /// Serialize with two-space indentation, the form used for both file
    /// export and upload.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
            && self.groups.is_empty()
            && self.scenes.is_empty()
            && self.remote_controls.is_empty()
    }
}

/// Outcome of one compilation run.
///
/// Serializes as `{"ok": true, "document": …}` or
/// `{"ok": false, "errors": […]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum CompilationResult {
    Ok(ConfigDocument),
    Failed(Vec<ValidationError>),
}

impl CompilationResult {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    #[must_use]
    pub fn document(&self) -> Option<&ConfigDocument> {
        match self {
            Self::Ok(document) => Some(document),
            Self::Failed(_) => None,
        }
    }

    /// Errors of a failed run; empty on success.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Ok(_) => &[],
            Self::Failed(errors) => errors,
        }
    }

    /// Convert into a `Result` for `?`-style callers.
    ///
    /// # Errors
    ///
    /// Returns [`CompilationErrors`] when the run failed.
    pub fn into_result(self) -> Result<ConfigDocument, CompilationErrors> {
        match self {
            Self::Ok(document) => Ok(document),
            Self::Failed(errors) => Err(CompilationErrors(errors)),
        }
    }
}

impl Serialize for CompilationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CompilationResult", 2)?;
        match self {
            Self::Ok(document) => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("document", document)?;
            }
            Self::Failed(errors) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("errors", errors)?;
            }
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceKind;
    use crate::error::ValidationErrorKind;
    use crate::section::SectionKind;

    #[test]
    fn should_serialize_empty_document_with_all_sections() {
        let json = serde_json::to_string(&ConfigDocument::default()).unwrap();
        assert_eq!(
            json,
            r#"{"devices":[],"groups":[],"scenes":[],"remoteControls":[]}"#
        );
    }

    #[test]
    fn should_pretty_print_with_two_space_indent() {
        let document = ConfigDocument {
            devices: vec![
                Device::builder()
                    .name("Light1")
                    .kind(DeviceKind::Relay)
                    .build()
                    .unwrap(),
            ],
            ..ConfigDocument::default()
        };
        let json = document.to_json_pretty().unwrap();
        assert!(json.starts_with("{\n  \"devices\": [\n    {\n      \"name\": \"Light1\""));
    }

    #[test]
    fn should_serialize_success_result() {
        let result = CompilationResult::Ok(ConfigDocument::default());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ok"], true);
        assert!(json["document"]["devices"].is_array());
    }

    #[test]
    fn should_serialize_failed_result() {
        let result = CompilationResult::Failed(vec![ValidationError::new(
            SectionKind::Devices,
            "Light1",
            ValidationErrorKind::DuplicateName,
        )]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["errors"][0]["message"], "duplicate name");
    }

    #[test]
    fn should_convert_failed_result_into_compilation_errors() {
        let result = CompilationResult::Failed(vec![ValidationError::new(
            SectionKind::Devices,
            "x",
            ValidationErrorKind::EmptyName,
        )]);
        let err = result.into_result().unwrap_err();
        assert_eq!(err.errors().len(), 1);
    }
}
