//! Scene: an ordered list of commands sent to devices and groups.
//!
//! Action order is execution order: the backend runs the actions in the
//! sequence they were declared, so nothing here ever reorders them.

mod command;

pub use command::{Command, CommandName, CommandValue};

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrorKind;
use crate::target::TargetKind;

/// One step of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAction {
    pub target: String,
    pub kind: TargetKind,
    #[serde(flatten)]
    pub command: Command,
}

impl std::fmt::Display for SceneAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}) <- {}", self.kind, self.target, self.command)
    }
}

/// A named scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub actions: Vec<SceneAction>,
}

impl Scene {
    /// Create a builder for constructing a [`Scene`].
    #[must_use]
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind`] when:
    /// - `name` is empty ([`ValidationErrorKind::EmptyName`])
    /// - `actions` is empty ([`ValidationErrorKind::NoActions`])
    pub fn validate(&self) -> Result<(), ValidationErrorKind> {
        if self.name.trim().is_empty() {
            return Err(ValidationErrorKind::EmptyName);
        }
        if self.actions.is_empty() {
            return Err(ValidationErrorKind::NoActions);
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    name: Option<String>,
    actions: Vec<SceneAction>,
}

impl SceneBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: SceneAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Consume the builder, validate, and return a [`Scene`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind`] if the name is empty or there are no actions.
    pub fn build(self) -> Result<Scene, ValidationErrorKind> {
        let scene = Scene {
            name: self.name.unwrap_or_default(),
            actions: self.actions,
        };
        scene.validate()?;
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn_on(target: &str, kind: TargetKind) -> SceneAction {
        SceneAction {
            target: target.to_string(),
            kind,
            command: Command::parse(CommandName::On, None).unwrap(),
        }
    }

    #[test]
    fn should_keep_actions_in_declaration_order() {
        let scene = Scene::builder()
            .name("Evening")
            .action(turn_on("Lamp", TargetKind::Device))
            .action(turn_on("Living Room", TargetKind::Group))
            .action(turn_on("Fan", TargetKind::Device))
            .build()
            .unwrap();
        let targets: Vec<_> = scene.actions.iter().map(|a| a.target.as_str()).collect();
        assert_eq!(targets, vec!["Lamp", "Living Room", "Fan"]);
    }

    #[test]
    fn should_return_validation_error_when_actions_is_empty() {
        let result = Scene::builder().name("Nothing").build();
        assert_eq!(result, Err(ValidationErrorKind::NoActions));
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Scene::builder()
            .action(turn_on("Lamp", TargetKind::Device))
            .build();
        assert_eq!(result, Err(ValidationErrorKind::EmptyName));
    }

    #[test]
    fn should_flatten_command_into_action_json() {
        let action = SceneAction {
            target: "Lamp".to_string(),
            kind: TargetKind::Device,
            command: Command::parse(CommandName::SetLevel, Some("30")).unwrap(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "target": "Lamp",
                "kind": "device",
                "command": "SET_LEVEL",
                "value": 30
            })
        );
    }

    #[test]
    fn should_display_action() {
        let action = turn_on("Living Room", TargetKind::Group);
        assert_eq!(action.to_string(), "group(Living Room) <- ON");
    }
}
