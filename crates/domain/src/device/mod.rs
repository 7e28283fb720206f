//! Device: one piece of controllable equipment declared in the devices section.

mod attribute_value;
mod kind;

pub use attribute_value::AttributeValue;
pub use kind::{Attributes, DeviceKind};
pub(crate) use kind::{parse_integer, parse_number};

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrorKind;

/// A compiled device entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
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

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    name: Option<String>,
    kind: Option<DeviceKind>,
    attributes: Attributes,
}

impl DeviceBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::MissingColumn`] if no kind was given,
    /// or [`ValidationErrorKind::EmptyName`] if the name is missing or blank.
    pub fn build(self) -> Result<Device, ValidationErrorKind> {
        let kind = self
            .kind
            .ok_or(ValidationErrorKind::MissingColumn { column: "type" })?;
        let device = Device {
            name: self.name.unwrap_or_default(),
            kind,
            attributes: self.attributes,
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_device_when_name_and_kind_provided() {
        let device = Device::builder()
            .name("Light1")
            .kind(DeviceKind::Dimmer)
            .build()
            .unwrap();
        assert_eq!(device.name, "Light1");
        assert_eq!(device.kind, DeviceKind::Dimmer);
        assert!(device.attributes.is_empty());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Device::builder().kind(DeviceKind::Relay).build();
        assert_eq!(result, Err(ValidationErrorKind::EmptyName));
    }

    #[test]
    fn should_return_validation_error_when_kind_is_missing() {
        let result = Device::builder().name("Light1").build();
        assert_eq!(
            result,
            Err(ValidationErrorKind::MissingColumn { column: "type" })
        );
    }

    #[test]
    fn should_serialize_kind_under_type_key() {
        let device = Device::builder()
            .name("Light1")
            .kind(DeviceKind::Dimmer)
            .build()
            .unwrap();
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Light1", "type": "DIMMER"}));
    }

    #[test]
    fn should_serialize_attributes_when_present() {
        let device = Device::builder()
            .name("Blind")
            .kind(DeviceKind::Curtain)
            .attributes(Attributes::from([(
                "travel_time".to_string(),
                AttributeValue::Int(40),
            )]))
            .build()
            .unwrap();
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["attributes"]["travel_time"], 40);
    }
}
