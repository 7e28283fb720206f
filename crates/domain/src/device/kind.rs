//! Device kinds: the fixed set of hardware the backend knows how to drive.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AttributeValue;
use crate::error::ValidationErrorKind;
use crate::scene::CommandName;
use crate::section::Row;

/// Kind-specific attributes, keyed by column name.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A supported device kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceKind {
    Relay,
    Dimmer,
    Curtain,
    Fan,
    Thermostat,
    DryContact,
}

impl DeviceKind {
    pub const ALL: [Self; 6] = [
        Self::Relay,
        Self::Dimmer,
        Self::Curtain,
        Self::Fan,
        Self::Thermostat,
        Self::DryContact,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relay => "RELAY",
            Self::Dimmer => "DIMMER",
            Self::Curtain => "CURTAIN",
            Self::Fan => "FAN",
            Self::Thermostat => "THERMOSTAT",
            Self::DryContact => "DRY_CONTACT",
        }
    }

    /// Whether a scene may send `command` to a device of this kind.
    #[must_use]
    pub fn supports(self, command: CommandName) -> bool {
        use CommandName as C;

        match self {
            Self::Relay => matches!(command, C::On | C::Off | C::Toggle),
            Self::Dimmer => matches!(command, C::On | C::Off | C::Toggle | C::SetLevel),
            Self::Curtain => matches!(command, C::Open | C::Close | C::Stop | C::SetPosition),
            Self::Fan => matches!(command, C::On | C::Off | C::Toggle | C::SetSpeed),
            Self::Thermostat => matches!(command, C::On | C::Off | C::SetTemperature),
            Self::DryContact => matches!(command, C::On | C::Off | C::Pulse),
        }
    }

    /// Read and check the attribute columns of a device row of this kind.
    ///
    /// Every problem in the row is reported, not only the first.
    ///
    /// # Errors
    ///
    /// Returns all [`ValidationErrorKind`]s found when a required column is
    /// missing or a value is malformed or out of range.
    pub fn parse_attributes(self, row: &Row) -> Result<Attributes, Vec<ValidationErrorKind>> {
        let mut reader = AttributeReader::new(row);

        if let Some(room) = row.get("room") {
            reader.attributes.insert("room".to_string(), room.into());
        }

        match self {
            Self::Relay => {}
            Self::Dimmer => {
                let min = reader.integer("min_level", 0..=100, false);
                let max = reader.integer("max_level", 0..=100, false);
                if let (Some(min), Some(max)) = (min, max)
                    && min > max
                {
                    reader.reject("max_level", "must not be lower than min_level");
                }
            }
            Self::Curtain => {
                reader.integer("travel_time", 1..=300, true);
            }
            Self::Fan => {
                if reader.integer("speed_levels", 1..=5, false).is_none() {
                    reader.default_value("speed_levels", AttributeValue::Int(3));
                }
            }
            Self::Thermostat => {
                let min = reader.number("min_temp", 5.0..=35.0, true);
                let max = reader.number("max_temp", 5.0..=35.0, true);
                if let (Some(min), Some(max)) = (min, max)
                    && min >= max
                {
                    reader.reject("max_temp", "must be greater than min_temp");
                }
            }
            Self::DryContact => {
                if reader.choice("contact_mode", &["NO", "NC"]).is_none() {
                    reader.default_value("contact_mode", "NO".into());
                }
            }
        }

        reader.finish()
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKind {
    type Err = ValidationErrorKind;

    /// Case-insensitive; spaces and dashes count as underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ValidationErrorKind::UnsupportedDeviceType {
                value: s.trim().to_string(),
            })
    }
}

/// Parse an integer cell, accepting `"3"` as well as `"3.0"`.
pub(crate) fn parse_integer(raw: &str) -> Option<i64> {
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    #[allow(clippy::cast_possible_truncation)]
    let whole = value as i64;
    (value.is_finite() && value.fract() == 0.0).then_some(whole)
}

/// Parse a finite decimal cell.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

struct AttributeReader<'a> {
    row: &'a Row,
    attributes: Attributes,
    errors: Vec<ValidationErrorKind>,
}

impl<'a> AttributeReader<'a> {
    fn new(row: &'a Row) -> Self {
        Self {
            row,
            attributes: Attributes::new(),
            errors: Vec::new(),
        }
    }

    fn cell(&mut self, column: &'static str, required: bool) -> Option<&'a str> {
        let value = self.row.get(column);
        if value.is_none() && required {
            self.errors
                .push(ValidationErrorKind::MissingColumn { column });
        }
        value
    }

    fn reject(&mut self, column: &'static str, reason: impl Into<String>) {
        self.attributes.remove(column);
        self.errors.push(ValidationErrorKind::InvalidAttribute {
            column,
            reason: reason.into(),
        });
    }

    fn default_value(&mut self, column: &str, value: AttributeValue) {
        self.attributes.insert(column.to_string(), value);
    }

    fn integer(
        &mut self,
        column: &'static str,
        range: RangeInclusive<i64>,
        required: bool,
    ) -> Option<i64> {
        let raw = self.cell(column, required)?;
        let Some(value) = parse_integer(raw) else {
            self.reject(column, format!("`{raw}` is not a whole number"));
            return None;
        };
        if !range.contains(&value) {
            self.reject(
                column,
                format!("{value} is outside {}..={}", range.start(), range.end()),
            );
            return None;
        }
        self.attributes.insert(column.to_string(), value.into());
        Some(value)
    }

    fn number(
        &mut self,
        column: &'static str,
        range: RangeInclusive<f64>,
        required: bool,
    ) -> Option<f64> {
        let raw = self.cell(column, required)?;
        let Some(value) = parse_number(raw) else {
            self.reject(column, format!("`{raw}` is not a number"));
            return None;
        };
        if !range.contains(&value) {
            self.reject(
                column,
                format!("{value} is outside {}..={}", range.start(), range.end()),
            );
            return None;
        }
        self.attributes.insert(column.to_string(), value.into());
        Some(value)
    }

    fn choice(&mut self, column: &'static str, choices: &[&'static str]) -> Option<&'static str> {
        let raw = self.cell(column, false)?;
        let wanted = raw.to_uppercase();
        let Some(choice) = choices.iter().copied().find(|choice| *choice == wanted) else {
            self.reject(column, format!("expected one of {}", choices.join(", ")));
            return None;
        };
        self.attributes.insert(column.to_string(), choice.into());
        Some(choice)
    }

    fn finish(self) -> Result<Attributes, Vec<ValidationErrorKind>> {
        if self.errors.is_empty() {
            Ok(self.attributes)
        } else {
            Err(self.errors)
        }
    }
}
