//! Command: what a scene action asks its target to do.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::{parse_integer, parse_number};
use crate::error::ValidationErrorKind;

/// Name of a command a device can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandName {
    On,
    Off,
    Toggle,
    SetLevel,
    Open,
    Close,
    Stop,
    SetPosition,
    SetSpeed,
    SetTemperature,
    Pulse,
}

impl CommandName {
    pub const ALL: [Self; 11] = [
        Self::On,
        Self::Off,
        Self::Toggle,
        Self::SetLevel,
        Self::Open,
        Self::Close,
        Self::Stop,
        Self::SetPosition,
        Self::SetSpeed,
        Self::SetTemperature,
        Self::Pulse,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Toggle => "TOGGLE",
            Self::SetLevel => "SET_LEVEL",
            Self::Open => "OPEN",
            Self::Close => "CLOSE",
            Self::Stop => "STOP",
            Self::SetPosition => "SET_POSITION",
            Self::SetSpeed => "SET_SPEED",
            Self::SetTemperature => "SET_TEMPERATURE",
            Self::Pulse => "PULSE",
        }
    }

    fn value_rule(self) -> ValueRule {
        match self {
            Self::SetLevel | Self::SetPosition => ValueRule::Integer(0, 100),
            Self::SetSpeed => ValueRule::Integer(1, 5),
            Self::SetTemperature => ValueRule::Number(5.0, 35.0),
            Self::On
            | Self::Off
            | Self::Toggle
            | Self::Open
            | Self::Close
            | Self::Stop
            | Self::Pulse => ValueRule::None,
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = ValidationErrorKind;

    /// Case-insensitive; spaces and dashes count as underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == wanted)
            .ok_or_else(|| ValidationErrorKind::UnknownCommand {
                command: s.trim().to_string(),
            })
    }
}

enum ValueRule {
    None,
    Integer(i64, i64),
    Number(f64, f64),
}

/// Parameter carried by a command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandValue {
    Integer(i64),
    Number(f64),
}

/// A command together with its checked parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "command")]
    pub name: CommandName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CommandValue>,
}

impl Command {
    /// Pair `name` with the raw value cell, checking presence and range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrorKind::MissingValue`],
    /// [`ValidationErrorKind::UnexpectedValue`] or
    /// [`ValidationErrorKind::InvalidValue`] when the value does not fit the
    /// command.
    pub fn parse(name: CommandName, raw_value: Option<&str>) -> Result<Self, ValidationErrorKind> {
        let invalid = |reason: String| ValidationErrorKind::InvalidValue {
            command: name,
            reason,
        };

        let value = match (name.value_rule(), raw_value) {
            (ValueRule::None, None) => None,
            (ValueRule::None, Some(_)) => {
                return Err(ValidationErrorKind::UnexpectedValue { command: name });
            }
            (_, None) => return Err(ValidationErrorKind::MissingValue { command: name }),
            (ValueRule::Integer(min, max), Some(raw)) => {
                let value =
                    parse_integer(raw).ok_or_else(|| invalid(format!("`{raw}` is not a whole number")))?;
                if !(min..=max).contains(&value) {
                    return Err(invalid(format!("{value} is outside {min}..={max}")));
                }
                Some(CommandValue::Integer(value))
            }
            (ValueRule::Number(min, max), Some(raw)) => {
                let value =
                    parse_number(raw).ok_or_else(|| invalid(format!("`{raw}` is not a number")))?;
                if !(min..=max).contains(&value) {
                    return Err(invalid(format!("{value} is outside {min}..={max}")));
                }
                Some(CommandValue::Number(value))
            }
        };

        Ok(Self { name, value })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(CommandValue::Integer(value)) => write!(f, "{}({value})", self.name),
            Some(CommandValue::Number(value)) => write!(f, "{}({value})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
