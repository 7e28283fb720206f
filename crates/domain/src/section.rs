//! Section: the spreadsheet input, already split into named tables of rows.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The four spreadsheet sections, in compilation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Devices,
    Groups,
    Scenes,
    RemoteControls,
}

impl SectionKind {
    /// All sections, in the order the compiler runs them.
    pub const ALL: [Self; 4] = [
        Self::Devices,
        Self::Groups,
        Self::Scenes,
        Self::RemoteControls,
    ];

    /// Key of the section in the input and output documents.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Devices => "devices",
            Self::Groups => "groups",
            Self::Scenes => "scenes",
            Self::RemoteControls => "remoteControls",
        }
    }

    /// Marker prefixing each message in the flat, single-string error format.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Devices => "ROOM DEVICE:",
            Self::Groups => "ROOM GROUP:",
            Self::Scenes => "ROOM SCENE:",
            Self::RemoteControls => "ROOM REMOTE:",
        }
    }

    /// Singular human label of the entities in this section.
    #[must_use]
    pub fn entity_label(self) -> &'static str {
        match self {
            Self::Devices => "device",
            Self::Groups => "group",
            Self::Scenes => "scene",
            Self::RemoteControls => "remote control",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Normalize a spreadsheet column header.
///
/// Trims, lower-cases and collapses runs of whitespace, `-` and `_` into a
/// single `_`, so `" Button 1"`, `"button-1"` and `"BUTTON_1"` all become
/// `"button_1"`.
#[must_use]
pub fn normalize_column(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// One spreadsheet row: ordered `(column, value)` cells.
///
/// Columns are normalized on insertion and values trimmed. Two source columns
/// may normalize to the same name; both cells are kept so that callers can
/// detect the clash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell.
    #[must_use]
    pub fn with(mut self, column: &str, value: impl AsRef<str>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: &str, value: impl AsRef<str>) {
        self.cells
            .push((normalize_column(column), value.as_ref().trim().to_string()));
    }

    /// First non-empty value stored under `column` (already normalized).
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, value)| name == column && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    /// All cells in source order, empty ones included.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }

    fn from_json(index: usize, record: &Map<String, Value>) -> Result<Self, String> {
        let mut row = Self::new();
        for (column, value) in record {
            let text = match value {
                Value::Array(items) => items
                    .iter()
                    .map(scalar_text)
                    .collect::<Option<Vec<_>>>()
                    .map(|items| {
                        items
                            .into_iter()
                            .filter(|item| !item.trim().is_empty())
                            .collect::<Vec<_>>()
                            .join(", ")
                    }),
                scalar => scalar_text(scalar),
            };
            let Some(text) = text else {
                return Err(format!(
                    "row {} column `{column}` is not a scalar value",
                    index + 1
                ));
            };
            row.push(column, text);
        }
        Ok(row)
    }
}

/// Text of a scalar cell; `None` for arrays and objects.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// The rows of one section, in spreadsheet order.
pub type RawSection = Vec<Row>;

/// How a section arrived from the splitting step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SectionInput {
    /// The key was absent (or `null`).
    #[default]
    Missing,
    /// A well-formed list of rows, possibly empty.
    Rows(RawSection),
    /// Present but not shaped as a list of records with scalar (or list of
    /// scalar) cells.
    Malformed(String),
}

impl SectionInput {
    fn from_json(value: Option<&Value>) -> Self {
        let items = match value {
            None | Some(Value::Null) => return Self::Missing,
            Some(Value::Array(items)) => items,
            Some(_) => return Self::Malformed("expected a list of rows".to_string()),
        };

        let mut rows = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let Value::Object(record) = item else {
                return Self::Malformed(format!("row {} is not a record", index + 1));
            };
            match Row::from_json(index, record) {
                Ok(row) => rows.push(row),
                Err(reason) => return Self::Malformed(reason),
            }
        }
        Self::Rows(rows)
    }
}

impl From<RawSection> for SectionInput {
    fn from(rows: RawSection) -> Self {
        Self::Rows(rows)
    }
}

/// All four sections of one spreadsheet.
///
/// Deserializes from a JSON object keyed `devices`, `groups`, `scenes` and
/// `remoteControls` (`remote_controls` is accepted too). The top-level value
/// must be an object; each section is classified independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSections {
    pub devices: SectionInput,
    pub groups: SectionInput,
    pub scenes: SectionInput,
    pub remote_controls: SectionInput,
}

impl RawSections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_devices(mut self, rows: RawSection) -> Self {
        self.devices = rows.into();
        self
    }

    #[must_use]
    pub fn with_groups(mut self, rows: RawSection) -> Self {
        self.groups = rows.into();
        self
    }

    #[must_use]
    pub fn with_scenes(mut self, rows: RawSection) -> Self {
        self.scenes = rows.into();
        self
    }

    #[must_use]
    pub fn with_remote_controls(mut self, rows: RawSection) -> Self {
        self.remote_controls = rows.into();
        self
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            devices: SectionInput::from_json(map.get("devices")),
            groups: SectionInput::from_json(map.get("groups")),
            scenes: SectionInput::from_json(map.get("scenes")),
            remote_controls: SectionInput::from_json(
                map.get("remoteControls")
                    .or_else(|| map.get("remote_controls")),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for RawSections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_map(&map))
    }
}
