//! Target: what a scene action or a remote button points at.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of entity a referenced name resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Device,
    Group,
    Scene,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device => f.write_str("device"),
            Self::Group => f.write_str("group"),
            Self::Scene => f.write_str("scene"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_lowercase() {
        let json = serde_json::to_string(&TargetKind::Group).unwrap();
        assert_eq!(json, "\"group\"");
        assert_eq!(TargetKind::Scene.to_string(), "scene");
    }
}
