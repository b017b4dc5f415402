//! DataPath parsing and formatting.
//!
//! A DataPath addresses one animatable property on the selected object, using the
//! host's own path spelling:
//!   "location"                                          -> object location (vec3)
//!   "rotation_euler"                                    -> object Euler rotation (vec3)
//!   "data.energy"                                       -> light power (float)
//!   "data.color"                                        -> light color (rgb)
//!   `nodes["Mapping"].inputs["Location"].default_value` -> shader node input socket
//!
//! Node and socket names may contain spaces ("Principled BSDF", "Base Color") but not
//! double quotes.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const NODE_PREFIX: &str = "nodes[\"";
const INPUT_INFIX: &str = "\"].inputs[\"";
const SOCKET_SUFFIX: &str = "\"].default_value";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataPath {
    Location,
    RotationEuler,
    LightEnergy,
    LightColor,
    /// Default value of a named input socket on a named shader node.
    NodeInput { node: String, socket: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataPathError {
    #[error("empty data path")]
    Empty,
    #[error("unknown data path '{0}'")]
    Unknown(String),
    #[error("invalid node input path '{0}'")]
    InvalidNodeInput(String),
}

impl DataPath {
    pub fn node_input(node: impl Into<String>, socket: impl Into<String>) -> Self {
        DataPath::NodeInput {
            node: node.into(),
            socket: socket.into(),
        }
    }

    /// Parse a path string according to the grammar described above.
    pub fn parse(s: &str) -> Result<Self, DataPathError> {
        match s {
            "" => Err(DataPathError::Empty),
            "location" => Ok(DataPath::Location),
            "rotation_euler" => Ok(DataPath::RotationEuler),
            "data.energy" => Ok(DataPath::LightEnergy),
            "data.color" => Ok(DataPath::LightColor),
            _ if s.starts_with(NODE_PREFIX) => parse_node_input(s),
            _ => Err(DataPathError::Unknown(s.to_string())),
        }
    }
}

fn parse_node_input(s: &str) -> Result<DataPath, DataPathError> {
    let invalid = || DataPathError::InvalidNodeInput(s.to_string());
    let body = s
        .strip_prefix(NODE_PREFIX)
        .and_then(|rest| rest.strip_suffix(SOCKET_SUFFIX))
        .ok_or_else(invalid)?;
    let (node, socket) = body.split_once(INPUT_INFIX).ok_or_else(invalid)?;
    if node.is_empty() || socket.is_empty() || node.contains('"') || socket.contains('"') {
        return Err(invalid());
    }
    Ok(DataPath::node_input(node, socket))
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataPath::Location => f.write_str("location"),
            DataPath::RotationEuler => f.write_str("rotation_euler"),
            DataPath::LightEnergy => f.write_str("data.energy"),
            DataPath::LightColor => f.write_str("data.color"),
            DataPath::NodeInput { node, socket } => {
                write!(f, "{NODE_PREFIX}{node}{INPUT_INFIX}{socket}{SOCKET_SUFFIX}")
            }
        }
    }
}

impl FromStr for DataPath {
    type Err = DataPathError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataPath::parse(s)
    }
}

// Serde support: serialize as string, deserialize from string
impl Serialize for DataPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DataPath {
    fn deserialize<D>(deserializer: D) -> Result<DataPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DataPath::parse(&s).map_err(de::Error::custom)
    }
}
