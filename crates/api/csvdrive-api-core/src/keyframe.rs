//! Keyframe records produced by hosts when the importer commits a value.
//!
//! KeyframeOp serializes to JSON as:
//!   { "path": "location", "index": 2, "frame": 27.0, "value": { "type": "Vec3", "data": [0,0,1] } }
//!
//! `value` is the full property value at insertion time; `index` selects the keyed
//! component (absent when the whole property was keyed).

use crate::{DataPath, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeOp {
    pub path: DataPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub frame: f64,
    pub value: Value,
}

impl KeyframeOp {
    pub fn new(path: DataPath, index: Option<usize>, frame: f64, value: Value) -> Self {
        Self {
            path,
            index,
            frame,
            value,
        }
    }

    /// The keyed scalar: the indexed component, or the value itself for whole-property
    /// keys on scalars.
    pub fn keyed_component(&self) -> Option<f32> {
        self.value.component(self.index.unwrap_or(0))
    }
}

impl fmt::Display for KeyframeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val = serde_json::to_string(&self.value).map_err(|_| fmt::Error)?;
        match self.index {
            Some(index) => write!(
                f,
                "{{ path: {}[{}], frame: {}, value: {} }}",
                self.path, index, self.frame, val
            ),
            None => write!(
                f,
                "{{ path: {}, frame: {}, value: {} }}",
                self.path, self.frame, val
            ),
        }
    }
}

/// Keyframes in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyframeBatch(pub Vec<KeyframeOp>);

impl KeyframeBatch {
    pub fn new() -> Self {
        KeyframeBatch(Vec::new())
    }

    pub fn push(&mut self, op: KeyframeOp) {
        self.0.push(op);
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyframeOp> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<KeyframeOp> {
        self.0
    }

    /// Keyframes recorded on `path`, in insertion order.
    pub fn on_path<'a>(&'a self, path: &'a DataPath) -> impl Iterator<Item = &'a KeyframeOp> + 'a {
        self.0.iter().filter(move |op| &op.path == path)
    }

    /// Frames recorded on `path`, in insertion order.
    pub fn frames_on(&self, path: &DataPath) -> Vec<f64> {
        self.on_path(path).map(|op| op.frame).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyframe_json_omits_missing_index() {
        let op = KeyframeOp::new(DataPath::LightEnergy, None, 27.0, Value::f(40.0));
        let s = serde_json::to_string(&op).unwrap();
        assert!(!s.contains("index"));
        assert!(s.contains(r#""path":"data.energy""#));
    }

    #[test]
    fn keyed_component_follows_index() {
        let op = KeyframeOp::new(DataPath::Location, Some(2), 0.0, Value::vec3(1.0, 2.0, 3.0));
        assert_eq!(op.keyed_component(), Some(3.0));
        let whole = KeyframeOp::new(DataPath::LightEnergy, None, 0.0, Value::f(5.0));
        assert_eq!(whole.keyed_component(), Some(5.0));
    }

    #[test]
    fn batch_filters_by_path() {
        let mut b = KeyframeBatch::new();
        b.push(KeyframeOp::new(DataPath::LightEnergy, None, 1.0, Value::f(1.0)));
        b.push(KeyframeOp::new(DataPath::Location, Some(0), 2.0, Value::vec3(0.0, 0.0, 0.0)));
        b.push(KeyframeOp::new(DataPath::LightEnergy, None, 3.0, Value::f(2.0)));
        assert_eq!(b.len(), 3);
        assert_eq!(b.frames_on(&DataPath::LightEnergy), vec![1.0, 3.0]);
        assert_eq!(
            b.to_owned().into_vec()[1].to_string(),
            r#"{ path: location[0], frame: 2, value: {"type":"Vec3","data":[0.0,0.0,0.0]} }"#
        );
    }
}
