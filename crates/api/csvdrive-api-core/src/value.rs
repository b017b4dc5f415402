//! Value: property values read from and written to a host.
//! All numeric types use f32, matching host property storage.

use serde::{Deserialize, Serialize};

/// Coarse kind of a [`Value`], handy for quick dispatch and error messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Vec3,
    ColorRgb,
    ColorRgba,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// Scalar float (light energy, a single socket value)
    Float(f32),

    /// 3D vector (location, Euler rotation, mapping location)
    Vec3([f32; 3]),

    /// RGB color (light color)
    ColorRgb([f32; 3]),

    /// RGBA color (shader color sockets)
    ColorRgba([f32; 4]),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::ColorRgb(_) => ValueKind::ColorRgb,
            Value::ColorRgba(_) => ValueKind::ColorRgba,
        }
    }

    /// Read one component. A `Float` only has component 0.
    pub fn component(&self, index: usize) -> Option<f32> {
        match self {
            Value::Float(v) => (index == 0).then_some(*v),
            Value::Vec3(v) | Value::ColorRgb(v) => v.get(index).copied(),
            Value::ColorRgba(v) => v.get(index).copied(),
        }
    }

    /// Return a copy with one component replaced, or `None` if `index` is out of range.
    pub fn with_component(&self, index: usize, component: f32) -> Option<Value> {
        let mut out = *self;
        let slot = match &mut out {
            Value::Float(v) => (index == 0).then_some(v),
            Value::Vec3(v) | Value::ColorRgb(v) => v.get_mut(index),
            Value::ColorRgba(v) => v.get_mut(index),
        }?;
        *slot = component;
        Some(out)
    }

    pub fn f(v: f32) -> Self {
        Value::Float(v)
    }

    pub fn vec3(x: f32, y: f32, z: f32) -> Self {
        Value::Vec3([x, y, z])
    }

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Value::ColorRgba([r, g, b, a])
    }
}
