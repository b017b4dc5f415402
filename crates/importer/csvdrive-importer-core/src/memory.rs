//! In-memory host: a single selected object with optional light and material node
//! graph. Keyframes are recorded into a [`KeyframeBatch`] with the property value at
//! insertion time. Scenes load from JSON, e.g.
//!
//! ```json
//! { "settings": { "fps": 30, "frame_start": 1 },
//!   "object": { "name": "Lamp", "light": { "energy": 100 } } }
//! ```

use std::path::PathBuf;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{Axis, TransformChannel};
use crate::error::{HostError, HostResult};
use crate::host::{resolve_project_path, NodeKind, NodeRef, SceneHost, SceneSettings};
use csvdrive_api_core::{DataPath, KeyframeBatch, KeyframeOp, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightData {
    pub energy: f32,
    pub color: [f32; 3],
}

impl Default for LightData {
    fn default() -> Self {
        Self {
            energy: 10.0,
            color: [1.0; 3],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShaderNode {
    /// Unique within the material; may be localized or renamed by the user.
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub inputs: HashMap<String, Value>,
}

impl ShaderNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            inputs: HashMap::new(),
        }
    }

    pub fn with_input(mut self, socket: impl Into<String>, value: Value) -> Self {
        self.inputs.insert(socket.into(), value);
        self
    }

    pub fn principled_bsdf() -> Self {
        Self::new("Principled BSDF", NodeKind::PrincipledBsdf)
            .with_input("Base Color", Value::rgba(0.8, 0.8, 0.8, 1.0))
            .with_input("Roughness", Value::f(0.5))
    }

    pub fn emission() -> Self {
        Self::new("Emission", NodeKind::Emission)
            .with_input("Color", Value::rgba(1.0, 1.0, 1.0, 1.0))
            .with_input("Strength", Value::f(1.0))
    }

    pub fn mapping() -> Self {
        Self::new("Mapping", NodeKind::Mapping)
            .with_input("Location", Value::vec3(0.0, 0.0, 0.0))
            .with_input("Rotation", Value::vec3(0.0, 0.0, 0.0))
            .with_input("Scale", Value::vec3(1.0, 1.0, 1.0))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// `None` when the material does not use a node graph. Node names are made unique
    /// on load.
    #[serde(default, deserialize_with = "unique_nodes")]
    pub nodes: Option<Vec<ShaderNode>>,
}

impl Material {
    pub fn new(name: impl Into<String>, mut nodes: Vec<ShaderNode>) -> Self {
        dedupe_node_names(&mut nodes);
        Self {
            name: name.into(),
            nodes: Some(nodes),
        }
    }

    pub fn without_nodes(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub location: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub light: Option<LightData>,
    /// Active material.
    #[serde(default)]
    pub material: Option<Material>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: [0.0; 3],
            rotation: [0.0; 3],
            light: None,
            material: None,
        }
    }

    pub fn with_location(mut self, location: [f32; 3]) -> Self {
        self.location = location;
        self
    }

    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_light(mut self, light: LightData) -> Self {
        self.light = Some(light);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    fn nodes(&self) -> Option<&[ShaderNode]> {
        self.material.as_ref()?.nodes.as_deref()
    }

    fn node(&self, node: &NodeRef) -> Option<&ShaderNode> {
        self.nodes()?.get(node.index())
    }

    fn node_mut(&mut self, node: &NodeRef) -> HostResult<&mut ShaderNode> {
        self.material
            .as_mut()
            .and_then(|m| m.nodes.as_mut())
            .and_then(|nodes| nodes.get_mut(node.index()))
            .ok_or_else(|| HostError::new(format!("no node '{}'", node.name())))
    }
}

/// Rename repeated node names the way node editors do: `Node`, `Node.001`, ...
fn dedupe_node_names(nodes: &mut [ShaderNode]) {
    let mut taken: HashSet<String> = nodes.iter().map(|n| n.name.clone()).collect();
    let mut seen: HashSet<String> = HashSet::new();
    for node in nodes.iter_mut() {
        if seen.insert(node.name.clone()) {
            continue;
        }
        let mut suffix = 1u32;
        let mut candidate = format!("{}.{suffix:03}", node.name);
        while taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{suffix:03}", node.name);
        }
        taken.insert(candidate.clone());
        seen.insert(candidate.clone());
        node.name = candidate;
    }
}

fn unique_nodes<'de, D>(deserializer: D) -> Result<Option<Vec<ShaderNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut nodes = Option::<Vec<ShaderNode>>::deserialize(deserializer)?;
    if let Some(nodes) = nodes.as_mut() {
        dedupe_node_names(nodes);
    }
    Ok(nodes)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryHost {
    pub settings: SceneSettings,
    /// Base directory for `//`-relative paths.
    pub project_dir: Option<PathBuf>,
    /// Selected object.
    pub object: Option<SceneObject>,
    #[serde(skip)]
    pub keyframes: KeyframeBatch,
}

impl MemoryHost {
    pub fn new(settings: SceneSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.object = Some(object);
        self
    }

    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn object(&self) -> Option<&SceneObject> {
        self.object.as_ref()
    }

    /// Current input value of the node named `node`.
    pub fn node_input(&self, node: &str, socket: &str) -> Option<Value> {
        self.object
            .as_ref()?
            .nodes()?
            .iter()
            .find(|n| n.name == node)?
            .inputs
            .get(socket)
            .copied()
    }

    fn object_mut(&mut self) -> HostResult<&mut SceneObject> {
        self.object
            .as_mut()
            .ok_or_else(|| HostError::new("no object selected"))
    }

    fn light_mut(&mut self) -> HostResult<&mut LightData> {
        self.object_mut()?
            .light
            .as_mut()
            .ok_or_else(|| HostError::new("object has no light data"))
    }

    /// Current value of `path` on the selected object.
    fn read_property(&self, path: &DataPath) -> HostResult<Value> {
        let object = self
            .object
            .as_ref()
            .ok_or_else(|| HostError::new("no object selected"))?;
        let missing = || HostError::new(format!("cannot key '{path}' on '{}'", object.name));
        match path {
            DataPath::Location => Ok(Value::Vec3(object.location)),
            DataPath::RotationEuler => Ok(Value::Vec3(object.rotation)),
            DataPath::LightEnergy => object
                .light
                .as_ref()
                .map(|l| Value::Float(l.energy))
                .ok_or_else(missing),
            DataPath::LightColor => object
                .light
                .as_ref()
                .map(|l| Value::ColorRgb(l.color))
                .ok_or_else(missing),
            DataPath::NodeInput { node, socket } => {
                self.node_input(node, socket).ok_or_else(missing)
            }
        }
    }
}

impl SceneHost for MemoryHost {
    fn resolve_path(&self, raw: &str) -> Option<PathBuf> {
        resolve_project_path(raw, self.project_dir.as_deref())
    }

    fn scene_settings(&self) -> SceneSettings {
        self.settings
    }

    fn active_object(&self) -> Option<&str> {
        self.object.as_ref().map(|o| o.name.as_str())
    }

    fn transform(&self, channel: TransformChannel) -> HostResult<[f32; 3]> {
        let object = self
            .object
            .as_ref()
            .ok_or_else(|| HostError::new("no object selected"))?;
        Ok(match channel {
            TransformChannel::Location => object.location,
            TransformChannel::Rotation => object.rotation,
        })
    }

    fn set_transform_axis(
        &mut self,
        channel: TransformChannel,
        axis: Axis,
        value: f32,
    ) -> HostResult<()> {
        let object = self.object_mut()?;
        let target = match channel {
            TransformChannel::Location => &mut object.location,
            TransformChannel::Rotation => &mut object.rotation,
        };
        target[axis.index()] = value;
        Ok(())
    }

    fn has_light(&self) -> bool {
        self.object.as_ref().is_some_and(|o| o.light.is_some())
    }

    fn set_light_energy(&mut self, energy: f32) -> HostResult<()> {
        self.light_mut()?.energy = energy;
        Ok(())
    }

    fn set_light_color(&mut self, color: [f32; 3]) -> HostResult<()> {
        self.light_mut()?.color = color;
        Ok(())
    }

    fn find_node(&self, kind: NodeKind) -> Option<NodeRef> {
        let nodes = self.object.as_ref()?.nodes()?;
        nodes
            .iter()
            .position(|n| n.kind == kind)
            .map(|index| NodeRef::new(index, nodes[index].name.clone()))
    }

    fn has_input(&self, node: &NodeRef, socket: &str) -> bool {
        self.object
            .as_ref()
            .and_then(|o| o.node(node))
            .is_some_and(|n| n.inputs.contains_key(socket))
    }

    fn set_input(&mut self, node: &NodeRef, socket: &str, value: Value) -> HostResult<()> {
        let node = self.object_mut()?.node_mut(node)?;
        let slot = node
            .inputs
            .get_mut(socket)
            .ok_or_else(|| HostError::new(format!("no input '{socket}' on '{}'", node.name)))?;
        if slot.kind() != value.kind() {
            return Err(HostError::new(format!(
                "input '{socket}' holds {:?}, got {:?}",
                slot.kind(),
                value.kind()
            )));
        }
        *slot = value;
        Ok(())
    }

    fn set_input_component(
        &mut self,
        node: &NodeRef,
        socket: &str,
        index: usize,
        value: f32,
    ) -> HostResult<()> {
        let node = self.object_mut()?.node_mut(node)?;
        let slot = node
            .inputs
            .get_mut(socket)
            .ok_or_else(|| HostError::new(format!("no input '{socket}' on '{}'", node.name)))?;
        *slot = slot
            .with_component(index, value)
            .ok_or_else(|| HostError::new(format!("input '{socket}' has no component {index}")))?;
        Ok(())
    }

    fn insert_keyframe(
        &mut self,
        path: &DataPath,
        index: Option<usize>,
        frame: f64,
    ) -> HostResult<()> {
        let value = self.read_property(path)?;
        if let Some(i) = index {
            if value.component(i).is_none() {
                return Err(HostError::new(format!("'{path}' has no component {i}")));
            }
        }
        self.keyframes
            .push(KeyframeOp::new(path.clone(), index, frame, value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> MemoryHost {
        MemoryHost::new(SceneSettings::default())
            .with_object(SceneObject::new("Lamp").with_light(LightData::default()))
    }

    #[test]
    fn keyframes_record_value_at_insertion() {
        let mut host = lamp();
        host.set_light_energy(5.0).unwrap();
        host.insert_keyframe(&DataPath::LightEnergy, None, 1.0).unwrap();
        host.set_light_energy(7.0).unwrap();
        host.insert_keyframe(&DataPath::LightEnergy, None, 2.0).unwrap();
        let values: Vec<_> = host.keyframes.iter().map(|k| k.value).collect();
        assert_eq!(values, vec![Value::f(5.0), Value::f(7.0)]);
    }

    #[test]
    fn keying_a_missing_property_fails() {
        let mut host = MemoryHost::default().with_object(SceneObject::new("Cube"));
        assert!(host.insert_keyframe(&DataPath::LightEnergy, None, 1.0).is_err());
        assert!(host.insert_keyframe(&DataPath::Location, Some(3), 1.0).is_err());
        assert!(host.keyframes.is_empty());
    }

    #[test]
    fn node_lookup_is_by_kind() {
        let host = MemoryHost::default().with_object(SceneObject::new("Cube").with_material(
            Material::new(
                "Mat",
                vec![ShaderNode {
                    name: "原理化BSDF".into(),
                    ..ShaderNode::principled_bsdf()
                }],
            ),
        ));
        let node = host.find_node(NodeKind::PrincipledBsdf).unwrap();
        assert_eq!(node.name(), "原理化BSDF");
        assert!(host.has_input(&node, "Base Color"));
        assert!(host.find_node(NodeKind::Mapping).is_none());
    }

    #[test]
    fn set_input_rejects_kind_mismatch() {
        let mut host = MemoryHost::default().with_object(
            SceneObject::new("Cube")
                .with_material(Material::new("Mat", vec![ShaderNode::mapping()])),
        );
        let node = host.find_node(NodeKind::Mapping).unwrap();
        assert!(host.set_input(&node, "Location", Value::f(1.0)).is_err());
        host.set_input_component(&node, "Location", 1, 0.25).unwrap();
        assert_eq!(
            host.node_input("Mapping", "Location"),
            Some(Value::vec3(0.0, 0.25, 0.0))
        );
    }

    #[test]
    fn repeated_node_names_get_suffixes() {
        let material = Material::new(
            "Mat",
            vec![
                ShaderNode::new("Node", NodeKind::Other),
                ShaderNode::new("Node", NodeKind::Mapping),
                ShaderNode::new("Node.001", NodeKind::Emission),
            ],
        );
        let names: Vec<_> = material
            .nodes
            .iter()
            .flatten()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, ["Node", "Node.002", "Node.001"]);
    }

    #[test]
    fn node_refs_address_the_node_found_by_kind() {
        let mut host = MemoryHost::from_json(
            r#"{ "object": { "name": "Plane", "material": { "name": "Mat", "nodes": [
                { "name": "Node", "kind": "TEX_IMAGE" },
                { "name": "Node", "kind": "MAPPING",
                  "inputs": { "Location": { "type": "Vec3", "data": [0, 0, 0] } } }
            ] } } }"#,
        )
        .unwrap();
        let node = host.find_node(NodeKind::Mapping).unwrap();
        assert_eq!(node.index(), 1);
        assert_eq!(node.name(), "Node.001");
        assert!(host.has_input(&node, "Location"));
        host.set_input_component(&node, "Location", 0, 0.5).unwrap();
        assert_eq!(
            host.node_input("Node.001", "Location"),
            Some(Value::vec3(0.5, 0.0, 0.0))
        );
        assert_eq!(host.node_input("Node", "Location"), None);
    }

    #[test]
    fn scene_json_loads_with_defaults() {
        let host = MemoryHost::from_json(
            r#"{
                "settings": { "fps": 30 },
                "object": {
                    "name": "Plane",
                    "material": { "name": "Mat", "nodes": [
                        { "name": "Mapping", "kind": "MAPPING",
                          "inputs": { "Location": { "type": "Vec3", "data": [0, 0, 0] } } },
                        { "name": "Image Texture", "kind": "TEX_IMAGE" }
                    ] }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(host.settings.fps, 30.0);
        assert_eq!(host.settings.frame_start, 1);
        assert_eq!(host.active_object(), Some("Plane"));
        assert!(host.find_node(NodeKind::Mapping).is_some());
        assert!(!host.has_light());
    }
}
