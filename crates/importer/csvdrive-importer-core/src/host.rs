//! Host capability trait.
//!
//! The importer never touches scene storage directly. Adapters implement [`SceneHost`]
//! for the selected object of their application and pass it into [`crate::generate`].
//! Every mutation is followed by exactly one `insert_keyframe` call on the same property.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{Axis, TransformChannel};
use crate::error::HostResult;
use csvdrive_api_core::{DataPath, Value};

/// Scene-wide timing read at the start of a run.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub fps: f64,
    /// First frame of the scene's animation range; relative imports anchor here.
    pub frame_start: i32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            fps: 24.0,
            frame_start: 1,
        }
    }
}

/// Shader node kinds the writers look up. Lookup is by kind, never by display name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "BSDF_PRINCIPLED")]
    PrincipledBsdf,
    #[serde(rename = "EMISSION")]
    Emission,
    #[serde(rename = "MAPPING")]
    Mapping,
    #[serde(other)]
    Other,
}

/// Host-side identity of a shader node: its position in the active material's node
/// list, plus the name keyframe paths are written against.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    index: usize,
    name: String,
}

impl NodeRef {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Narrow read/write surface over the selected object.
pub trait SceneHost {
    /// Resolve a user-entered path to an existing file.
    fn resolve_path(&self, raw: &str) -> Option<PathBuf>;

    fn scene_settings(&self) -> SceneSettings;

    /// Name of the selected object, if any.
    fn active_object(&self) -> Option<&str>;

    fn transform(&self, channel: TransformChannel) -> HostResult<[f32; 3]>;
    fn set_transform_axis(
        &mut self,
        channel: TransformChannel,
        axis: Axis,
        value: f32,
    ) -> HostResult<()>;

    fn has_light(&self) -> bool;
    fn set_light_energy(&mut self, energy: f32) -> HostResult<()>;
    fn set_light_color(&mut self, color: [f32; 3]) -> HostResult<()>;

    /// First node of `kind` in the active material's node graph. `None` when there is
    /// no material, no node graph, or no such node.
    fn find_node(&self, kind: NodeKind) -> Option<NodeRef>;
    fn has_input(&self, node: &NodeRef, socket: &str) -> bool;
    fn set_input(&mut self, node: &NodeRef, socket: &str, value: Value) -> HostResult<()>;
    fn set_input_component(
        &mut self,
        node: &NodeRef,
        socket: &str,
        index: usize,
        value: f32,
    ) -> HostResult<()>;

    /// Key the current value of `path` (or one component of it) at `frame`.
    fn insert_keyframe(&mut self, path: &DataPath, index: Option<usize>, frame: f64)
        -> HostResult<()>;
}

/// Resolve a path the way project-aware hosts do: a leading `//` is relative to the
/// project directory; everything else is taken as-is. Returns `None` for blank input,
/// a `//` path without a project directory, or a path that is not an existing file.
pub fn resolve_project_path(raw: &str, project_dir: Option<&Path>) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let path = match raw.strip_prefix("//") {
        Some(rel) => project_dir?.join(rel),
        None => PathBuf::from(raw),
    };
    path.is_file().then_some(path)
}
