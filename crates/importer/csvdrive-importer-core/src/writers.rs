//! Target writers: one variant per animatable property kind.
//!
//! Each writer consumes a (frame, value) pair, mutates exactly one host property and
//! keys it at that frame. A writer whose sub-target is missing on the host (no light,
//! no material, no matching node or socket) returns [`Dispatch::Missing`] without
//! touching anything.

use log::trace;

use crate::config::{Axis, ColorGradient, ImportConfig, TargetKind, TransformChannel};
use crate::error::HostResult;
use crate::host::{NodeKind, NodeRef, SceneHost};
use crate::pose::InitialPose;
use csvdrive_api_core::{DataPath, Value};

/// Color-bearing shader nodes, in lookup preference order.
pub const COLOR_NODE_KINDS: [NodeKind; 2] = [NodeKind::PrincipledBsdf, NodeKind::Emission];

/// Accepted names for the color input socket, in lookup preference order.
pub const COLOR_SOCKETS: [&str; 2] = ["Base Color", "Color"];

/// Mapping node input that carries the texture offset.
pub const MAPPING_SOCKET: &str = "Location";

/// What happened to one dispatched row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Property written and keyed.
    Written,
    /// Host has no such sub-target; nothing was changed.
    Missing(&'static str),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TargetWriter {
    /// Location/rotation component. `baseline` is the initial component in relative mode.
    Transform {
        channel: TransformChannel,
        axis: Axis,
        baseline: Option<f32>,
    },
    LightEnergy,
    /// max(value, 0) on all three light color channels.
    LightColorMono,
    LightColorGradient(ColorGradient),
    /// max(value, 0) on the RGB channels of the material color socket, alpha 1.
    MaterialColorMono,
    MaterialColorGradient(ColorGradient),
    /// Mapping node location component (texture offset).
    MappingOffset { axis: Axis },
}

impl TargetWriter {
    /// Build the writer for `config`. `pose` supplies the relative-mode baseline for
    /// transform targets and is ignored otherwise.
    pub fn for_config(config: &ImportConfig, pose: Option<&InitialPose>) -> Self {
        let transform = |channel: TransformChannel, axis: Axis| {
            let baseline = if config.is_relative() {
                pose.map(|p| p.channel(channel)[axis.index()])
            } else {
                None
            };
            TargetWriter::Transform {
                channel,
                axis,
                baseline,
            }
        };
        match config.target {
            TargetKind::LocX => transform(TransformChannel::Location, Axis::X),
            TargetKind::LocY => transform(TransformChannel::Location, Axis::Y),
            TargetKind::LocZ => transform(TransformChannel::Location, Axis::Z),
            TargetKind::RotX => transform(TransformChannel::Rotation, Axis::X),
            TargetKind::RotY => transform(TransformChannel::Rotation, Axis::Y),
            TargetKind::RotZ => transform(TransformChannel::Rotation, Axis::Z),
            TargetKind::LightEnergy => TargetWriter::LightEnergy,
            TargetKind::LightColor => TargetWriter::LightColorMono,
            TargetKind::LightColorGradient => {
                TargetWriter::LightColorGradient(config.effective_gradient())
            }
            TargetKind::MatColor => TargetWriter::MaterialColorMono,
            TargetKind::MatColorGradient => {
                TargetWriter::MaterialColorGradient(config.effective_gradient())
            }
            TargetKind::UvX => TargetWriter::MappingOffset { axis: Axis::X },
            TargetKind::UvY => TargetWriter::MappingOffset { axis: Axis::Y },
        }
    }

    /// Write `value` and key it at `frame`.
    pub fn apply<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        frame: f64,
        value: f64,
    ) -> HostResult<Dispatch> {
        let value = value as f32;
        match *self {
            TargetWriter::Transform {
                channel,
                axis,
                baseline,
            } => {
                let component = baseline.map_or(value, |base| base + value);
                host.set_transform_axis(channel, axis, component)?;
                host.insert_keyframe(&channel.data_path(), Some(axis.index()), frame)?;
                Ok(Dispatch::Written)
            }
            TargetWriter::LightEnergy => {
                if !host.has_light() {
                    return Ok(Dispatch::Missing("light"));
                }
                host.set_light_energy(value)?;
                host.insert_keyframe(&DataPath::LightEnergy, None, frame)?;
                Ok(Dispatch::Written)
            }
            TargetWriter::LightColorMono => write_light_color(host, [value.max(0.0); 3], frame),
            TargetWriter::LightColorGradient(gradient) => {
                write_light_color(host, gradient.mix(value), frame)
            }
            TargetWriter::MaterialColorMono => {
                write_material_color(host, [value.max(0.0); 3], frame)
            }
            TargetWriter::MaterialColorGradient(gradient) => {
                write_material_color(host, gradient.mix(value), frame)
            }
            TargetWriter::MappingOffset { axis } => {
                let Some(node) = host.find_node(NodeKind::Mapping) else {
                    return Ok(Dispatch::Missing("mapping node"));
                };
                if !host.has_input(&node, MAPPING_SOCKET) {
                    return Ok(Dispatch::Missing("mapping location socket"));
                }
                host.set_input_component(&node, MAPPING_SOCKET, axis.index(), value)?;
                host.insert_keyframe(
                    &DataPath::node_input(node.name(), MAPPING_SOCKET),
                    Some(axis.index()),
                    frame,
                )?;
                Ok(Dispatch::Written)
            }
        }
    }
}

fn write_light_color<H: SceneHost + ?Sized>(
    host: &mut H,
    color: [f32; 3],
    frame: f64,
) -> HostResult<Dispatch> {
    if !host.has_light() {
        return Ok(Dispatch::Missing("light"));
    }
    host.set_light_color(color)?;
    host.insert_keyframe(&DataPath::LightColor, None, frame)?;
    Ok(Dispatch::Written)
}

fn write_material_color<H: SceneHost + ?Sized>(
    host: &mut H,
    rgb: [f32; 3],
    frame: f64,
) -> HostResult<Dispatch> {
    let Some((node, socket)) = find_color_socket(host) else {
        return Ok(Dispatch::Missing("color node"));
    };
    let Some(socket) = socket else {
        trace!("node '{}' has no color input", node.name());
        return Ok(Dispatch::Missing("color socket"));
    };
    host.set_input(&node, socket, Value::rgba(rgb[0], rgb[1], rgb[2], 1.0))?;
    host.insert_keyframe(&DataPath::node_input(node.name(), socket), None, frame)?;
    Ok(Dispatch::Written)
}

/// First color node by kind, and its first accepted color socket if it has one.
fn find_color_socket<H: SceneHost + ?Sized>(host: &H) -> Option<(NodeRef, Option<&'static str>)> {
    let node = COLOR_NODE_KINDS
        .into_iter()
        .find_map(|kind| host.find_node(kind))?;
    let socket = COLOR_SOCKETS
        .into_iter()
        .find(|name| host.has_input(&node, name));
    Some((node, socket))
}
