//! Run configuration for a single import.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use csvdrive_api_core::DataPath;

/// Component axis of a vector property.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Object transform property driven by position/rotation targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformChannel {
    Location,
    Rotation,
}

impl TransformChannel {
    pub fn data_path(self) -> DataPath {
        match self {
            TransformChannel::Location => DataPath::Location,
            TransformChannel::Rotation => DataPath::RotationEuler,
        }
    }
}

/// Which property the driven column is written to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetKind {
    LocX,
    LocY,
    LocZ,
    RotX,
    RotY,
    RotZ,
    #[default]
    LightEnergy,
    /// Greyscale intensity on all three light color channels.
    LightColor,
    LightColorGradient,
    /// Greyscale intensity on the material's base color socket.
    MatColor,
    MatColorGradient,
    #[serde(alias = "UV_MAPPING")]
    UvX,
    UvY,
}

impl TargetKind {
    pub const ALL: [TargetKind; 13] = [
        TargetKind::LocX,
        TargetKind::LocY,
        TargetKind::LocZ,
        TargetKind::RotX,
        TargetKind::RotY,
        TargetKind::RotZ,
        TargetKind::LightEnergy,
        TargetKind::LightColor,
        TargetKind::LightColorGradient,
        TargetKind::MatColor,
        TargetKind::MatColorGradient,
        TargetKind::UvX,
        TargetKind::UvY,
    ];

    /// Configuration token, identical to the serde spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::LocX => "LOC_X",
            TargetKind::LocY => "LOC_Y",
            TargetKind::LocZ => "LOC_Z",
            TargetKind::RotX => "ROT_X",
            TargetKind::RotY => "ROT_Y",
            TargetKind::RotZ => "ROT_Z",
            TargetKind::LightEnergy => "LIGHT_ENERGY",
            TargetKind::LightColor => "LIGHT_COLOR",
            TargetKind::LightColorGradient => "LIGHT_COLOR_GRADIENT",
            TargetKind::MatColor => "MAT_COLOR",
            TargetKind::MatColorGradient => "MAT_COLOR_GRADIENT",
            TargetKind::UvX => "UV_X",
            TargetKind::UvY => "UV_Y",
        }
    }

    /// Transform channel and axis for position/rotation targets.
    pub fn transform_axis(self) -> Option<(TransformChannel, Axis)> {
        match self {
            TargetKind::LocX => Some((TransformChannel::Location, Axis::X)),
            TargetKind::LocY => Some((TransformChannel::Location, Axis::Y)),
            TargetKind::LocZ => Some((TransformChannel::Location, Axis::Z)),
            TargetKind::RotX => Some((TransformChannel::Rotation, Axis::X)),
            TargetKind::RotY => Some((TransformChannel::Rotation, Axis::Y)),
            TargetKind::RotZ => Some((TransformChannel::Rotation, Axis::Z)),
            _ => None,
        }
    }

    pub fn uses_gradient(self) -> bool {
        matches!(
            self,
            TargetKind::LightColorGradient | TargetKind::MatColorGradient
        )
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("UV_MAPPING") {
            return Ok(TargetKind::UvX);
        }
        TargetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| format!("unknown target kind '{s}'"))
    }
}

/// How position/rotation values relate to the object's pose before the import.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OffsetMode {
    /// The value replaces the axis component.
    #[default]
    Absolute,
    /// The value is added to the initial pose; the initial pose is keyed at the
    /// scene start frame before any row is written.
    Relative,
}

/// Two-color ramp used by the gradient targets. Channels are kept in [0,1].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorGradient {
    pub start: [f32; 3],
    pub end: [f32; 3],
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self {
            start: [0.0; 3],
            end: [1.0; 3],
        }
    }
}

impl ColorGradient {
    pub fn new(start: [f32; 3], end: [f32; 3]) -> Self {
        Self { start, end }.clamped()
    }

    /// Copy with every channel clamped into [0,1].
    pub fn clamped(self) -> Self {
        Self {
            start: self.start.map(|c| c.clamp(0.0, 1.0)),
            end: self.end.map(|c| c.clamp(0.0, 1.0)),
        }
    }

    /// Mix start → end by `t`, clamped into [0,1] first.
    pub fn mix(&self, t: f32) -> [f32; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        std::array::from_fn(|c| self.start[c] * (1.0 - t) + self.end[c] * t)
    }
}

/// Configuration for one import run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// CSV path as entered by the user; resolved by the host.
    pub file_path: String,
    /// Column holding the driven value. Column 0 is always the time in seconds.
    pub column: NonZeroUsize,
    pub scale: f64,
    /// Whole frames added to every computed frame (negative shifts earlier).
    pub frame_offset: i32,
    pub target: TargetKind,
    pub offset_mode: OffsetMode,
    /// Endpoints for the gradient targets; black → white when unset.
    pub gradient: Option<ColorGradient>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            file_path: String::new(),
            column: NonZeroUsize::MIN,
            scale: 1.0,
            frame_offset: 0,
            target: TargetKind::default(),
            offset_mode: OffsetMode::default(),
            gradient: None,
        }
    }
}

impl ImportConfig {
    pub fn new(file_path: impl Into<String>, target: TargetKind) -> Self {
        Self {
            file_path: file_path.into(),
            target,
            ..Self::default()
        }
    }

    pub fn with_column(mut self, column: NonZeroUsize) -> Self {
        self.column = column;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_frame_offset(mut self, frame_offset: i32) -> Self {
        self.frame_offset = frame_offset;
        self
    }

    pub fn with_offset_mode(mut self, offset_mode: OffsetMode) -> Self {
        self.offset_mode = offset_mode;
        self
    }

    pub fn with_gradient(mut self, gradient: ColorGradient) -> Self {
        self.gradient = Some(gradient);
        self
    }

    /// Effective gradient: configured endpoints clamped into [0,1], or the default ramp.
    pub fn effective_gradient(&self) -> ColorGradient {
        self.gradient.map(ColorGradient::clamped).unwrap_or_default()
    }

    pub fn is_relative(&self) -> bool {
        self.offset_mode == OffsetMode::Relative
    }
}
