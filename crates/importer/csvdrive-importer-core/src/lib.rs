//! csvdrive importer core (host-agnostic)
//!
//! Turns a time-series table (CSV: time column + numeric columns) into keyframes on one
//! animatable property of the selected scene object. The host application is reached
//! only through the [`SceneHost`] capability trait; [`MemoryHost`] is an in-memory
//! implementation used by the CLI and the tests.

pub mod config;
pub mod error;
pub mod host;
pub mod importer;
pub mod memory;
pub mod pose;
pub mod report;
pub mod sampling;
pub mod table;
pub mod writers;

// Re-exports for consumers (adapters)
pub use config::{Axis, ColorGradient, ImportConfig, OffsetMode, TargetKind, TransformChannel};
pub use error::{ErrorKind, HostError, HostResult, ImportError};
pub use host::{resolve_project_path, NodeKind, NodeRef, SceneHost, SceneSettings};
pub use importer::{generate, ImportSummary};
pub use memory::{LightData, Material, MemoryHost, SceneObject, ShaderNode};
pub use pose::InitialPose;
pub use report::{Report, ReportLevel};
pub use sampling::{FrameMapping, RowSample};
pub use table::SourceTable;
pub use writers::{Dispatch, TargetWriter};
pub use csvdrive_api_core::{DataPath, KeyframeBatch, KeyframeOp, Value};
