//! csvdrive-api-core: values, animatable data paths and keyframe records shared
//! between the importer core and host adapters (engine-agnostic).

pub mod data_path;
pub mod keyframe;
pub mod value;

pub use data_path::{DataPath, DataPathError};
pub use keyframe::{KeyframeBatch, KeyframeOp};
pub use value::{Value, ValueKind};
