//! Row importer: validate inputs, then write one keyframe per valid data row.
//!
//! Order of checks: selection, file resolution, empty file, column width (first data
//! row only). After that the run is best effort per row: short or non-numeric rows are
//! skipped and writers with no host sub-target no-op. Host write failures abort the run
//! and leave earlier keyframes in place.

use log::{debug, info, trace};
use serde::Serialize;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::host::SceneHost;
use crate::pose::InitialPose;
use crate::sampling::FrameMapping;
use crate::table::SourceTable;
use crate::writers::{Dispatch, TargetWriter};

/// Result of a successful run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportSummary {
    /// Rows that reached a writer, including rows whose writer found no sub-target.
    pub keyframes: usize,
    pub frame_offset: i32,
    /// Start frame the initial pose was keyed at, for relative transform imports.
    pub anchor_frame: Option<f64>,
}

/// Run one import of `config` against the selected object of `host`.
pub fn generate<H: SceneHost + ?Sized>(
    config: &ImportConfig,
    host: &mut H,
) -> Result<ImportSummary, ImportError> {
    let object = host
        .active_object()
        .ok_or(ImportError::NoTarget)?
        .to_owned();

    let not_found = || ImportError::FileNotFound {
        path: config.file_path.clone(),
    };
    if config.file_path.trim().is_empty() {
        return Err(not_found());
    }
    let path = host.resolve_path(&config.file_path).ok_or_else(not_found)?;

    info!(
        "importing '{}' column {} into {} on '{}'",
        path.display(),
        config.column,
        config.target,
        object
    );

    let table = SourceTable::read(&path)?;
    if table.is_empty() {
        return Err(ImportError::EmptyFile {
            path: path.display().to_string(),
        });
    }

    let column = config.column.get();
    if let Some(first) = table.first_data_row() {
        if column >= first.len() {
            return Err(ImportError::ColumnOutOfRange {
                column,
                width: first.len(),
            });
        }
    }

    let settings = host.scene_settings();
    let mapping = FrameMapping::new(settings.fps, config.frame_offset, config.scale);

    let mut anchor_frame = None;
    let pose = match config.target.transform_axis() {
        Some((channel, _)) => {
            let pose = InitialPose::capture(&*host)?;
            if config.is_relative() {
                let frame = f64::from(settings.frame_start);
                pose.anchor(&mut *host, channel, frame)?;
                anchor_frame = Some(frame);
            }
            Some(pose)
        }
        None => {
            if config.is_relative() {
                debug!("offset mode ignored for {}", config.target);
            }
            None
        }
    };
    let writer = TargetWriter::for_config(config, pose.as_ref());

    let mut keyframes = 0usize;
    for (row_idx, row) in table.data_rows().enumerate() {
        let Some(sample) = mapping.sample(row, column) else {
            trace!("row {} skipped", row_idx + 1);
            continue;
        };
        if let Dispatch::Missing(what) = writer.apply(&mut *host, sample.frame, sample.value)? {
            trace!("row {}: no {what} on '{object}'", row_idx + 1);
        }
        keyframes += 1;
    }

    info!(
        "generated {keyframes} keyframes from {} data rows (frame offset {})",
        table.data_row_count(),
        config.frame_offset
    );
    Ok(ImportSummary {
        keyframes,
        frame_offset: config.frame_offset,
        anchor_frame,
    })
}
