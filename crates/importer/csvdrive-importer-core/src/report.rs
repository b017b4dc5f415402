//! One terminal message per run, for the invoking surface.

use serde::Serialize;

use crate::error::ImportError;
use crate::importer::ImportSummary;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportLevel {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub level: ReportLevel,
    pub message: String,
}

impl Report {
    pub fn from_outcome(outcome: &Result<ImportSummary, ImportError>) -> Self {
        match outcome {
            Ok(summary) => Self {
                level: ReportLevel::Info,
                message: format!(
                    "Generated {} keyframes (frame offset {})",
                    summary.keyframes, summary.frame_offset
                ),
            },
            Err(err) => Self {
                level: ReportLevel::Error,
                message: error_message(err),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == ReportLevel::Error
    }
}

fn error_message(err: &ImportError) -> String {
    match err {
        ImportError::NoTarget => "Select an object first".to_string(),
        ImportError::FileNotFound { .. } => {
            format!("{err}; check the path")
        }
        _ => err.to_string(),
    }
}
