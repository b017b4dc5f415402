use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use csvdrive_importer_core::{ColorGradient, ImportConfig, OffsetMode, TargetKind};
use log::warn;

/// Turn one CSV column into keyframes on the selected object of a scene description
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV file (column 0 = time in seconds); `//` prefix is relative to the project dir
    #[arg(value_name = "FILE")]
    pub file_path: Option<String>,

    /// Scene description (JSON) holding the selected object
    #[arg(short = 's', long = "scene", value_name = "SCENE")]
    pub scene: PathBuf,

    /// Run configuration (JSON); flags below override its fields
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Target property (LIGHT_ENERGY, LIGHT_COLOR, LIGHT_COLOR_GRADIENT, MAT_COLOR,
    /// MAT_COLOR_GRADIENT, LOC_X/Y/Z, ROT_X/Y/Z, UV_X/Y)
    #[arg(short = 't', long = "target", value_name = "KIND")]
    pub target: Option<TargetKind>,

    /// Column holding the driven value (1 = first column after time)
    #[arg(long = "column", value_name = "N")]
    pub column: Option<NonZeroUsize>,

    /// Multiplier applied to every value
    #[arg(long = "scale", value_name = "X", allow_negative_numbers = true)]
    pub scale: Option<f64>,

    /// Whole frames added to every keyframe (negative shifts earlier)
    #[arg(long = "offset", value_name = "FRAMES", allow_negative_numbers = true)]
    pub frame_offset: Option<i32>,

    /// Add position/rotation values to the object's initial pose
    #[arg(long = "relative")]
    pub relative: bool,

    /// Gradient start color
    #[arg(long = "gradient-start", value_name = "R,G,B", value_parser = parse_rgb)]
    pub gradient_start: Option<[f32; 3]>,

    /// Gradient end color
    #[arg(long = "gradient-end", value_name = "R,G,B", value_parser = parse_rgb)]
    pub gradient_end: Option<[f32; 3]>,

    /// Base directory for `//` paths (default: the scene file's directory)
    #[arg(long = "project-dir", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Write recorded keyframes as JSON (`-` for stdout)
    #[arg(short = 'o', long = "keyframes-out", value_name = "PATH")]
    pub keyframes_out: Option<PathBuf>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Base config (from `--config` or defaults) with command-line overrides applied.
    pub fn import_config(&self) -> Result<ImportConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse config {}", path.display()))?
            }
            None => ImportConfig::default(),
        };
        self.apply_overrides(&mut config);
        if self.gradient_ignored(&config) {
            warn!("gradient colors are ignored for {}", config.target);
        }
        Ok(config)
    }

    /// Gradient flags were given but the target does not read a gradient.
    fn gradient_ignored(&self, config: &ImportConfig) -> bool {
        (self.gradient_start.is_some() || self.gradient_end.is_some())
            && !config.target.uses_gradient()
    }

    fn apply_overrides(&self, config: &mut ImportConfig) {
        if let Some(file_path) = &self.file_path {
            config.file_path = file_path.clone();
        }
        if let Some(target) = self.target {
            config.target = target;
        }
        if let Some(column) = self.column {
            config.column = column;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(frame_offset) = self.frame_offset {
            config.frame_offset = frame_offset;
        }
        if self.relative {
            config.offset_mode = OffsetMode::Relative;
        }
        if self.gradient_start.is_some() || self.gradient_end.is_some() {
            let base = config.effective_gradient();
            config.gradient = Some(ColorGradient::new(
                self.gradient_start.unwrap_or(base.start),
                self.gradient_end.unwrap_or(base.end),
            ));
        }
    }

    /// Project directory for `//` paths.
    pub fn project_dir(&self) -> Option<PathBuf> {
        self.project_dir.clone().or_else(|| {
            self.scene
                .parent()
                .map(Path::to_path_buf)
                .filter(|dir| !dir.as_os_str().is_empty())
                .or_else(|| Some(PathBuf::from(".")))
        })
    }
}

fn parse_rgb(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(format!("expected R,G,B, got '{s}'"));
    };
    let channel = |c: &str| {
        c.parse::<f32>()
            .map_err(|e| format!("invalid channel '{c}': {e}"))
    };
    Ok([channel(r)?, channel(g)?, channel(b)?])
}
