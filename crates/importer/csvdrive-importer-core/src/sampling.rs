//! Row sampling: turn one data row into a (frame, value) pair.
//!
//! frame = time_sec * fps + frame_offset, value = raw * scale. Each row is independent;
//! fractional frames are passed through unrounded. Host properties are `f32`, so a row
//! whose value falls outside the `f32` range is skipped like an unparseable one.

/// One row that passed parsing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RowSample {
    pub time: f64,
    pub raw: f64,
    pub frame: f64,
    pub value: f64,
}

/// Frame/value math for a run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameMapping {
    pub fps: f64,
    pub frame_offset: i32,
    pub scale: f64,
}

impl FrameMapping {
    pub fn new(fps: f64, frame_offset: i32, scale: f64) -> Self {
        Self {
            fps,
            frame_offset,
            scale,
        }
    }

    #[inline]
    pub fn frame_for(&self, time_sec: f64) -> f64 {
        time_sec * self.fps + f64::from(self.frame_offset)
    }

    #[inline]
    pub fn value_for(&self, raw: f64) -> f64 {
        raw * self.scale
    }

    /// Sample `row`, reading the time from field 0 and the value from `column`.
    /// Returns `None` for rows that are too short, whose fields are not finite numbers,
    /// or whose frame or value overflows.
    pub fn sample(&self, row: &[String], column: usize) -> Option<RowSample> {
        if row.len() <= column {
            return None;
        }
        let time = parse_number(&row[0])?;
        let raw = parse_number(&row[column])?;
        let frame = self.frame_for(time);
        let value = self.value_for(raw);
        if !frame.is_finite() || !(value as f32).is_finite() {
            return None;
        }
        Some(RowSample {
            time,
            raw,
            frame,
            value,
        })
    }
}

fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
