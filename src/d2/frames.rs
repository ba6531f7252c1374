use std::slice;
use std::time::Duration;

use crate::d2::Grid;
use crate::error::{Error, Result};

/// Snapshots of a finished simulation, one per time step, for playback.
///
/// `frame_interval` is display metadata for the renderer and takes no part in
/// the computation.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    frames: Vec<Grid>,
    time_step: f64,
    frame_interval: Duration,
}

impl FrameBuffer {
    pub fn new(frames: Vec<Grid>, time_step: f64, frame_interval: Duration) -> Self {
        Self {
            frames,
            time_step,
            frame_interval,
        }
    }

    pub fn frame_at(&self, index: usize) -> Result<&Grid> {
        self.frames.get(index).ok_or(Error::FrameOutOfRange {
            index,
            len: self.frames.len(),
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Simulated time shown for frame `index`.
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.time_step
    }

    pub fn label(&self, index: usize) -> String {
        format!("Time: {:.2} seconds", self.time_at(index))
    }

    /// The fixed `(min, max)` colour range for playback, taken from the first frame.
    pub fn color_scale(&self) -> Option<(f64, f64)> {
        self.frames.first().map(Grid::min_max)
    }

    pub fn iter(&self) -> slice::Iter<'_, Grid> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<Grid> {
        self.frames
    }
}

impl<'a> IntoIterator for &'a FrameBuffer {
    type Item = &'a Grid;
    type IntoIter = slice::Iter<'a, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
