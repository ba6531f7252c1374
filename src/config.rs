use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::d2::HeaterMask;
use crate::error::{ensure_positive, Error, Result};

/// Parameters of a heated plate simulation.
///
/// Missing fields take their [`Default`] values when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub spacing: f64,
    pub time_step: f64,
    pub diffusion_coefficient: f64,
    pub total_time: f64,
    pub heater_magnitude: f64,
    pub heater_side: usize,
    /// `(row, col)` of each heater block's top-left cell.
    pub heater_placements: Vec<(usize, usize)>,
    pub frame_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_width: 50,
            grid_height: 50,
            spacing: 0.1,
            time_step: 0.1,
            diffusion_coefficient: 0.01,
            total_time: 10.0,
            heater_magnitude: 2000.0,
            heater_side: 10,
            heater_placements: vec![(20, 10), (20, 30)],
            frame_interval_ms: 50,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        ensure_positive("spacing", self.spacing)?;
        ensure_positive("time step", self.time_step)?;
        ensure_positive("diffusion coefficient", self.diffusion_coefficient)?;
        ensure_positive("total time", self.total_time)?;
        ensure_positive("heater magnitude", self.heater_magnitude)?;

        self.heater_mask()?
            .check_fits(self.grid_width, self.grid_height)
    }

    pub fn heater_mask(&self) -> Result<HeaterMask> {
        HeaterMask::x_shaped(
            self.heater_side,
            self.heater_magnitude,
            &self.heater_placements,
        )
    }

    /// Number of simulated steps, `ceil(total_time / time_step)`.
    pub fn frame_count(&self) -> usize {
        (self.total_time / self.time_step).ceil().max(0.0) as usize
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
