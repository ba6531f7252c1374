use std::time::Duration;

use log::{debug, trace, warn};

use crate::config::SimulationConfig;
use crate::d2::{DiffusionStepper, FrameBuffer, Grid, HeaterMask, STABILITY_LIMIT};
use crate::error::Result;

const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Drives a [`DiffusionStepper`] over a grid, re-stamping the heaters after every step.
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    initial: Grid,
    heater: HeaterMask,
    stepper: DiffusionStepper,
    frame_interval: Duration,
}

impl SimulationRunner {
    /// `initial` is used as given; stamp the heaters onto it first if they should
    /// be present before the first step.
    pub fn new(initial: Grid, heater: HeaterMask, stepper: DiffusionStepper) -> Result<Self> {
        heater.check_fits(initial.width(), initial.height())?;

        let fourier = stepper.fourier_number(initial.spacing());
        if fourier > STABILITY_LIMIT {
            warn!(
                "D*dt/dx^2 = {} exceeds {}, the explicit scheme will diverge",
                fourier, STABILITY_LIMIT
            );
        }

        debug!(
            "runner ready: {}x{} grid, {} heater block(s) of side {}, D*dt/dx^2 = {}",
            initial.width(),
            initial.height(),
            heater.placements().len(),
            heater.side(),
            fourier
        );

        Ok(Self {
            initial,
            heater,
            stepper,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        })
    }

    /// Builds a zero-filled plate with the configured heaters already stamped.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        let heater = config.heater_mask()?;
        let mut initial = Grid::zeros(config.grid_width, config.grid_height, config.spacing)?;
        heater.stamp(&mut initial);

        let stepper = DiffusionStepper::new(config.diffusion_coefficient, config.time_step)?;

        Ok(Self::new(initial, heater, stepper)?.with_frame_interval(config.frame_interval()))
    }

    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn heater(&self) -> &HeaterMask {
        &self.heater
    }

    pub fn stepper(&self) -> &DiffusionStepper {
        &self.stepper
    }

    /// Unbounded iterator over the state after each step and re-stamp.
    pub fn steps(&self) -> Steps<'_> {
        Steps {
            runner: self,
            current: self.initial.clone(),
            index: 0,
        }
    }

    /// Runs `frame_count` steps. Frame `k` holds the state after `k + 1` steps.
    pub fn run(&self, frame_count: usize) -> FrameBuffer {
        debug!("simulating {} frame(s)", frame_count);

        let frames: Vec<Grid> = self.steps().take(frame_count).collect();

        debug!(
            "simulation finished, peak |value| {}",
            frames.last().map_or(0.0, Grid::max_abs)
        );

        FrameBuffer::new(frames, self.stepper.dt(), self.frame_interval)
    }
}

/// Lazily advances a simulation one step at a time.
///
/// Only the current state is retained, so playback that does not need to seek
/// backwards can consume this directly instead of a [`FrameBuffer`].
#[derive(Debug)]
pub struct Steps<'a> {
    runner: &'a SimulationRunner,
    current: Grid,
    index: usize,
}

impl Iterator for Steps<'_> {
    type Item = Grid;

    fn next(&mut self) -> Option<Grid> {
        let mut next = self.runner.stepper.step(&self.current);
        self.runner.heater.stamp(&mut next);

        trace!("step {} done", self.index);
        self.index += 1;

        self.current = next.clone();
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array;

    fn scenario() -> SimulationRunner {
        SimulationRunner::from_config(&SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_from_config() {
        let runner = scenario();

        assert_eq!(runner.initial()[[20, 10]], 2000.0);
        assert_eq!(runner.initial()[[20, 19]], 2000.0);
        assert_eq!(runner.initial()[[20, 11]], 0.0);
        assert_eq!(runner.initial()[[0, 0]], 0.0);
        assert_eq!(runner.stepper().dt(), 0.1);
    }

    #[test]
    fn test_from_invalid_config() {
        let config = SimulationConfig {
            heater_placements: vec![(45, 10)],
            ..Default::default()
        };

        assert!(SimulationRunner::from_config(&config)
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn test_new_rejects_misplaced_heater() {
        let grid = Grid::zeros(8, 8, 1.0).unwrap();
        let heater = HeaterMask::x_shaped(4, 1.0, &[(5, 0)]).unwrap();
        let stepper = DiffusionStepper::new(0.1, 1.0).unwrap();

        assert!(SimulationRunner::new(grid, heater, stepper).is_err());
    }

    #[test]
    fn test_concrete_scenario() {
        let config = SimulationConfig::default();
        let frames = scenario().run(config.frame_count());

        assert_eq!(frames.frame_count(), 100);
        assert_eq!(frames.frame_interval(), Duration::from_millis(50));

        let first = frames.frame_at(0).unwrap();
        assert_eq!(first[[20, 10]], 2000.0);
        assert_eq!(first[[29, 19]], 2000.0);
        assert_eq!(first[[20, 19]], 2000.0);
        assert_eq!(first[[29, 10]], 2000.0);
        assert_eq!(first[[20, 30]], 2000.0);
        assert_eq!(first[[29, 39]], 2000.0);

        for frame in &frames {
            assert_eq!(frame[[0, 0]], 0.0);
            assert_eq!(frame[[24, 14]], 2000.0);
        }

        // Heat spreads off the X onto the zero cells of the mask.
        let last = frames.frame_at(99).unwrap();
        assert!(last[[20, 11]] > 0.0);
        assert!(last[[20, 11]] < 2000.0);
        assert!(last.max_abs() <= 2000.0);
    }

    #[test]
    fn test_first_frame_is_one_step() {
        let runner = scenario();
        let frames = runner.run(2);

        let mut expected = runner.stepper().step(runner.initial());
        runner.heater().stamp(&mut expected);
        assert_eq!(frames.frame_at(0).unwrap(), &expected);

        let mut expected = runner.stepper().step(&expected);
        runner.heater().stamp(&mut expected);
        assert_eq!(frames.frame_at(1).unwrap(), &expected);
    }

    #[test]
    fn test_zero_frames() {
        let frames = scenario().run(0);

        assert!(frames.is_empty());
        assert!(frames.frame_at(0).is_err());
    }

    #[test]
    fn test_determinism() {
        let runner = scenario();

        assert_eq!(runner.run(30), runner.run(30));
        assert_eq!(scenario().run(30), runner.run(30));
    }

    #[test]
    fn test_steps_matches_run() {
        let runner = scenario();
        let frames = runner.run(5);

        for (k, grid) in runner.steps().take(5).enumerate() {
            assert_eq!(frames.frame_at(k).unwrap(), &grid);
        }
    }

    #[test]
    fn test_border_invariance() {
        let frames = scenario().run(20);

        for frame in &frames {
            for ((row, col), &v) in frame.values().indexed_iter() {
                if frame.is_border(row, col) {
                    assert_eq!(v, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_symmetry_without_heaters() {
        const N: usize = 11;

        let values = Array::from_shape_fn((N, N), |(i, j)| {
            let di = i as f64 - 5.0;
            let dj = j as f64 - 5.0;
            100.0 * (-(di * di + dj * dj) / 4.0).exp()
        });
        let initial = Grid::from_values(values, 0.1).unwrap();
        let heater = HeaterMask::x_shaped(3, 0.0, &[(4, 4)]).unwrap();
        let stepper = DiffusionStepper::new(0.01, 0.1).unwrap();

        let runner = SimulationRunner::new(initial, heater, stepper).unwrap();
        let frames = runner.run(25);
        let last = frames.frame_at(24).unwrap();

        for i in 0..N {
            for j in 0..N {
                let v = last[[i, j]];
                assert_eq!(v, last[[j, i]]);
                assert_abs_diff_eq!(v, last[[N - 1 - i, j]], epsilon = 1e-9);
                assert_abs_diff_eq!(v, last[[i, N - 1 - j]], epsilon = 1e-9);
                assert_abs_diff_eq!(v, last[[N - 1 - i, N - 1 - j]], epsilon = 1e-9);
            }
        }

        // The peak has spread out.
        assert!(last[[5, 5]] < 100.0);
        assert!(last[[5, 6]] > 0.0);
    }

    #[test]
    fn test_unstable_parameters_diverge() {
        const N: usize = 9;

        let mut initial = Grid::zeros(N, N, 1.0).unwrap();
        initial.view_mut()[[4, 4]] = 1.0;
        let heater = HeaterMask::x_shaped(1, 0.0, &[]).unwrap();
        let stepper = DiffusionStepper::new(0.5, 1.0).unwrap();
        assert!(!stepper.is_stable_for(1.0));

        let runner = SimulationRunner::new(initial, heater, stepper).unwrap();
        let frames = runner.run(30);

        let peaks: Vec<f64> = frames.iter().map(Grid::max_abs).collect();
        assert!(peaks[29] > 1e6, "peak {}", peaks[29]);
        assert!(peaks[29] > peaks[19]);
        assert!(peaks[19] > peaks[9]);
    }
}
