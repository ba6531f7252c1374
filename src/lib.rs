//! Explicit finite-difference simulation of 2-D diffusion over a rectangular plate.
//!
//! A [`SimulationRunner`] repeatedly applies a [`DiffusionStepper`] to a [`Grid`],
//! re-stamps a [`HeaterMask`] after every step and collects the results into a
//! [`FrameBuffer`] for an external renderer.
//!
//! ```
//! use heatplate::{SimulationConfig, SimulationRunner};
//!
//! let config = SimulationConfig::default();
//! let runner = SimulationRunner::from_config(&config).unwrap();
//! let frames = runner.run(config.frame_count());
//!
//! assert_eq!(frames.frame_count(), 100);
//! assert_eq!(frames.frame_at(0).unwrap()[[20, 10]], 2000.0);
//! ```

pub mod config;
pub mod d2;
pub mod error;

pub use config::SimulationConfig;
pub use d2::{DiffusionStepper, FrameBuffer, Grid, HeaterMask, SimulationRunner, Steps};
pub use error::{Error, Result};
