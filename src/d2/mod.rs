//! Two-dimensional plate simulation.

mod frames;
mod grid;
mod heater;
mod runner;
mod stepper;

pub use frames::FrameBuffer;
pub use grid::Grid;
pub use heater::HeaterMask;
pub use runner::{SimulationRunner, Steps};
pub use stepper::{diffuse, DiffusionStepper, STABILITY_LIMIT};
