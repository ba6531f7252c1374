use ndarray::{Array, Array2};

use crate::d2::Grid;
use crate::error::{ensure_positive, Result};

/// Largest `D * dt / dx^2` for which the explicit 2-D scheme stays bounded.
pub const STABILITY_LIMIT: f64 = 0.25;

/// One forward-Euler step of `dq/dt = D * laplacian(q)` with `sigma2 = D * dt`.
///
/// Interior cells use the 5-point stencil. Border cells are copied unchanged.
/// All reads come from `q` and all writes go to the returned array.
pub fn diffuse(q: &Array2<f64>, sigma2: f64, dx: f64) -> Array2<f64> {
    let (h, w) = q.dim();
    let dx2 = dx * dx;

    Array::from_shape_fn(q.dim(), |(i, j)| {
        if i == 0 || j == 0 || i + 1 == h || j + 1 == w {
            return q[[i, j]];
        }

        let d2x = (q[[i + 1, j]] - 2.0 * q[[i, j]] + q[[i - 1, j]]) / dx2;
        let d2y = (q[[i, j + 1]] - 2.0 * q[[i, j]] + q[[i, j - 1]]) / dx2;

        q[[i, j]] + sigma2 * (d2x + d2y)
    })
}

/// Explicit finite-difference diffusion with a fixed coefficient and time step.
///
/// Stability is not checked here. With `D * dt / dx^2 > 1/4` the output grows
/// without bound over successive steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionStepper {
    coefficient: f64,
    dt: f64,
}

impl DiffusionStepper {
    pub fn new(coefficient: f64, dt: f64) -> Result<Self> {
        Ok(Self {
            coefficient: ensure_positive("diffusion coefficient", coefficient)?,
            dt: ensure_positive("time step", dt)?,
        })
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// `D * dt / dx^2`
    pub fn fourier_number(&self, dx: f64) -> f64 {
        self.coefficient * self.dt / (dx * dx)
    }

    pub fn is_stable_for(&self, dx: f64) -> bool {
        self.fourier_number(dx) <= STABILITY_LIMIT
    }

    pub fn step(&self, grid: &Grid) -> Grid {
        grid.with_values(diffuse(
            grid.values(),
            self.coefficient * self.dt,
            grid.spacing(),
        ))
    }
}
