use std::ops::Index;

use ndarray::{Array, Array2, ArrayViewMut2};

use crate::error::{ensure_positive, Error, Result};

/// A dense scalar field on a uniformly spaced rectangular plate.
///
/// Values are stored with shape `(height, width)` and indexed `[[row, col]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    values: Array2<f64>,
    spacing: f64,
}

impl Grid {
    /// A zero-filled grid of `width` columns and `height` rows.
    pub fn zeros(width: usize, height: usize, spacing: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Self {
            values: Array::zeros((height, width)),
            spacing: ensure_positive("spacing", spacing)?,
        })
    }

    pub fn from_values(values: Array2<f64>, spacing: f64) -> Result<Self> {
        let (height, width) = values.dim();
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Self {
            values,
            spacing: ensure_positive("spacing", spacing)?,
        })
    }

    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Mutable access to the cells. The shape cannot change through the view.
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.values.view_mut()
    }

    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get([row, col]).copied()
    }

    pub fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 == self.height() || col + 1 == self.width()
    }

    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0f64, |a, &b| a.max(b.abs()))
    }

    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    pub(crate) fn with_values(&self, values: Array2<f64>) -> Self {
        assert_eq!(values.dim(), self.values.dim());

        Self {
            values,
            spacing: self.spacing,
        }
    }
}

impl Index<[usize; 2]> for Grid {
    type Output = f64;

    fn index(&self, index: [usize; 2]) -> &f64 {
        &self.values[index]
    }
}
