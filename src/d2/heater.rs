use cgmath::{point2, Point2};
use ndarray::{s, Array, Array2, Zip};

use crate::d2::Grid;
use crate::error::{Error, Result};

/// A square pattern of fixed source values stamped onto the grid at a set of offsets.
///
/// Placements are `(x, y) = (row, col)` offsets of the block's top-left cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaterMask {
    source: Array2<f64>,
    placements: Vec<Point2<usize>>,
}

impl HeaterMask {
    pub fn new(source: Array2<f64>, placements: Vec<Point2<usize>>) -> Result<Self> {
        let (rows, cols) = source.dim();

        if rows == 0 || rows != cols {
            return Err(Error::InvalidMask {
                reason: format!("source must be a non-empty square, got {}x{}", rows, cols),
            });
        }

        if let Some(v) = source.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(Error::InvalidMask {
                reason: format!("source values must be finite and non-negative, got {}", v),
            });
        }

        Ok(Self { source, placements })
    }

    /// An X-shaped mask: `magnitude` on both diagonals of a `side`×`side` block, zero elsewhere.
    pub fn x_shaped(side: usize, magnitude: f64, placements: &[(usize, usize)]) -> Result<Self> {
        let source = Array::from_shape_fn((side, side), |(i, j)| {
            if i == j || i + j + 1 == side {
                magnitude
            } else {
                0.0
            }
        });

        Self::new(
            source,
            placements.iter().map(|&(r, c)| point2(r, c)).collect(),
        )
    }

    pub fn side(&self) -> usize {
        self.source.nrows()
    }

    pub fn source(&self) -> &Array2<f64> {
        &self.source
    }

    pub fn placements(&self) -> &[Point2<usize>] {
        &self.placements
    }

    /// Checks that every placement lies inside a `width`×`height` grid.
    pub fn check_fits(&self, width: usize, height: usize) -> Result<()> {
        let side = self.side();

        match self
            .placements
            .iter()
            .find(|p| p.x + side > height || p.y + side > width)
        {
            Some(p) => Err(Error::PlacementOutOfBounds {
                row: p.x,
                col: p.y,
                side,
                width,
                height,
            }),
            None => Ok(()),
        }
    }

    /// Overwrites grid cells with every strictly positive source value.
    /// Cells under a zero source value are left as they are.
    ///
    /// # Panics
    ///
    /// If a placement does not fit the grid. See [`HeaterMask::check_fits`].
    pub fn stamp(&self, grid: &mut Grid) {
        let side = self.side();
        let mut values = grid.view_mut();

        for p in &self.placements {
            assert!(p.x + side <= values.nrows() && p.y + side <= values.ncols());

            Zip::from(values.slice_mut(s![p.x..p.x + side, p.y..p.y + side]))
                .and(&self.source)
                .for_each(|g, &src| {
                    if src > 0.0 {
                        *g = src;
                    }
                });
        }
    }
}
