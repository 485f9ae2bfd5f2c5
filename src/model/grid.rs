//! model/grid.rs: evenly spaced axes and the 2D coordinate grid built from them.
//!
//! Layout follows numpy's default `meshgrid(x, y)`: rows walk the y axis,
//! columns walk the x axis, so every grid has shape `(ny, nx)`.

use ndarray::{Array1, Array2, Zip};

/// `n` evenly spaced samples over `[start, stop]`, both ends included.
///
/// The last sample is pinned to `stop` so boundary values (e.g. delta = 1)
/// are hit exactly.
pub fn linspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
    let mut xs = Array1::linspace(start, stop, n);
    if n > 1 {
        xs[n - 1] = stop;
    }
    xs
}

/// Pair of coordinate grids plus the axes they came from.
#[derive(Clone, Debug)]
pub struct MeshGrid {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    /// x value of every cell, `[ny, nx]`.
    pub xx: Array2<f64>,
    /// y value of every cell, `[ny, nx]`.
    pub yy: Array2<f64>,
}

impl MeshGrid {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Self {
        let (nx, ny) = (x.len(), y.len());
        let xx = Array2::from_shape_fn((ny, nx), |(_, i)| x[i]);
        let yy = Array2::from_shape_fn((ny, nx), |(j, _)| y[j]);
        Self { x, y, xx, yy }
    }

    /// `(rows, cols)` = `(ny, nx)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.xx.dim()
    }

    #[inline]
    pub fn x_bounds(&self) -> (f64, f64) {
        axis_bounds(&self.x)
    }

    #[inline]
    pub fn y_bounds(&self) -> (f64, f64) {
        axis_bounds(&self.y)
    }

    /// Evaluate `f(x, y)` at every cell.
    pub fn map<F>(&self, f: F) -> Array2<f64>
    where
        F: Fn(f64, f64) -> f64,
    {
        Zip::from(&self.xx)
            .and(&self.yy)
            .map_collect(|&x, &y| f(x, y))
    }
}

fn axis_bounds(axis: &Array1<f64>) -> (f64, f64) {
    let lo = axis.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = axis.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let xs = linspace(0.0, 1.0, 25);
        assert_eq!(xs.len(), 25);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[24], 1.0);
        assert!(xs.to_vec().windows(2).all(|w| w[1] > w[0]));

        let qs = linspace(0.1, 10.0, 100);
        assert_eq!(qs[0], 0.1);
        assert_eq!(qs[99], 10.0);
        let gammas = linspace(0.01, 0.35, 100);
        assert_eq!(gammas[99], 0.35);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert_eq!(linspace(3.0, 7.0, 0).len(), 0);
        let one = linspace(3.0, 7.0, 1);
        assert_eq!(one.len(), 1);
        assert_eq!(one[0], 3.0);
    }

    #[test]
    fn linspace_step_is_uniform() {
        let xs = linspace(1.0, 20.0, 25);
        let step = 19.0 / 24.0;
        for (i, &x) in xs.iter().enumerate() {
            assert!((x - (1.0 + step * i as f64)).abs() < 1e-12, "x[{i}]={x}");
        }
    }

    #[test]
    fn meshgrid_rows_follow_y_cols_follow_x() {
        let grid = MeshGrid::new(linspace(0.0, 2.0, 3), linspace(10.0, 11.0, 2));
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.xx.row(0).to_vec(), vec![0.0, 1.0, 2.0]);
        assert_eq!(grid.xx.row(1).to_vec(), vec![0.0, 1.0, 2.0]);
        assert_eq!(grid.yy.column(0).to_vec(), vec![10.0, 11.0]);
        assert_eq!(grid.yy.column(2).to_vec(), vec![10.0, 11.0]);
    }

    #[test]
    fn map_is_cellwise() {
        let grid = MeshGrid::new(linspace(1.0, 4.0, 4), linspace(0.0, 1.0, 5));
        let z = grid.map(|x, y| x * 10.0 + y);
        assert_eq!(z.dim(), grid.shape());
        for ((j, i), &v) in z.indexed_iter() {
            assert_eq!(v, grid.x[i] * 10.0 + grid.y[j]);
        }
    }

    #[test]
    fn bounds_follow_axes() {
        let grid = MeshGrid::new(linspace(0.1, 10.0, 100), linspace(0.01, 0.35, 100));
        assert_eq!(grid.x_bounds(), (0.1, 10.0));
        assert_eq!(grid.y_bounds(), (0.01, 0.35));
    }
}
