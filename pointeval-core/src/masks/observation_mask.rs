use nalgebra::{Point3, Vector3};

use crate::{math::round_half_up, EvalError, EvalResult};

/// A dense 3D boolean grid marking which cells of space were observed while capturing the ground truth. The grid
/// starts at `min_bound` and has cubic cells of edge length `resolution`. Cell values are stored in row-major order,
/// i.e. the cell `(x, y, z)` lives at offset `(x * dims.y + y) * dims.z + z`
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationMask {
    dims: [usize; 3],
    cells: Vec<bool>,
    min_bound: Point3<f64>,
    resolution: f64,
}

impl ObservationMask {
    /// Creates a new `ObservationMask` from row-major `cells`
    ///
    /// # Errors
    ///
    /// If `cells.len()` is not the product of `dims`, or if `resolution` is not a positive finite number
    pub fn new(
        dims: [usize; 3],
        cells: Vec<bool>,
        min_bound: Point3<f64>,
        resolution: f64,
    ) -> EvalResult<Self> {
        let expected_len = dims[0] * dims[1] * dims[2];
        if cells.len() != expected_len {
            return Err(EvalError::InvalidParameter(format!(
                "Observation mask of size {}x{}x{} needs {} cells but got {}",
                dims[0],
                dims[1],
                dims[2],
                expected_len,
                cells.len()
            )));
        }
        if !(resolution > 0.0 && resolution.is_finite()) {
            return Err(EvalError::InvalidParameter(format!(
                "Observation mask resolution must be positive but is {}",
                resolution
            )));
        }
        Ok(Self {
            dims,
            cells,
            min_bound,
            resolution,
        })
    }

    /// Creates a new `ObservationMask` from cells stored in column-major order (first axis varies fastest), which
    /// is the storage order of MATLAB matrices. The cells are reordered into row-major order
    pub fn from_column_major(
        dims: [usize; 3],
        column_major_cells: &[bool],
        min_bound: Point3<f64>,
        resolution: f64,
    ) -> EvalResult<Self> {
        let [nx, ny, nz] = dims;
        if column_major_cells.len() != nx * ny * nz {
            return Self::new(dims, column_major_cells.to_vec(), min_bound, resolution);
        }
        let mut cells = vec![false; column_major_cells.len()];
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    cells[(x * ny + y) * nz + z] = column_major_cells[x + nx * (y + ny * z)];
                }
            }
        }
        Self::new(dims, cells, min_bound, resolution)
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn min_bound(&self) -> &Point3<f64> {
        &self.min_bound
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Number of cells that are marked as observed
    pub fn observed_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Returns the (possibly out-of-bounds) grid index of the cell that `position` falls into. Each coordinate is
    /// `round_half_up((position - min_bound) / resolution)`
    pub fn grid_index(&self, position: &Point3<f64>) -> Vector3<i64> {
        let relative = (*position - self.min_bound) / self.resolution;
        relative.map(|coord| round_half_up(coord) as i64)
    }

    /// Flattens an in-bounds grid index into a row-major offset. Returns `None` if any component of `index` is
    /// outside of the grid
    pub fn linear_index(&self, index: &Vector3<i64>) -> Option<usize> {
        let mut components = [0_usize; 3];
        for axis in 0..3 {
            let value = index[axis];
            if value < 0 || value as u64 >= self.dims[axis] as u64 {
                return None;
            }
            components[axis] = value as usize;
        }
        let [x, y, z] = components;
        Some((x * self.dims[1] + y) * self.dims[2] + z)
    }

    /// Returns the value of the cell at the given grid index, or `None` if the index is outside of the grid
    pub fn cell(&self, index: &Vector3<i64>) -> Option<bool> {
        self.linear_index(index).map(|offset| self.cells[offset])
    }

    /// Returns `true` if `position` falls into an observed cell. Positions outside of the grid and positions with
    /// non-finite coordinates are never observed
    pub fn is_observed(&self, position: &Point3<f64>) -> bool {
        if !position.iter().all(|coord| coord.is_finite()) {
            return false;
        }
        self.cell(&self.grid_index(position)).unwrap_or(false)
    }
}
