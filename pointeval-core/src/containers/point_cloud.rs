use std::ops::Add;

use nalgebra::{Point3, Vector3};

use crate::{math::AABB, EvalError, EvalResult};

/// An ordered set of 3D points with optional per-point RGB colors. Colors are stored as `f64` triples in `[0;1]`
///
/// Either every point has a color or none has one, which is why colors are stored as an `Option<Vec<_>>` that is
/// always as long as the positions when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    positions: Vec<Point3<f64>>,
    colors: Option<Vec<Vector3<f64>>>,
}

impl PointCloud {
    /// Creates a new, empty `PointCloud` without colors
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a `PointCloud` from the given positions, without colors
    pub fn from_positions(positions: Vec<Point3<f64>>) -> Self {
        Self {
            positions,
            colors: None,
        }
    }

    /// Creates a colored `PointCloud`. Fails if `positions` and `colors` have different lengths
    pub fn from_positions_and_colors(
        positions: Vec<Point3<f64>>,
        colors: Vec<Vector3<f64>>,
    ) -> EvalResult<Self> {
        if positions.len() != colors.len() {
            return Err(EvalError::InvalidParameter(format!(
                "Got {} positions but {} colors",
                positions.len(),
                colors.len()
            )));
        }
        Ok(Self {
            positions,
            colors: Some(colors),
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Returns the per-point colors, or `None` if this cloud is uncolored
    pub fn colors(&self) -> Option<&[Vector3<f64>]> {
        self.colors.as_deref()
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Returns the axis-aligned bounding box of all positions, or `None` for an empty cloud
    pub fn bounds(&self) -> Option<AABB<f64>> {
        let (first, rest) = self.positions.split_first()?;
        Some(rest.iter().fold(
            AABB::from_min_max_unchecked(*first, *first),
            |bounds, position| AABB::extend_with_point(&bounds, position),
        ))
    }

    /// Assigns one color per point, replacing any existing colors
    pub fn set_colors(&mut self, colors: Vec<Vector3<f64>>) -> EvalResult<()> {
        if colors.len() != self.positions.len() {
            return Err(EvalError::InvalidParameter(format!(
                "Cloud has {} points but {} colors were given",
                self.positions.len(),
                colors.len()
            )));
        }
        self.colors = Some(colors);
        Ok(())
    }

    /// Assigns the same color to all points
    pub fn paint_uniform_color(&mut self, color: Vector3<f64>) {
        self.colors = Some(vec![color; self.positions.len()]);
    }

    /// Returns a new cloud with all points for which `selection` is `true` (or `false`, if `invert` is set), in
    /// their original order. `selection` must have one entry per point
    ///
    /// # Panics
    ///
    /// If `selection.len()` does not match the number of points
    pub fn select_by_mask(&self, selection: &[bool], invert: bool) -> PointCloud {
        assert_eq!(
            selection.len(),
            self.positions.len(),
            "Selection mask must have one entry per point"
        );
        let keep = |idx: usize| selection[idx] != invert;

        let positions = self
            .positions
            .iter()
            .enumerate()
            .filter(|(idx, _)| keep(*idx))
            .map(|(_, position)| *position)
            .collect();
        let colors = self.colors.as_ref().map(|colors| {
            colors
                .iter()
                .enumerate()
                .filter(|(idx, _)| keep(*idx))
                .map(|(_, color)| *color)
                .collect()
        });
        PointCloud { positions, colors }
    }

    /// Appends all points of `other` to this cloud. If only one of the two clouds is colored, the uncolored points
    /// are colored black so that the colors stay aligned with the positions
    pub fn append(&mut self, other: &PointCloud) {
        let own_len = self.positions.len();
        self.positions.extend_from_slice(&other.positions);
        match (&mut self.colors, &other.colors) {
            (None, None) => {}
            (Some(own), Some(theirs)) => own.extend_from_slice(theirs),
            (Some(own), None) => own.resize(self.positions.len(), Vector3::zeros()),
            (None, Some(theirs)) => {
                let mut colors = vec![Vector3::zeros(); own_len];
                colors.extend_from_slice(theirs);
                self.colors = Some(colors);
            }
        }
    }
}

impl Add for PointCloud {
    type Output = PointCloud;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.append(&rhs);
        self
    }
}

impl FromIterator<Point3<f64>> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self::from_positions(iter.into_iter().collect())
    }
}
