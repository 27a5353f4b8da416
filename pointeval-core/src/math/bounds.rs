use nalgebra::{Point3, Scalar};

/// 3D axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AABB<T: Scalar + PartialOrd> {
    min: Point3<T>,
    max: Point3<T>,
}

impl<T: Scalar + PartialOrd + Copy> AABB<T> {
    /// Creates a new AABB from the given minimum and maximum coordinates. Returns `None` if the minimum position
    /// is not less than or equal to the maximum position on every axis
    /// ```
    /// # use pointeval_core::math::AABB;
    /// let bounds = AABB::from_min_max(nalgebra::Point3::new(0.0, 0.0, 0.0), nalgebra::Point3::new(1.0, 1.0, 1.0));
    /// assert!(bounds.is_some());
    /// let inverted = AABB::from_min_max(nalgebra::Point3::new(1.0, 0.0, 0.0), nalgebra::Point3::new(0.0, 1.0, 1.0));
    /// assert!(inverted.is_none());
    /// ```
    pub fn from_min_max(min: Point3<T>, max: Point3<T>) -> Option<Self> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return None;
        }
        Some(Self { min, max })
    }

    /// Creates a new AABB from the given minimum and maximum coordinates without checking that min <= max
    pub fn from_min_max_unchecked(min: Point3<T>, max: Point3<T>) -> Self {
        Self { min, max }
    }

    /// Returns the minimum point of this AABB
    pub fn min(&self) -> &Point3<T> {
        &self.min
    }

    /// Returns the maximum point of this AABB
    pub fn max(&self) -> &Point3<T> {
        &self.max
    }

    /// Extends the given AABB so that it contains the given point
    /// ```
    /// # use pointeval_core::math::AABB;
    /// let bounds = AABB::from_min_max_unchecked(nalgebra::Point3::new(0.0, 0.0, 0.0), nalgebra::Point3::new(1.0, 1.0, 1.0));
    /// let extended = AABB::extend_with_point(&bounds, &nalgebra::Point3::new(2.0, -1.0, 0.5));
    /// assert_eq!(*extended.min(), nalgebra::Point3::new(0.0, -1.0, 0.0));
    /// assert_eq!(*extended.max(), nalgebra::Point3::new(2.0, 1.0, 1.0));
    /// ```
    pub fn extend_with_point(bounds: &AABB<T>, point: &Point3<T>) -> AABB<T> {
        let pick_min = |a: T, b: T| if a < b { a } else { b };
        let pick_max = |a: T, b: T| if a > b { a } else { b };

        Self {
            min: Point3::new(
                pick_min(bounds.min.x, point.x),
                pick_min(bounds.min.y, point.y),
                pick_min(bounds.min.z, point.z),
            ),
            max: Point3::new(
                pick_max(bounds.max.x, point.x),
                pick_max(bounds.max.y, point.y),
                pick_max(bounds.max.z, point.z),
            ),
        }
    }
}
