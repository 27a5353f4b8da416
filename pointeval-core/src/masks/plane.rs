use nalgebra::{Point3, Vector4};

/// A plane in homogeneous coordinates `(a, b, c, d)`. A point `p` lies on the positive side of the plane if
/// `a * p.x + b * p.y + c * p.z + d > 0`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundTruthPlane {
    coefficients: Vector4<f64>,
}

impl GroundTruthPlane {
    pub fn new(coefficients: Vector4<f64>) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &Vector4<f64> {
        &self.coefficients
    }

    /// Signed inner product of the plane with the homogeneous point `[x, y, z, 1]`
    pub fn evaluate(&self, point: &Point3<f64>) -> f64 {
        self.coefficients.dot(&point.to_homogeneous())
    }

    /// Returns `true` if `point` is strictly on the positive side. Points exactly on the plane are not
    pub fn is_above(&self, point: &Point3<f64>) -> bool {
        self.evaluate(point) > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_side_is_strict() {
        // z = 1 plane, positive side above
        let plane = GroundTruthPlane::new(Vector4::new(0.0, 0.0, 1.0, -1.0));
        assert!(plane.is_above(&Point3::new(5.0, -3.0, 1.5)));
        assert!(!plane.is_above(&Point3::new(0.0, 0.0, 1.0)));
        assert!(!plane.is_above(&Point3::new(0.0, 0.0, 0.0)));
        assert_eq!(0.5, plane.evaluate(&Point3::new(0.0, 0.0, 1.5)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_plane_serializes_as_coefficients() {
        let plane = GroundTruthPlane::new(Vector4::new(1.0, 2.0, 3.0, 4.0));
        let json = serde_json::to_string(&plane).unwrap();
        let parsed: GroundTruthPlane = serde_json::from_str(&json).unwrap();
        assert_eq!(plane, parsed);
    }
}
