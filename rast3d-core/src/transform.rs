/// Row-vector transforms and per-axis rotation state
///
/// Points are treated as row vectors multiplied on the left, `p' = p * M`,
/// so translation lives in row 3 and the perspective term in column 3.
use nalgebra::{Matrix4, Point3, RowVector4};

/// Transform a point by a 4x4 matrix with an implicit `w = 1`.
///
/// The result is divided by the homogeneous w when it is nonzero. When w is
/// exactly zero the divide is skipped and x/y/z come back unnormalized.
pub fn transform_point(p: &Point3<f64>, m: &Matrix4<f64>) -> Point3<f64> {
    let h = RowVector4::new(p.x, p.y, p.z, 1.0) * m;
    let w = h[3];

    if w != 0.0 {
        Point3::new(h[0] / w, h[1] / w, h[2] / w)
    } else {
        Point3::new(h[0], h[1], h[2])
    }
}

/// Builders for the per-axis rotation matrices (left-handed, row-vector)
pub struct Transform;

impl Transform {
    /// Rotation in the Y/Z plane
    #[rustfmt::skip]
    pub fn rotation_x(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation in the X/Z plane
    #[rustfmt::skip]
    pub fn rotation_y(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            c, 0.0, -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation in the X/Y plane
    #[rustfmt::skip]
    pub fn rotation_z(angle: f64) -> Matrix4<f64> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            c, s, 0.0, 0.0,
            -s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

/// Absolute rotation angles (radians) and the matrices built from them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    matrices: [Matrix4<f64>; 3],
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            matrices: [
                Transform::rotation_x(x),
                Transform::rotation_y(y),
                Transform::rotation_z(z),
            ],
        }
    }

    /// No rotation; all three matrices are the identity
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            matrices: [Matrix4::identity(); 3],
        }
    }

    /// The X, Y and Z matrices, in application order
    pub fn matrices(&self) -> &[Matrix4<f64>; 3] {
        &self.matrices
    }

    /// Rotate a point by X, then Y, then Z
    pub fn apply(&self, p: &Point3<f64>) -> Point3<f64> {
        self.matrices
            .iter()
            .fold(*p, |acc, m| transform_point(&acc, m))
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}
