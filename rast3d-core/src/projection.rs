/// Camera and projection utilities
use nalgebra::{Matrix4, Point3};

use crate::surface::ScreenPoint;

/// Perspective camera fixed at the origin, looking down +Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub near: f64,
    pub far: f64,
    /// Field of view in degrees
    pub fov: f64,
    pub aspect: f64,
}

impl Camera {
    pub fn position(&self) -> Point3<f64> {
        Point3::origin()
    }

    /// Row-vector perspective projection; column 3 copies z into w
    #[rustfmt::skip]
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        let fov_rad = 1.0 / (self.fov.to_radians() * 0.5).tan();
        let depth = self.far - self.near;

        Matrix4::new(
            self.aspect * fov_rad, 0.0, 0.0, 0.0,
            0.0, fov_rad, 0.0, 0.0,
            0.0, 0.0, self.far / depth, 1.0,
            0.0, 0.0, (-self.far * self.near) / depth, 0.0,
        )
    }
}

/// Maps normalized device coordinates onto a pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `(w/2 + x*w/2, h/2 + y*h/2)`, rounded half-to-even.
    ///
    /// No flip and no clamping: NDC (1, 1) lands on (width, height).
    pub fn to_screen(&self, ndc: &Point3<f64>) -> ScreenPoint {
        let w = self.width as f64;
        let h = self.height as f64;

        let x = (w * 0.5) + (ndc.x * w * 0.5);
        let y = (h * 0.5) + (ndc.y * h * 0.5);

        ScreenPoint::new(x.round_ties_even() as i32, y.round_ties_even() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::transform_point;

    fn camera() -> Camera {
        Camera {
            near: 0.1,
            far: 1000.0,
            fov: 90.0,
            aspect: 1.0,
        }
    }

    #[test]
    fn test_projection_layout() {
        let m = camera().projection_matrix();
        assert!((m[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((m[(1, 1)] - 1.0).abs() < 1e-12);
        assert!((m[(2, 2)] - 1000.0 / 999.9).abs() < 1e-12);
        assert!((m[(3, 2)] + 100.0 / 999.9).abs() < 1e-12);
        assert_eq!(m[(2, 3)], 1.0);
        assert_eq!(m[(3, 3)], 0.0);
    }

    #[test]
    fn test_aspect_scales_x() {
        let wide = Camera { aspect: 2.0, ..camera() }.projection_matrix();
        assert!((wide[(0, 0)] - 2.0).abs() < 1e-12);
        assert!((wide[(1, 1)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_near_and_far_planes() {
        let m = camera().projection_matrix();
        let near = transform_point(&Point3::new(0.0, 0.0, 0.1), &m);
        let far = transform_point(&Point3::new(0.0, 0.0, 1000.0), &m);
        assert!(near.z.abs() < 1e-9);
        assert!((far.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_at_camera_plane_is_unnormalized() {
        // z = 0 gives w = 0, so the divide is skipped
        let m = camera().projection_matrix();
        let p = transform_point(&Point3::new(1.0, 2.0, 0.0), &m);
        assert!(p.iter().all(|c| c.is_finite()));
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 2.0).abs() < 1e-12);
        assert!((p.z + 100.0 / 999.9).abs() < 1e-12);
    }

    #[test]
    fn test_viewport_mapping() {
        let viewport = Viewport::new(1920, 1080);
        assert_eq!(viewport.to_screen(&Point3::new(0.0, 0.0, 0.5)), ScreenPoint::new(960, 540));
        assert_eq!(viewport.to_screen(&Point3::new(1.0, 1.0, 0.5)), ScreenPoint::new(1920, 1080));
        assert_eq!(viewport.to_screen(&Point3::new(-1.0, -1.0, 0.5)), ScreenPoint::new(0, 0));
        assert_eq!(viewport.to_screen(&Point3::new(0.5, -0.5, 0.0)), ScreenPoint::new(1440, 270));
    }

    #[test]
    fn test_viewport_rounds_half_to_even() {
        let viewport = Viewport::new(4, 4);
        assert_eq!(viewport.to_screen(&Point3::new(0.25, 0.75, 0.0)), ScreenPoint::new(2, 4));
    }
}
