/// A mesh placed in the world with its own rotation and position
use nalgebra::{Point3, Vector3};

use crate::geometry::{Mesh, Triangle};
use crate::transform::RotationState;

#[derive(Debug, Clone)]
pub struct Object3D {
    mesh: Mesh,
    position: Vector3<f64>,
    rotation: RotationState,
}

impl Object3D {
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            position: Vector3::zeros(),
            rotation: RotationState::zero(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    /// Move by a delta; successive calls add up
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.position += Vector3::new(dx, dy, dz);
    }

    /// Set absolute rotation angles in radians, replacing the previous ones
    pub fn rotate(&mut self, x: f64, y: f64, z: f64) {
        self.rotation = RotationState::new(x, y, z);
    }

    /// Rotate (X, Y, Z), push forward along Z by `forward_offset`, then
    /// translate by the object's position
    pub fn world_triangle(&self, triangle: &Triangle, forward_offset: f64) -> Triangle {
        let offset = Vector3::new(0.0, 0.0, forward_offset);
        triangle.map(|v: Point3<f64>| self.rotation.apply(&v) + offset + self.position)
    }
}

impl From<Mesh> for Object3D {
    fn from(mesh: Mesh) -> Self {
        Self::new(mesh)
    }
}
