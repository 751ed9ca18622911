/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

/// Scale a vector so its largest component magnitude becomes 1.
///
/// This is not a Euclidean normalization; shading depends on this exact
/// scaling. A zero vector is returned unchanged.
pub fn normalize_max_abs(v: Vector3<f64>) -> Vector3<f64> {
    let max = v.amax();
    if max == 0.0 {
        return v;
    }
    v / max
}

/// A triangle face defined by three vertex positions in winding order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal `(v1 - v0) x (v2 - v0)`, scaled by max-abs component
    pub fn calculate_normal(&self) -> Vector3<f64> {
        let [v0, v1, v2] = self.vertices;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        normalize_max_abs(edge1.cross(&edge2))
    }

    /// Mean z of the three vertices
    pub fn mean_depth(&self) -> f64 {
        self.vertices.iter().map(|v| v.z).sum::<f64>() / 3.0
    }

    /// Apply `f` to every vertex, keeping the winding
    pub fn map(&self, mut f: impl FnMut(Point3<f64>) -> Point3<f64>) -> Self {
        let [v0, v1, v2] = self.vertices;
        Self::new(f(v0), f(v1), f(v2))
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The unit cube spanning `[0, 1]` on every axis, two triangles per face
    pub fn unit_cube() -> Self {
        const FACES: [[[f64; 3]; 3]; 12] = [
            // Near (z = 0)
            [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
            [[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
            // Right (x = 1)
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
            [[1.0, 0.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
            // Far (z = 1)
            [[1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
            [[1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]],
            // Left (x = 0)
            [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
            [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
            // Top (y = 1)
            [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
            [[0.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
            // Bottom (y = 0)
            [[1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]],
            [[1.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        ];

        let mut mesh = Self::with_capacity(FACES.len());
        for [a, b, c] in FACES {
            mesh.add_triangle(Triangle::new(a.into(), b.into(), c.into()));
        }
        mesh
    }
}
