/// Per-frame transform, cull, shade and submit
use log::debug;
use nalgebra::{Matrix4, Vector3};
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::RenderConfig;
use crate::geometry::{normalize_max_abs, Triangle};
use crate::object::Object3D;
use crate::projection::Viewport;
use crate::surface::{Rgb, ScreenTriangle, Surface};
use crate::transform::transform_point;

/// Shared handle to an object; the frame loop mutates it between renders
pub type ObjectHandle = Rc<RefCell<Object3D>>;

/// Direction the light travels, scaled by its max-abs component
fn light_direction() -> Vector3<f64> {
    normalize_max_abs(Vector3::new(0.0, 0.0, -1.0))
}

/// What happened to the triangles of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub submitted: usize,
    pub culled: usize,
}

/// Grayscale level for a face: `|normal . light| * 255`, rounded
pub fn shade(normal: &Vector3<f64>, light: &Vector3<f64>) -> u8 {
    (normal.dot(light).abs() * 255.0)
        .round_ties_even()
        .clamp(0.0, 255.0) as u8
}

/// Flat-shading renderer over a list of shared objects
pub struct Renderer {
    objects: Vec<ObjectHandle>,
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            objects: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn objects(&self) -> &[ObjectHandle] {
        &self.objects
    }

    /// Take ownership of an object and hand back a shared handle to it
    pub fn add_object(&mut self, object: Object3D) -> ObjectHandle {
        let handle = Rc::new(RefCell::new(object));
        self.objects.push(Rc::clone(&handle));
        handle
    }

    pub fn add_shared(&mut self, handle: ObjectHandle) {
        self.objects.push(handle);
    }

    /// Draw every object into `surface`.
    ///
    /// Triangles whose normal does not point away from the camera are
    /// dropped. Survivors go out in mesh order unless `depth_sort` is set;
    /// there is no depth test either way.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> FrameStats {
        let camera = self.config.camera();
        let projection = camera.projection_matrix();
        let viewport = self.config.viewport();
        let light = light_direction();
        let eye = camera.position();

        let mut stats = FrameStats::default();
        let mut visible: Vec<(Triangle, Vector3<f64>)> = Vec::new();

        for handle in &self.objects {
            let object = handle.borrow();
            visible.clear();

            for triangle in &object.mesh().triangles {
                let world = object.world_triangle(triangle, self.config.forward_offset);
                let normal = world.calculate_normal();

                if normal.dot(&(world.vertices[0] - eye)) > 0.0 {
                    visible.push((world, normal));
                } else {
                    stats.culled += 1;
                }
            }

            if self.config.depth_sort {
                // Far to near
                visible.sort_by(|a, b| b.0.mean_depth().total_cmp(&a.0.mean_depth()));
            }

            for (world, normal) in &visible {
                let screen = project(world, &projection, &viewport);
                surface.fill_triangle(&screen, Rgb::gray(shade(normal, &light)));
                stats.submitted += 1;
            }
        }

        debug!(
            "frame: {} triangles submitted, {} culled",
            stats.submitted, stats.culled
        );
        stats
    }
}

fn project(world: &Triangle, projection: &Matrix4<f64>, viewport: &Viewport) -> ScreenTriangle {
    let [a, b, c] = world
        .vertices
        .map(|v| viewport.to_screen(&transform_point(&v, projection)));
    ScreenTriangle::new(a, b, c)
}
