/// rast3d core library - flat-shaded software rendering pipeline
///
/// Meshes are loaded from a small `v`/`f` text format, placed in the world as
/// `Object3D`s, and pushed through a row-vector transform chain by the
/// `Renderer`, which fills the surviving triangles into any `Surface`.

pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod object;
pub mod projection;
pub mod renderer;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use config::RenderConfig;
pub use error::{ConfigError, LoadError};
pub use geometry::{Mesh, Triangle};
pub use loader::{load_mesh, parse_mesh};
pub use object::Object3D;
pub use projection::{Camera, Viewport};
pub use renderer::{FrameStats, ObjectHandle, Renderer};
pub use surface::{FrameBuffer, Rgb, ScreenPoint, ScreenTriangle, Surface};
pub use transform::{transform_point, RotationState, Transform};
