/// Terminal front end: configuration, the spinning demo scene and its frame loop
use crossterm::{cursor, execute, terminal};
use log::info;
use rast3d_core::config::load_toml;
use rast3d_core::{
    ConfigError, FrameStats, Mesh, Object3D, ObjectHandle, RenderConfig, Renderer, Rgb, Surface,
};
use serde::Deserialize;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

pub mod surface;

pub use surface::TerminalSurface;

/// Settings read from `rast3d.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Mesh file to spin; the unit cube when absent
    pub mesh: Option<PathBuf>,
    /// Radians added to every rotation angle per frame
    pub spin_rate: f64,
    /// Target frames per second; the loop sleeps `1 / frame_rate` per frame
    pub frame_rate: f64,
    pub render: RenderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "rast3d".to_string(),
            mesh: None,
            spin_rate: 0.05,
            frame_rate: 60.0,
            render: RenderConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            info!("Reading config: {}", path.display());
            load_toml(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Fixed sleep after each frame; time spent rendering is not subtracted
    pub fn frame_interval(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.frame_rate).unwrap_or(Duration::ZERO)
    }
}

/// One object spinning about all three axes at the same rate
pub struct SpinningScene {
    renderer: Renderer,
    object: ObjectHandle,
    theta: f64,
    spin_rate: f64,
}

impl SpinningScene {
    pub fn new(mesh: Mesh, config: &AppConfig) -> Self {
        let mut renderer = Renderer::new(config.render.clone());
        let object = renderer.add_object(Object3D::new(mesh));

        Self {
            renderer,
            object,
            theta: 0.0,
            spin_rate: config.spin_rate,
        }
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn object(&self) -> &ObjectHandle {
        &self.object
    }

    /// Advance the spin, clear to black and render into `surface`
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        self.theta += self.spin_rate;
        surface.fill_background(Rgb::BLACK);

        self.object
            .borrow_mut()
            .rotate(self.theta, self.theta, self.theta);
        self.renderer.render(surface)
    }
}

/// Every step has already run; report the earliest failure
fn first_error<const N: usize>(steps: [io::Result<()>; N]) -> io::Result<()> {
    steps.into_iter().collect()
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: SpinningScene,
    surface: TerminalSurface,
    frame_interval: Duration,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: AppConfig) -> io::Result<Self> {
        let surface = TerminalSurface::new(
            config.title.clone(),
            config.render.width as usize,
            config.render.height as usize,
        )?;

        Ok(Self {
            scene: SpinningScene::new(mesh, &config),
            surface,
            frame_interval: config.frame_interval(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup; restore the screen even if leaving raw mode fails
        let raw = terminal::disable_raw_mode();
        let screen = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);

        first_error([result, raw, screen])
    }

    fn main_loop(&mut self) -> io::Result<()> {
        info!("Entering frame loop at {:?} per frame", self.frame_interval);

        while self.surface.pump_events()? {
            self.scene.frame(&mut self.surface);
            self.surface.present()?;

            thread::sleep(self.frame_interval);
        }

        info!("Frame loop stopped after theta = {:.2}", self.scene.theta());
        Ok(())
    }
}
