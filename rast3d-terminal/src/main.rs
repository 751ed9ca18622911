/// rast3d terminal demo - a spinning, flat-shaded mesh
///
/// Reads `rast3d.toml` from the working directory when present; see
/// `rast3d.example.toml`. Without a configured mesh the unit cube spins.
/// Controls:
///   - Q / ESC / Ctrl-C: Quit
///
/// Logs go to stderr (`RUST_LOG=info`); redirect them to keep the picture clean.

use log::info;
use rast3d_core::{load_mesh, Mesh};
use rast3d_terminal::{AppConfig, TerminalApp};
use std::error::Error;

const CONFIG_PATH: &str = "rast3d.toml";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = AppConfig::load_or_default(CONFIG_PATH)?;

    // Any load failure is fatal before the first frame
    let mesh = match &config.mesh {
        Some(path) => load_mesh(path)?,
        None => {
            info!("No mesh configured, using the unit cube");
            Mesh::unit_cube()
        }
    };

    let mut app = TerminalApp::new(mesh, config)?;
    app.run()?;

    Ok(())
}
