//! Rotor City - a helicopter circling a procedurally coloured city block.

mod app;
mod config;
mod flight;
mod projectile;
mod scene;
mod vehicle;

use anyhow::Result;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                           Rotor City                             ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                                       ║");
    println!("║    Left Arrow - Fly forward    │  Up/Down    - Climb / descend   ║");
    println!("║    Space      - Drop a box     │  1-6        - Camera presets    ║");
    println!("║    W          - Wireframe      │  S          - Solid             ║");
    println!("║    Mouse drag - Orbit camera   │  Scroll     - Zoom              ║");
    println!("║    Escape     - Quit                                             ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    let config = config::SceneConfig::load();

    if config.headless_frames > 0 {
        log::info!("Running {} headless frames", config.headless_frames);
        flight::fly(&config);
        return Ok(());
    }

    log::info!("Starting Rotor City (city seed {:#x})", config.city_seed);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
