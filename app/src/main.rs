use app::controls::{ControlPanel, CONTROL_STRIP_HEIGHT};
use app::panel::{grid_size, GridPanel};
use clap::Parser;
use engine::{Engine, EngineConfig};
use log::{error, info, warn};
use macroquad::prelude::*;
use sim::validate_spawn;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Window width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Worker threads shared by the snake jobs
    #[arg(long, default_value = "10")]
    workers: usize,
}

fn window_conf() -> Conf {
    let args = Args::parse();
    Conf {
        window_title: "Snake Patrol".to_owned(),
        window_width: args.width as i32,
        window_height: args.height as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Note: Set RUST_LOG=info environment variable to see detailed logs");
    }

    let args = Args::parse();
    let (cols, rows) = grid_size(args.width as f32, args.height as f32 - CONTROL_STRIP_HEIGHT);
    info!("Starting Snake Patrol with a {}x{} grid", cols, rows);

    let engine = match Engine::start(EngineConfig {
        cols,
        rows,
        workers: args.workers,
    }) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to start engine: {}", e);
            return;
        }
    };

    let panel = GridPanel::new(cols, rows);
    let mut controls = ControlPanel::new();
    let mut redraw = engine.redraw_watch();
    let mut snapshot = engine.snapshot();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        // Pull a fresh snapshot only when some snake actually moved.
        if redraw.has_changed().unwrap_or(false) {
            redraw.borrow_and_update();
            snapshot = engine.snapshot();
        }

        panel.draw(&snapshot);

        if let Some(request) = controls.draw() {
            match validate_spawn(&request.length, &request.speed, &request.direction) {
                Ok(params) => match engine.create_snake(params) {
                    Ok(id) => {
                        controls.set_status(format!("Created snake {}", id));
                        snapshot = engine.snapshot();
                    }
                    Err(e) => {
                        warn!("Snake creation declined: {}", e);
                        controls.set_error(e.to_string());
                    }
                },
                Err(errors) => {
                    warn!("Rejected creation request: {}", errors);
                    controls.set_error(errors.to_string());
                }
            }
        }

        next_frame().await;
    }

    info!("Shutting down");
    engine.shutdown();
}
