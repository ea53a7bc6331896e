use clap::Parser;
use engine::{Engine, EngineConfig};
use log::{info, warn};
use rand::Rng;
use sim::validate_spawn;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid columns
    #[arg(long, default_value = "7")]
    cols: usize,

    /// Grid rows
    #[arg(long, default_value = "7")]
    rows: usize,

    /// Worker threads shared by the snake jobs
    #[arg(long, default_value = "10")]
    workers: usize,

    /// Number of snakes to create
    #[arg(short = 'n', long, default_value = "5")]
    snakes: usize,

    /// Target snake length in segments
    #[arg(short, long, default_value = "5")]
    length: usize,

    /// Tick period in milliseconds
    #[arg(short, long, default_value = "100")]
    speed: u64,

    /// Patrol direction: Clockwise, Anticlockwise or Mixed
    #[arg(short, long, default_value = "Mixed")]
    direction: String,

    /// Seconds to run before shutting down
    #[arg(short, long, default_value = "10")]
    run_for: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let engine = Engine::start(EngineConfig {
        cols: args.cols,
        rows: args.rows,
        workers: args.workers,
    })?;

    let mut rng = rand::thread_rng();
    for _ in 0..args.snakes {
        let direction = if args.direction.eq_ignore_ascii_case("Mixed") {
            if rng.gen_bool(0.5) {
                "Clockwise"
            } else {
                "Anticlockwise"
            }
        } else {
            args.direction.as_str()
        };

        let params = validate_spawn(&args.length.to_string(), &args.speed.to_string(), direction)?;
        match engine.create_snake(params) {
            Ok(id) => info!("Created snake {} heading {}", id, direction),
            Err(e) => {
                warn!("{}", e);
                break;
            }
        }
    }

    for _ in 0..args.run_for {
        thread::sleep(Duration::from_secs(1));
        let snapshot = engine.snapshot();
        for snake in &snapshot.snakes {
            if let Some(head) = snake.segments.first() {
                info!(
                    "Snake {}: head at ({}, {}), {} segments",
                    snake.id,
                    head.x,
                    head.y,
                    snake.segments.len()
                );
            }
        }
    }

    info!("Run complete, cancelling {} jobs", engine.active_jobs());
    engine.shutdown();
    Ok(())
}
