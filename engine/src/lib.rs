//! # Snake Patrol Engine
//!
//! This library runs the live side of the demo: it owns the worker runtime,
//! the grid of assignable squares, the registry of snakes and the periodic
//! jobs that keep every snake walking. The display surface talks to a
//! single [`Engine`] value and never touches tasks or locks itself.
//!
//! ## Core Responsibilities
//!
//! ### Cell Assignment
//! Every snake patrols exactly one grid square, claimed at creation time
//! from the first free cell in row-major order. A full grid declines the
//! request; nothing else about a validated request can fail.
//!
//! ### Fixed-Rate Ticking
//! Each snake runs on its own repeating job at its own period. Jobs fire
//! immediately on creation and skip missed ticks instead of bursting, so a
//! snake never has two ticks in flight. A failed tick is logged and the job
//! keeps firing.
//!
//! ### Repaint Signaling
//! Ticks that move a snake publish a payload-free redraw signal. Signals
//! coalesce, so however many snakes advanced since the display last looked,
//! it sees one pending change and pulls one fresh snapshot.
//!
//! ## Concurrency Model
//!
//! The engine owns a multi-thread tokio runtime with a fixed worker count.
//! Shared state is locked at two levels: a registry lock held briefly for
//! lookup and creation, and one lock per snake held for the duration of a
//! tick or a snapshot read. Ticks of different snakes run in parallel;
//! mutation and rendering of the same snake exclude each other.
//!
//! ## Module Organization
//!
//! - `grid`: cell layout, origin arithmetic and occupancy
//! - `registry`: snake registration and per-snake locks
//! - `scheduler`: repeating jobs, cancellation and the redraw signal
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use engine::{Engine, EngineConfig};
//! use sim::{Rotation, SpawnParams};
//! use std::time::Duration;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = Engine::start(EngineConfig::default())?;
//!     let id = engine.create_snake(SpawnParams {
//!         length: 5,
//!         speed_ms: 100,
//!         rotation: Rotation::Clockwise,
//!     })?;
//!
//!     std::thread::sleep(Duration::from_secs(1));
//!     for snake in engine.snapshot().snakes {
//!         println!("snake {} has {} segments", snake.id, snake.segments.len());
//!     }
//!
//!     engine.shutdown();
//!     Ok(())
//! }
//! ```

pub mod grid;
pub mod registry;
pub mod scheduler;

use log::info;
use sim::{BoundingSquare, Segment, SpawnParams};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::sync::watch;

pub use grid::{CellGrid, CellId};
pub use registry::{SnakeRegistry, SnakeSlot, SpawnError};
pub use scheduler::{PeriodicScheduler, TickError, TickOutcome};

/// Identifier assigned to each snake, starting at 1.
pub type SnakeId = u32;

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Grid columns.
    pub cols: usize,
    /// Grid rows.
    pub rows: usize,
    /// Worker threads shared by all snake jobs.
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cols: 7,
            rows: 7,
            workers: 10,
        }
    }
}

/// Point-in-time copy of everything the display needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    /// Squares of every assigned cell, in row-major order.
    pub squares: Vec<BoundingSquare>,
    /// Body segments of every snake, ascending by id.
    pub snakes: Vec<SnakeSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnakeSnapshot {
    pub id: SnakeId,
    /// Head first.
    pub segments: Vec<Segment>,
}

/// Owns the runtime, the registry and the scheduler.
pub struct Engine {
    config: EngineConfig,
    runtime: Option<Runtime>,
    registry: Arc<RwLock<SnakeRegistry>>,
    scheduler: PeriodicScheduler,
}

impl Engine {
    /// Builds the worker runtime and an empty grid.
    pub fn start(config: EngineConfig) -> std::io::Result<Engine> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.workers.max(1))
            .thread_name("snake-engine")
            .enable_all()
            .build()?;
        let scheduler = PeriodicScheduler::new(runtime.handle().clone());
        let registry = Arc::new(RwLock::new(SnakeRegistry::new(config.cols, config.rows)));
        info!(
            "Engine started: {}x{} grid, {} workers",
            config.cols, config.rows, config.workers
        );
        Ok(Engine {
            config,
            runtime: Some(runtime),
            registry,
            scheduler,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registers a snake and starts its repeating job. The job advances the
    /// snake and runs its growth schedule once per period; when the snake's
    /// square cannot be found the tick is skipped quietly.
    pub fn create_snake(&self, params: SpawnParams) -> Result<SnakeId, SpawnError> {
        let id = {
            let mut registry = self
                .registry
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            registry.spawn(&params)?
        };

        let registry = Arc::clone(&self.registry);
        self.scheduler
            .schedule(id, Duration::from_millis(params.speed_ms), move || {
                let (snake, square) = {
                    let registry = registry.read().map_err(|_| TickError::Poisoned("registry"))?;
                    let slot = match registry.slot(id) {
                        Some(slot) => slot,
                        None => return Ok(TickOutcome::Skipped),
                    };
                    let square = match registry.square_of(slot.cell) {
                        Some(square) => square,
                        None => return Ok(TickOutcome::Skipped),
                    };
                    (slot.snake, square)
                };

                let mut snake = snake.write().map_err(|_| TickError::Poisoned("snake"))?;
                snake.advance(&square);
                snake.grow(Instant::now());
                Ok(TickOutcome::Advanced)
            });
        Ok(id)
    }

    /// Clones the occupied squares and every snake's segments. A snake
    /// whose lock was poisoned by a panicked tick is left out of the frame.
    pub fn snapshot(&self) -> EngineSnapshot {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        let squares = registry.grid().occupied_squares();
        let mut snakes = Vec::new();
        for id in registry.ids() {
            if let Some(slot) = registry.slot(id) {
                if let Ok(snake) = slot.snake.read() {
                    snakes.push(SnakeSnapshot {
                        id,
                        segments: snake.segments(),
                    });
                }
            }
        }
        EngineSnapshot { squares, snakes }
    }

    /// Subscribes to the coalescing "repaint now" signal.
    pub fn redraw_watch(&self) -> watch::Receiver<()> {
        self.scheduler.redraw_watch()
    }

    /// Aborts the repeating job of `id`. The snake keeps its cell and its
    /// last position; it just stops moving.
    pub fn cancel_snake(&self, id: SnakeId) -> bool {
        self.scheduler.cancel(id)
    }

    pub fn active_jobs(&self) -> usize {
        self.scheduler.active_jobs()
    }

    pub fn snake_count(&self) -> usize {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Cancels every job and releases the runtime without waiting for
    /// in-flight ticks.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            info!("Cancelled {} snake jobs", cancelled);
        }
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim::{Rotation, Vec2};
    use std::thread;

    fn test_engine(cols: usize, rows: usize) -> Engine {
        Engine::start(EngineConfig {
            cols,
            rows,
            workers: 2,
        })
        .unwrap()
    }

    fn test_params(speed_ms: u64) -> SpawnParams {
        SpawnParams {
            length: 3,
            speed_ms,
            rotation: Rotation::Clockwise,
        }
    }

    #[test]
    fn test_create_snake_occupies_cell_and_moves() {
        let engine = test_engine(3, 3);
        let id = engine.create_snake(test_params(10)).unwrap();
        assert_eq!(id, 1);
        assert_eq!(engine.snake_count(), 1);
        assert_eq!(engine.active_jobs(), 1);

        thread::sleep(Duration::from_millis(150));

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.squares.len(), 1);
        assert_eq!(snapshot.snakes.len(), 1);
        let segments = &snapshot.snakes[0].segments;
        assert!(!segments.is_empty() && segments.len() <= 3);
        // The first tick fires immediately, so the head has left the origin.
        assert_ne!(segments[0].position(), Vec2::new(10.0, 10.0));
        engine.shutdown();
    }

    #[test]
    fn test_snakes_tick_independently() {
        let engine = test_engine(3, 3);
        let fast = engine.create_snake(test_params(5)).unwrap();
        let slow = engine.create_snake(test_params(50)).unwrap();

        thread::sleep(Duration::from_millis(200));

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.snakes.len(), 2);
        for snake in &snapshot.snakes {
            assert!(snake.id == fast || snake.id == slow);
            assert_ne!(
                snake.segments[0].position(),
                Vec2::new(10.0, 10.0),
                "snake {} never moved",
                snake.id
            );
        }
        engine.shutdown();
    }

    #[test]
    fn test_create_declined_on_full_grid() {
        let engine = test_engine(1, 1);
        assert!(engine.create_snake(test_params(50)).is_ok());
        assert_eq!(
            engine.create_snake(test_params(50)),
            Err(SpawnError::NoFreeCell)
        );
        assert_eq!(engine.snake_count(), 1);
        assert_eq!(engine.active_jobs(), 1);
        engine.shutdown();
    }

    #[test]
    fn test_redraw_signal_follows_movement() {
        let engine = test_engine(2, 2);
        let mut redraw = engine.redraw_watch();
        assert!(!redraw.has_changed().unwrap());

        engine.create_snake(test_params(10)).unwrap();
        thread::sleep(Duration::from_millis(100));
        assert!(redraw.has_changed().unwrap());
        engine.shutdown();
    }

    #[test]
    fn test_cancel_snake_freezes_position() {
        let engine = test_engine(2, 2);
        let id = engine.create_snake(test_params(5)).unwrap();
        thread::sleep(Duration::from_millis(50));

        assert!(engine.cancel_snake(id));
        assert_eq!(engine.active_jobs(), 0);
        // Cancelled snakes keep their cell and stay in the frame.
        thread::sleep(Duration::from_millis(20));
        let frozen = engine.snapshot();
        assert_eq!(frozen.snakes.len(), 1);
        assert_eq!(frozen.squares.len(), 1);

        thread::sleep(Duration::from_millis(60));
        assert_eq!(engine.snapshot(), frozen);
        engine.shutdown();
    }

    #[test]
    fn test_shutdown_cancels_all_jobs() {
        let engine = test_engine(3, 3);
        for _ in 0..3 {
            engine.create_snake(test_params(20)).unwrap();
        }
        assert_eq!(engine.active_jobs(), 3);
        engine.shutdown();
    }

    #[test]
    fn test_drop_without_shutdown_is_clean() {
        let engine = test_engine(2, 2);
        engine.create_snake(test_params(10)).unwrap();
        drop(engine);
    }
}
