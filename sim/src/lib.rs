//! # Snake Patrol Simulation Library
//!
//! Pure simulation vocabulary shared by the engine and the display surface.
//! A snake is a short chain of fixed-size segments that walks the perimeter
//! of its assigned grid square forever, growing by one segment on a fixed
//! schedule until it reaches its target length.
//!
//! Nothing in this crate does I/O, spawns tasks, or keeps wall-clock time on
//! its own; growth is driven by instants handed in by the caller, which keeps
//! every rule deterministic under test.
//!
//! ## Module Organization
//!
//! - `geometry`: points, direction vectors, bounding squares and segments
//! - `movement`: the patrol rotations and the perimeter step function
//! - `trail`: the head-to-tail segment chain with scheduled growth
//! - `snake`: the snake itself, combining movement and trail
//! - `spawn`: creation-request validation and the validated parameter set

use std::time::Duration;

/// Side length of one snake segment.
pub const SEGMENT_SIZE: f32 = 5.0;
/// Side length of one grid square.
pub const SQUARE_SIZE: f32 = 50.0;
/// Gap between grid squares and around the grid edge.
pub const GRID_SPACING: f32 = 10.0;
/// Time between growth steps.
pub const GROWTH_INTERVAL: Duration = Duration::from_millis(2000);
/// Segments gained per growth step.
pub const GROWTH_STEP: u32 = 1;
/// Tick period used when the speed field is left empty, in milliseconds.
pub const DEFAULT_SPEED_MS: u64 = 100;

pub mod geometry;
pub mod movement;
pub mod snake;
pub mod spawn;
pub mod trail;

pub use geometry::{BoundingSquare, Segment, Vec2};
pub use movement::{InvalidDirection, Rotation};
pub use snake::Snake;
pub use spawn::{validate_spawn, SpawnParams, ValidationErrors};
pub use trail::SegmentTrail;
