use crate::geometry::{BoundingSquare, Segment, Vec2};
use crate::movement::Rotation;
use crate::spawn::SpawnParams;
use crate::trail::SegmentTrail;
use std::time::Instant;

/// A snake patrolling the perimeter of its assigned square.
///
/// The snake owns its current direction; the rotation only decides how the
/// direction changes at corners. The bounding square is looked up by the
/// caller on every tick and passed in, so a snake whose square has gone
/// missing simply stops being advanced.
#[derive(Debug, Clone)]
pub struct Snake {
    position: Vec2,
    direction: Vec2,
    rotation: Rotation,
    target_length: usize,
    speed_ms: u64,
    trail: SegmentTrail,
}

impl Snake {
    /// Creates a snake at `origin`, facing the first edge of its patrol.
    pub fn new(origin: Vec2, target_length: usize, speed_ms: u64, rotation: Rotation) -> Self {
        Snake {
            position: origin,
            direction: rotation.initial_direction(),
            rotation,
            target_length,
            speed_ms,
            trail: SegmentTrail::new(origin, Instant::now()),
        }
    }

    /// Creates a snake at `origin` from validated creation parameters.
    pub fn from_params(origin: Vec2, params: &SpawnParams) -> Self {
        Snake::new(origin, params.length, params.speed_ms, params.rotation)
    }

    /// Slides one step along the perimeter of `square`: the head advances
    /// and the tail is dropped, so the trail length stays constant.
    pub fn advance(&mut self, square: &BoundingSquare) {
        let (position, direction) = self.rotation.step(self.position, self.direction, square);
        self.position = position;
        self.direction = direction;
        self.trail.add_head(position);
        self.trail.remove_tail();
    }

    /// Runs the growth schedule against `now`.
    pub fn grow(&mut self, now: Instant) {
        self.trail.grow_on_schedule(now, self.target_length);
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn len(&self) -> usize {
        self.trail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    /// Clones the body segments for a render pass.
    pub fn segments(&self) -> Vec<Segment> {
        self.trail.snapshot()
    }
}
