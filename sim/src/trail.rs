//! Head-to-tail segment chain with scheduled growth

use crate::geometry::{Segment, Vec2};
use crate::{GROWTH_INTERVAL, GROWTH_STEP};
use std::collections::VecDeque;
use std::time::Instant;

/// Ordered chain of segments, head at the front.
///
/// The trail always holds at least one segment. Growth is budgeted by a
/// clock: once per GROWTH_INTERVAL a growth step accumulates, and when
/// GROWTH_STEP steps have accumulated the tail segment is duplicated. Every
/// growth pass finishes by trimming the trail back to the target length.
#[derive(Debug, Clone)]
pub struct SegmentTrail {
    segments: VecDeque<Segment>,
    last_growth: Instant,
    growth_steps: u32,
}

impl SegmentTrail {
    /// Creates a trail with a single segment at `head`. `now` seeds the
    /// growth clock.
    pub fn new(head: Vec2, now: Instant) -> Self {
        let mut segments = VecDeque::new();
        segments.push_front(Segment::new(head.x, head.y));
        SegmentTrail {
            segments,
            last_growth: now,
            growth_steps: 0,
        }
    }

    /// Pushes a new head segment at `position`.
    pub fn add_head(&mut self, position: Vec2) {
        self.segments.push_front(Segment::new(position.x, position.y));
    }

    /// Drops the tail segment unless it is the only one left.
    pub fn remove_tail(&mut self) {
        if self.segments.len() > 1 {
            self.segments.pop_back();
        }
    }

    /// Shrinks the trail from the tail until it is no longer than `target`.
    pub fn trim_to_length(&mut self, target: usize) {
        while self.segments.len() > target {
            self.segments.pop_back();
        }
    }

    /// Runs one growth pass against the clock, then trims to `target`.
    pub fn grow_on_schedule(&mut self, now: Instant, target: usize) {
        if now.duration_since(self.last_growth) >= GROWTH_INTERVAL {
            self.last_growth = now;
            self.growth_steps += 1;
            if self.growth_steps >= GROWTH_STEP {
                if let Some(tail) = self.segments.back().copied() {
                    self.segments.push_back(tail);
                }
                self.growth_steps = 0;
            }
        }
        self.trim_to_length(target);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments.front()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Clones the segments for a render pass.
    pub fn snapshot(&self) -> Vec<Segment> {
        self.segments.iter().copied().collect()
    }
}
