//! Perimeter patrol rules for both rotations

use crate::geometry::{BoundingSquare, Vec2};
use crate::SEGMENT_SIZE;
use std::fmt;
use std::str::FromStr;

/// Which way a snake walks the perimeter of its square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    Anticlockwise,
}

/// Error raised when a direction token matches no known rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDirection(pub String);

impl fmt::Display for InvalidDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid direction '{}'. Please select 'Clockwise' or 'Anticlockwise'",
            self.0
        )
    }
}

impl std::error::Error for InvalidDirection {}

impl FromStr for Rotation {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("Clockwise") {
            Ok(Rotation::Clockwise)
        } else if token.eq_ignore_ascii_case("Anticlockwise") {
            Ok(Rotation::Anticlockwise)
        } else {
            Err(InvalidDirection(token.to_string()))
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Clockwise => write!(f, "Clockwise"),
            Rotation::Anticlockwise => write!(f, "Anticlockwise"),
        }
    }
}

impl Rotation {
    /// Direction of the first step for a snake starting at its square's
    /// top-left corner.
    pub fn initial_direction(&self) -> Vec2 {
        match self {
            Rotation::Clockwise => Vec2::new(SEGMENT_SIZE, 0.0),
            Rotation::Anticlockwise => Vec2::new(0.0, SEGMENT_SIZE),
        }
    }

    /// Advances one step along the perimeter of `square`.
    ///
    /// The position is displaced by the current direction first; the corner
    /// check then runs against the displaced position, so a turn taken at a
    /// corner becomes visible on the following step. Corner comparison is
    /// exact, which requires the square size to be a multiple of
    /// SEGMENT_SIZE; with incommensurate geometry the snake overshoots the
    /// corner and keeps going straight.
    pub fn step(&self, position: Vec2, direction: Vec2, square: &BoundingSquare) -> (Vec2, Vec2) {
        let next = position.add(&direction);
        let turned = match self {
            Rotation::Clockwise => clockwise_turn(next, square),
            Rotation::Anticlockwise => anticlockwise_turn(next, square),
        };
        (next, turned.unwrap_or(direction))
    }
}

fn clockwise_turn(position: Vec2, square: &BoundingSquare) -> Option<Vec2> {
    let far_x = square.x + square.size - SEGMENT_SIZE;
    let far_y = square.y + square.size - SEGMENT_SIZE;

    if position.x == far_x && position.y == square.y {
        Some(Vec2::new(0.0, SEGMENT_SIZE))
    } else if position.x == far_x && position.y == far_y {
        Some(Vec2::new(-SEGMENT_SIZE, 0.0))
    } else if position.x == square.x && position.y == far_y {
        Some(Vec2::new(0.0, -SEGMENT_SIZE))
    } else if position.x == square.x && position.y == square.y {
        Some(Vec2::new(SEGMENT_SIZE, 0.0))
    } else {
        None
    }
}

fn anticlockwise_turn(position: Vec2, square: &BoundingSquare) -> Option<Vec2> {
    let far_x = square.x + square.size - SEGMENT_SIZE;
    let far_y = square.y + square.size - SEGMENT_SIZE;

    if position.x == square.x && position.y == square.y {
        Some(Vec2::new(0.0, SEGMENT_SIZE))
    } else if position.x == square.x && position.y == far_y {
        Some(Vec2::new(SEGMENT_SIZE, 0.0))
    } else if position.x == far_x && position.y == far_y {
        Some(Vec2::new(0.0, -SEGMENT_SIZE))
    } else if position.x == far_x && position.y == square.y {
        Some(Vec2::new(-SEGMENT_SIZE, 0.0))
    } else {
        None
    }
}
