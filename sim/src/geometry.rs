use crate::SEGMENT_SIZE;

///Represents a point or direction in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    ///Returns the sum of two vectors.
    pub fn add(&self, other: &Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

///Axis-aligned square a snake patrols the perimeter of.
///Assigned once at creation and never moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSquare {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl BoundingSquare {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        BoundingSquare { x, y, size }
    }

    ///Returns the top-left corner, where new snakes start.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

///One rendered unit of a snake's body, SEGMENT_SIZE on a side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x: f32,
    pub y: f32,
}

impl Segment {
    pub fn new(x: f32, y: f32) -> Self {
        Segment { x, y }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> f32 {
        SEGMENT_SIZE
    }
}
