use engine::EngineSnapshot;
use macroquad::prelude::*;
use sim::{GRID_SPACING, SEGMENT_SIZE, SQUARE_SIZE};

/// Number of whole grid columns and rows that fit in a `width` x `height`
/// area, with [`GRID_SPACING`] around every square.
pub fn grid_size(width: f32, height: f32) -> (usize, usize) {
    let span = SQUARE_SIZE + GRID_SPACING;
    let cols = ((width - GRID_SPACING) / span).max(0.0) as usize;
    let rows = ((height - GRID_SPACING) / span).max(0.0) as usize;
    (cols, rows)
}

/// Draws the patrol board: free cells as faint outlines, occupied squares
/// filled blue, snake segments red on top.
pub struct GridPanel {
    cols: usize,
    rows: usize,
}

impl GridPanel {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub fn draw(&self, snapshot: &EngineSnapshot) {
        clear_background(Color::from_rgba(238, 238, 238, 255));

        let span = SQUARE_SIZE + GRID_SPACING;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x = col as f32 * span + GRID_SPACING;
                let y = row as f32 * span + GRID_SPACING;
                draw_rectangle_lines(x, y, SQUARE_SIZE, SQUARE_SIZE, 1.0, LIGHTGRAY);
            }
        }

        for square in &snapshot.squares {
            draw_rectangle(square.x, square.y, square.size, square.size, BLUE);
        }

        for snake in &snapshot.snakes {
            for segment in &snake.segments {
                draw_rectangle(segment.x, segment.y, SEGMENT_SIZE, SEGMENT_SIZE, RED);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_exact_fit() {
        // 7 squares of 50 plus 8 gaps of 10 need 430 in each direction
        assert_eq!(grid_size(430.0, 430.0), (7, 7));
    }

    #[test]
    fn test_grid_size_rounds_down() {
        assert_eq!(grid_size(429.0, 430.0), (6, 7));
        assert_eq!(grid_size(640.0, 390.0), (10, 6));
    }

    #[test]
    fn test_grid_size_too_small_for_any_cell() {
        assert_eq!(grid_size(5.0, 5.0), (0, 0));
        assert_eq!(grid_size(0.0, 0.0), (0, 0));
    }
}
