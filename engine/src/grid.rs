//! Grid-cell allocation for snake territories
//!
//! The display area is divided into a fixed grid of squares separated by
//! GRID_SPACING. Each snake is assigned the first free cell in row-major
//! order when it is created, and cells are never handed out twice. A full
//! grid is the only reason a creation request can be declined after
//! validation.

use sim::{BoundingSquare, GRID_SPACING, SQUARE_SIZE};

/// Index of one grid cell, row-major from the top-left.
pub type CellId = usize;

/// Fixed grid of assignable squares with occupancy tracking.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cols: usize,
    rows: usize,
    occupied: Vec<bool>,
}

impl CellGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        CellGrid {
            cols,
            rows,
            occupied: vec![false; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn capacity(&self) -> usize {
        self.cols * self.rows
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|cell| **cell).count()
    }

    /// Returns the bounding square of `cell` regardless of occupancy.
    pub fn cell_square(&self, cell: CellId) -> Option<BoundingSquare> {
        if cell >= self.capacity() {
            return None;
        }
        let col = cell % self.cols;
        let row = cell / self.cols;
        let x = col as f32 * (SQUARE_SIZE + GRID_SPACING) + GRID_SPACING;
        let y = row as f32 * (SQUARE_SIZE + GRID_SPACING) + GRID_SPACING;
        Some(BoundingSquare::new(x, y, SQUARE_SIZE))
    }

    /// Returns the bounding square of `cell` if the cell has been assigned.
    /// Callers treat an absent square as a tick to skip.
    pub fn square_of(&self, cell: CellId) -> Option<BoundingSquare> {
        if self.occupied.get(cell).copied().unwrap_or(false) {
            self.cell_square(cell)
        } else {
            None
        }
    }

    /// Claims the first free cell in row-major order. Returns `None` when
    /// every cell is taken.
    pub fn allocate(&mut self) -> Option<(CellId, BoundingSquare)> {
        for cell in 0..self.capacity() {
            if !self.occupied[cell] {
                self.occupied[cell] = true;
                // Occupied cells always have a square.
                return self.cell_square(cell).map(|square| (cell, square));
            }
        }
        None
    }

    /// Squares of every assigned cell, in row-major order.
    pub fn occupied_squares(&self) -> Vec<BoundingSquare> {
        (0..self.capacity())
            .filter(|cell| self.occupied[*cell])
            .filter_map(|cell| self.cell_square(cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_allocation_takes_top_left_cell() {
        let mut grid = CellGrid::new(7, 7);
        let (cell, square) = grid.allocate().unwrap();
        assert_eq!(cell, 0);
        assert_eq!(square, BoundingSquare::new(10.0, 10.0, 50.0));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_allocation_scans_rows_before_columns() {
        let mut grid = CellGrid::new(3, 2);
        let origins: Vec<(f32, f32)> = (0..6)
            .map(|_| {
                let (_, square) = grid.allocate().unwrap();
                (square.x, square.y)
            })
            .collect();
        assert_eq!(
            origins,
            vec![
                (10.0, 10.0),
                (70.0, 10.0),
                (130.0, 10.0),
                (10.0, 70.0),
                (70.0, 70.0),
                (130.0, 70.0),
            ]
        );
    }

    #[test]
    fn test_full_grid_declines_allocation() {
        let mut grid = CellGrid::new(7, 7);
        for _ in 0..49 {
            assert!(grid.allocate().is_some());
        }
        assert!(grid.allocate().is_none());
        assert_eq!(grid.occupied_count(), 49);
    }

    #[test]
    fn test_square_of_unassigned_cell_is_absent() {
        let mut grid = CellGrid::new(2, 2);
        assert_eq!(grid.square_of(0), None);
        let (cell, square) = grid.allocate().unwrap();
        assert_eq!(grid.square_of(cell), Some(square));
        assert_eq!(grid.square_of(1), None);
        assert_eq!(grid.square_of(99), None);
    }

    #[test]
    fn test_occupied_squares_in_allocation_order() {
        let mut grid = CellGrid::new(2, 2);
        grid.allocate();
        grid.allocate();
        let squares = grid.occupied_squares();
        assert_eq!(squares.len(), 2);
        assert_eq!((squares[0].x, squares[0].y), (10.0, 10.0));
        assert_eq!((squares[1].x, squares[1].y), (70.0, 10.0));
    }
}
