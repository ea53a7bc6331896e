//! Snake registration and cell assignment
//!
//! This module tracks every live snake together with the grid cell it
//! patrols. Registration allocates a cell, builds the snake at the cell's
//! origin and hands out a sequential id. Each snake sits behind its own
//! lock so ticks of different snakes can run in parallel while a single
//! snake's mutation and the render snapshot exclude each other.

use crate::grid::{CellGrid, CellId};
use crate::SnakeId;
use log::info;
use sim::{BoundingSquare, Snake, SpawnParams};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Why a validated creation request was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// Every grid cell is already assigned.
    NoFreeCell,
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::NoFreeCell => write!(f, "No available space for the snake"),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Handle to one registered snake and the cell it patrols.
#[derive(Debug, Clone)]
pub struct SnakeSlot {
    /// Cell whose square the snake walks. Looked up again on every tick.
    pub cell: CellId,
    /// The snake itself. Write-locked by its tick job, read-locked for
    /// snapshots.
    pub snake: Arc<RwLock<Snake>>,
}

/// Registry of live snakes and the grid they are placed on.
#[derive(Debug)]
pub struct SnakeRegistry {
    grid: CellGrid,
    slots: HashMap<SnakeId, SnakeSlot>,
    next_id: SnakeId,
}

impl SnakeRegistry {
    pub fn new(cols: usize, rows: usize) -> Self {
        SnakeRegistry {
            grid: CellGrid::new(cols, rows),
            slots: HashMap::new(),
            next_id: 1,
        }
    }

    /// Registers a new snake: claims a cell, builds the snake at the cell
    /// origin and assigns the next id. Declines when the grid is full.
    pub fn spawn(&mut self, params: &SpawnParams) -> Result<SnakeId, SpawnError> {
        let (cell, square) = self.grid.allocate().ok_or(SpawnError::NoFreeCell)?;
        let snake = Snake::from_params(square.origin(), params);
        let id = self.next_id;
        self.next_id += 1;
        self.slots.insert(
            id,
            SnakeSlot {
                cell,
                snake: Arc::new(RwLock::new(snake)),
            },
        );
        info!(
            "Snake {} created in cell {} at ({}, {}), {} {} segments every {}ms",
            id, cell, square.x, square.y, params.rotation, params.length, params.speed_ms
        );
        Ok(id)
    }

    /// Looks up the slot of `id`. The clone is cheap; it shares the snake.
    pub fn slot(&self, id: SnakeId) -> Option<SnakeSlot> {
        self.slots.get(&id).cloned()
    }

    /// Square of `cell`, if that cell is assigned.
    pub fn square_of(&self, cell: CellId) -> Option<BoundingSquare> {
        self.grid.square_of(cell)
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Ids of every registered snake, ascending.
    pub fn ids(&self) -> Vec<SnakeId> {
        let mut ids: Vec<SnakeId> = self.slots.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim::Rotation;

    fn test_params() -> SpawnParams {
        SpawnParams {
            length: 5,
            speed_ms: 100,
            rotation: Rotation::Clockwise,
        }
    }

    #[test]
    fn test_spawn_assigns_sequential_ids() {
        let mut registry = SnakeRegistry::new(3, 3);
        assert_eq!(registry.spawn(&test_params()), Ok(1));
        assert_eq!(registry.spawn(&test_params()), Ok(2));
        assert_eq!(registry.spawn(&test_params()), Ok(3));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_spawn_occupies_one_cell() {
        let mut registry = SnakeRegistry::new(7, 7);
        let id = registry.spawn(&test_params()).unwrap();
        assert_eq!(registry.grid().occupied_count(), 1);

        let slot = registry.slot(id).unwrap();
        let square = registry.square_of(slot.cell).unwrap();
        assert_eq!(square, BoundingSquare::new(10.0, 10.0, 50.0));

        let snake = slot.snake.read().unwrap();
        assert_eq!(snake.position(), square.origin());
        assert_eq!(snake.target_length(), 5);
    }

    #[test]
    fn test_spawn_declines_when_grid_is_full() {
        let mut registry = SnakeRegistry::new(7, 7);
        for _ in 0..49 {
            assert!(registry.spawn(&test_params()).is_ok());
        }
        let err = registry.spawn(&test_params()).unwrap_err();
        assert_eq!(err, SpawnError::NoFreeCell);
        assert_eq!(err.to_string(), "No available space for the snake");
        // The failed request has no side effects.
        assert_eq!(registry.len(), 49);
        assert_eq!(registry.grid().occupied_count(), 49);
    }

    #[test]
    fn test_slot_lookup_unknown_id() {
        let registry = SnakeRegistry::new(2, 2);
        assert!(registry.slot(7).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_slots_share_one_snake() {
        let mut registry = SnakeRegistry::new(2, 2);
        let id = registry.spawn(&test_params()).unwrap();
        let square = registry
            .square_of(registry.slot(id).unwrap().cell)
            .unwrap();

        {
            let slot = registry.slot(id).unwrap();
            let mut snake = slot.snake.write().unwrap();
            snake.advance(&square);
        }

        let slot = registry.slot(id).unwrap();
        let snake = slot.snake.read().unwrap();
        assert_eq!(snake.position(), sim::Vec2::new(15.0, 10.0));
    }
}
