#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Side length and mine count of a square board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// 10x10 with 10 mines.
    pub const DEFAULT: Self = Self::new_unchecked(10, 10);

    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Rejects boards without cells and boards without a single safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            log::warn!("Rejected empty board");
            return Err(ConfigError::EmptyBoard.into());
        }

        let cells = self.total_cells();
        if self.mines >= cells {
            log::warn!(
                "Rejected board with too many mines, requested {} but only {} cells",
                self.mines,
                cells
            );
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                cells,
            }
            .into());
        }

        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub(crate) fn dim(&self) -> [usize; 2] {
        (self.size, self.size).to_nd_index()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where the mines are, plus the adjacency count of every safe cell, computed once on construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    adjacent: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows != cols || rows == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let size: Coord = rows.try_into().map_err(|_| GameError::InvalidBoardShape)?;

        // fits, at most Coord::MAX squared
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        GameConfig::new(size, mine_count)?;

        let adjacent = Array2::from_shape_fn(mine_mask.dim(), |index| {
            let coords = Coord2::from_nd_index(index);
            if mine_mask[index] {
                0
            } else {
                NeighborIter::new(coords, size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8
            }
        });

        Ok(Self {
            mine_mask,
            adjacent,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord {
        Coord2::from_nd_index(self.mine_mask.dim()).0
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines among the neighbors of a safe cell, `None` for a mine.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> Option<u8> {
        if self[coords] {
            None
        } else {
            Some(self.adjacent[coords.to_nd_index()])
        }
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|(index, _)| Coord2::from_nd_index(index))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Flagged,
    Unflagged,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell is flagged and the reveal was not forced, nothing changed.
    Declined,
    Safe,
    HitMine,
}
