use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use exposure::*;
pub use flags::*;
pub use generator::*;
pub use host::*;
pub use reveal::*;
pub use score::*;
pub use timer::*;
pub use types::*;

mod difficulty;
mod engine;
mod error;
mod exposure;
mod flags;
mod generator;
mod host;
mod reveal;
mod score;
mod timer;
mod types;

/// Immutable contents of a cell, fixed when the board is generated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    /// Mines among the neighbours; meaningless when `is_mine` is set.
    pub adjacent: u8,
}

impl Cell {
    pub const MINE: Self = Self {
        is_mine: true,
        adjacent: 0,
    };

    pub const fn is_zero(self) -> bool {
        !self.is_mine && self.adjacent == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a mine mask and fills in every adjacency count.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let (rows, cols) = mine_mask.dim();
        let mut cells: Array2<Cell> = Array2::default((rows, cols));
        let mut mine_count: CellCount = 0;

        for ((row, col), &is_mine) in mine_mask.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            cells[[row, col]] = if is_mine {
                mine_count += 1;
                Cell::MINE
            } else {
                let adjacent = mine_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8;
                Cell {
                    is_mine: false,
                    adjacent,
                }
            };
        }

        Self { cells, mine_count }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidConfig("board must have at least one cell"));
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds(coords));
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// What a single input event did to the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    FlagsSwept,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_counts_match_neighbors() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_cell_count(), 7);
        assert_eq!(board[(1, 1)].adjacent, 2);
        assert_eq!(board[(0, 1)].adjacent, 1);
        assert_eq!(board[(0, 2)].adjacent, 0);
        assert!(board[(0, 2)].is_zero());
        assert!(board.contains_mine((2, 2)));
    }

    #[test]
    fn duplicate_mine_coords_count_once() {
        let board = Board::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.iter_mines().collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn mine_outside_board_is_rejected() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds((2, 0)))
        );
        assert_eq!(
            Board::from_mine_coords((2, 2), &[]).unwrap().validate_coords((0, 2)),
            Err(GameError::OutOfBounds((0, 2)))
        );
    }
}
