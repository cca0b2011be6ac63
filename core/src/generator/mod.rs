use std::collections::BTreeSet;

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    /// Lays out `mine_count` mines on a `size` board, none of them inside `safe_region`.
    fn generate(
        &mut self,
        size: Coord2,
        mine_count: CellCount,
        safe_region: &SafeRegion,
    ) -> Result<Board>;
}

/// Cells guaranteed to be mine-free, usually the neighbourhood of the first click.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SafeRegion {
    cells: BTreeSet<Coord2>,
}

impl SafeRegion {
    pub fn none() -> Self {
        Self::default()
    }

    /// Square of cells closer than `radius` to `center`, clipped to `size`.
    pub fn around(center: Coord2, radius: Coord, size: Coord2) -> Self {
        iter_coords(size)
            .filter(|&coords| chebyshev(coords, center) < radius)
            .collect()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.contains(&coords)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells.iter().copied()
    }

    /// Cells of a `size` board that may hold a mine.
    fn free_cells(&self, size: Coord2) -> Vec<Coord2> {
        iter_coords(size)
            .filter(|&coords| !self.contains(coords))
            .collect()
    }
}

impl FromIterator<Coord2> for SafeRegion {
    fn from_iter<I: IntoIterator<Item = Coord2>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

fn check_size(size: Coord2) -> Result<()> {
    if size.0 == 0 || size.1 == 0 {
        Err(GameError::InvalidConfig("board must have at least one cell"))
    } else {
        Ok(())
    }
}

/// Generator that always produces the same layout, for tests and replays.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    mines: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(
        &mut self,
        size: Coord2,
        mine_count: CellCount,
        safe_region: &SafeRegion,
    ) -> Result<Board> {
        let board = Board::from_mine_coords(size, &self.mines)?;

        if board.mine_count() != mine_count {
            return Err(GameError::InvalidConfig(
                "fixed layout does not match the requested mine count",
            ));
        }
        if let Some(coords) = board.iter_mines().find(|&pos| safe_region.contains(pos)) {
            log::warn!("Fixed layout has a mine at {coords:?} inside the safe region");
            return Err(GameError::InvalidConfig(
                "fixed layout places a mine inside the safe region",
            ));
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_region_is_clipped_square() {
        let region = SafeRegion::around((0, 0), 2, (10, 10));
        assert_eq!(
            region.iter().collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );

        let region = SafeRegion::around((5, 5), 3, (10, 10));
        assert_eq!(region.len(), 25);
        assert!(region.contains((3, 7)));
        assert!(!region.contains((2, 5)));
    }

    #[test]
    fn fixed_generator_rejects_mine_in_safe_region() {
        let mut generator = FixedBoardGenerator::new([(0, 0)]);
        let safe = SafeRegion::around((1, 1), 2, (3, 3));

        assert!(matches!(
            generator.generate((3, 3), 1, &safe),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(generator.generate((3, 3), 1, &SafeRegion::none()).is_ok());
    }

    #[test]
    fn fixed_generator_checks_mine_count() {
        let mut generator = FixedBoardGenerator::new([(0, 0), (2, 2)]);
        assert!(generator.generate((3, 3), 3, &SafeRegion::none()).is_err());
    }
}
