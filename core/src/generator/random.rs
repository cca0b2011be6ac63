use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Uniform placement over every cell outside the safe region.
///
/// Seeded, so the same seed replays the same sequence of boards.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(
        &mut self,
        size: Coord2,
        mine_count: CellCount,
        safe_region: &SafeRegion,
    ) -> Result<Board> {
        check_size(size)?;

        let free_cells = safe_region.free_cells(size);
        if usize::from(mine_count) > free_cells.len() {
            log::warn!(
                "Cannot place {} mines, only {} cells outside the safe region",
                mine_count,
                free_cells.len()
            );
            return Err(GameError::GenerationPrecondition {
                mines: mine_count.into(),
                free: free_cells.len() as u32,
            });
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for coords in free_cells.choose_multiple(&mut self.rng, mine_count.into()) {
            mine_mask[coords.to_nd_index()] = true;
        }

        let board = Board::from_mine_mask(&mine_mask);
        log::debug!(
            "Generated {}x{} board with {} mines, {} safe cells kept clear",
            size.0,
            size.1,
            board.mine_count(),
            safe_region.len()
        );
        Ok(board)
    }
}
