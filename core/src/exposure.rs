use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExposureState {
    #[default]
    Covered,
    Revealed,
    Flagged,
}

impl ExposureState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Exposure state of every cell, keyed by coordinate.
///
/// The revealed and flagged counters are kept in step with the grid on every
/// write, so they never disagree with it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExposureMap {
    cells: Array2<ExposureState>,
    revealed: CellCount,
    flagged: CellCount,
}

impl ExposureMap {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            revealed: 0,
            flagged: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.size();
        coords.0 < rows && coords.1 < cols
    }

    pub fn get(&self, coords: Coord2) -> ExposureState {
        self.cells[coords.to_nd_index()]
    }

    /// Writes `state` and returns the previous one.
    pub fn set(&mut self, coords: Coord2, state: ExposureState) -> ExposureState {
        let previous = core::mem::replace(&mut self.cells[coords.to_nd_index()], state);
        self.adjust(previous, -1);
        self.adjust(state, 1);
        previous
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged
    }

    /// Whether the player has revealed or flagged anything yet.
    pub fn has_progress(&self) -> bool {
        self.revealed > 0 || self.flagged > 0
    }

    pub fn iter_flagged(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_in_state(ExposureState::Flagged)
    }

    pub fn iter_revealed(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_in_state(ExposureState::Revealed)
    }

    fn iter_in_state(&self, wanted: ExposureState) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(move |&(_, &state)| state == wanted)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    fn adjust(&mut self, state: ExposureState, delta: i8) {
        let counter = match state {
            ExposureState::Covered => return,
            ExposureState::Revealed => &mut self.revealed,
            ExposureState::Flagged => &mut self.flagged,
        };
        *counter = counter.saturating_add_signed(delta.into());
    }
}
