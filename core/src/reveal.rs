use std::collections::VecDeque;

use crate::*;

/// Cells changed by one call to [`reveal`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reveal {
    /// Newly revealed cells, in the order they were opened.
    pub newly_revealed: Vec<Coord2>,
    pub hit_mine: bool,
    /// Flags returned to covered by the leftover-flag sweep.
    pub swept_flags: Vec<Coord2>,
}

impl Reveal {
    pub fn has_update(&self) -> bool {
        !self.newly_revealed.is_empty() || !self.swept_flags.is_empty()
    }
}

/// Opens `start`, flooding through zero cells.
///
/// A mine at `start` discloses every mine on the board and reports
/// `hit_mine`. Flagged cells are never opened.
pub fn reveal(board: &Board, exposure: &mut ExposureMap, start: Coord2) -> Result<Reveal> {
    let start = board.validate_coords(start)?;

    match exposure.get(start) {
        ExposureState::Flagged => Err(InvalidOperation::RevealFlagged(start).into()),
        ExposureState::Revealed => Ok(sweep_leftover_flags(board, exposure, start)),
        ExposureState::Covered if board[start].is_mine => Ok(disclose_mines(board, exposure)),
        ExposureState::Covered if board[start].adjacent > 0 => {
            exposure.set(start, ExposureState::Revealed);
            Ok(Reveal {
                newly_revealed: vec![start],
                ..Default::default()
            })
        }
        ExposureState::Covered => Ok(flood_fill(board, exposure, start)),
    }
}

fn disclose_mines(board: &Board, exposure: &mut ExposureMap) -> Reveal {
    let mut newly_revealed = Vec::new();
    for pos in board.iter_mines() {
        if !exposure.set(pos, ExposureState::Revealed).is_revealed() {
            newly_revealed.push(pos);
        }
    }

    Reveal {
        newly_revealed,
        hit_mine: true,
        swept_flags: Vec::new(),
    }
}

fn flood_fill(board: &Board, exposure: &mut ExposureMap, start: Coord2) -> Reveal {
    let mut newly_revealed = Vec::new();
    let mut pending = VecDeque::from([start]);

    while let Some(coords) = pending.pop_front() {
        if exposure.get(coords) != ExposureState::Covered {
            continue;
        }

        exposure.set(coords, ExposureState::Revealed);
        newly_revealed.push(coords);

        if board[coords].adjacent > 0 {
            continue;
        }

        pending.extend(board.iter_neighbors(coords).filter(|&pos| {
            exposure.get(pos) == ExposureState::Covered && !board.contains_mine(pos)
        }));
    }

    log::trace!("Flood fill from {start:?} opened {} cells", newly_revealed.len());
    Reveal {
        newly_revealed,
        ..Default::default()
    }
}

/// Clearing an already open zero cell once nothing but flags remains covered
/// hands every flag back to the player.
///
/// That state only happens after over-flagging: with one flag per mine the
/// game would already be won.
fn sweep_leftover_flags(board: &Board, exposure: &mut ExposureMap, start: Coord2) -> Reveal {
    let only_flags_left =
        exposure.revealed_count() + exposure.flagged_count() == board.total_cells();

    if !board[start].is_zero() || !only_flags_left || exposure.flagged_count() == 0 {
        return Reveal::default();
    }

    let swept_flags: Vec<_> = exposure.iter_flagged().collect();
    for &coords in &swept_flags {
        exposure.set(coords, ExposureState::Covered);
    }
    log::debug!("Swept {} leftover flags", swept_flags.len());

    Reveal {
        swept_flags,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn revealed(exposure: &ExposureMap) -> Vec<Coord2> {
        exposure.iter_revealed().collect()
    }

    #[test]
    fn zero_region_opens_with_numbered_border() {
        let board = board((5, 5), &[(0, 0), (0, 1), (4, 4)]);
        let mut exposure = ExposureMap::new(board.size());

        let result = reveal(&board, &mut exposure, (2, 2)).unwrap();

        assert!(!result.hit_mine);
        assert_eq!(result.newly_revealed.first(), Some(&(2, 2)));
        assert_eq!(usize::from(exposure.revealed_count()), 22);
        assert_eq!(result.newly_revealed.len(), 22);
        for mine in [(0, 0), (0, 1), (4, 4)] {
            assert_eq!(exposure.get(mine), ExposureState::Covered);
        }
        assert_eq!(exposure.get((1, 1)), ExposureState::Revealed);
        assert_eq!(board[(1, 1)].adjacent, 2);
    }

    #[test]
    fn numbered_cell_opens_alone() {
        let board = board((3, 3), &[(0, 0)]);
        let mut exposure = ExposureMap::new(board.size());

        let result = reveal(&board, &mut exposure, (1, 1)).unwrap();

        assert_eq!(result.newly_revealed, vec![(1, 1)]);
        assert_eq!(revealed(&exposure), vec![(1, 1)]);
    }

    #[test]
    fn mine_discloses_every_mine_and_nothing_else() {
        let board = board((3, 3), &[(0, 0), (2, 2)]);
        let mut exposure = ExposureMap::new(board.size());
        exposure.set((2, 2), ExposureState::Flagged);
        exposure.set((0, 2), ExposureState::Flagged);
        exposure.set((1, 1), ExposureState::Revealed);

        let result = reveal(&board, &mut exposure, (0, 0)).unwrap();

        assert!(result.hit_mine);
        assert_eq!(result.newly_revealed, vec![(0, 0), (2, 2)]);
        assert_eq!(exposure.get((0, 2)), ExposureState::Flagged);
        assert_eq!(exposure.get((1, 0)), ExposureState::Covered);
        assert_eq!(revealed(&exposure), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn flood_fill_skips_flags() {
        let board = board((1, 5), &[]);
        let mut exposure = ExposureMap::new(board.size());
        exposure.set((0, 2), ExposureState::Flagged);

        let result = reveal(&board, &mut exposure, (0, 0)).unwrap();

        assert_eq!(result.newly_revealed, vec![(0, 0), (0, 1)]);
        assert_eq!(exposure.get((0, 2)), ExposureState::Flagged);
        assert_eq!(exposure.get((0, 3)), ExposureState::Covered);
    }

    #[test]
    fn flagged_start_is_rejected_untouched() {
        let board = board((2, 2), &[(1, 1)]);
        let mut exposure = ExposureMap::new(board.size());
        exposure.set((1, 1), ExposureState::Flagged);
        let before = exposure.clone();

        assert_eq!(
            reveal(&board, &mut exposure, (1, 1)),
            Err(GameError::InvalidOperation(InvalidOperation::RevealFlagged((1, 1))))
        );
        assert_eq!(exposure, before);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let board = board((2, 2), &[]);
        let mut exposure = ExposureMap::new(board.size());

        assert_eq!(
            reveal(&board, &mut exposure, (2, 0)),
            Err(GameError::OutOfBounds((2, 0)))
        );
        assert!(!exposure.has_progress());
    }

    #[test]
    fn revealed_cell_is_a_no_op() {
        let board = board((2, 2), &[(1, 1)]);
        let mut exposure = ExposureMap::new(board.size());
        reveal(&board, &mut exposure, (0, 0)).unwrap();

        let again = reveal(&board, &mut exposure, (0, 0)).unwrap();

        assert!(!again.has_update());
    }

    #[test]
    fn leftover_flags_are_swept_when_only_flags_remain() {
        let board = board((2, 3), &[(0, 2)]);
        let mut exposure = ExposureMap::new(board.size());
        exposure.set((0, 2), ExposureState::Flagged);
        exposure.set((1, 2), ExposureState::Flagged);
        reveal(&board, &mut exposure, (0, 0)).unwrap();
        assert_eq!(exposure.revealed_count(), 4);

        let result = reveal(&board, &mut exposure, (1, 0)).unwrap();

        assert_eq!(result.swept_flags, vec![(0, 2), (1, 2)]);
        assert_eq!(exposure.flagged_count(), 0);
        assert_eq!(exposure.get((1, 2)), ExposureState::Covered);
    }

    #[test]
    fn flags_stay_while_covered_cells_remain() {
        let board = board((1, 5), &[(0, 4)]);
        let mut exposure = ExposureMap::new(board.size());
        exposure.set((0, 4), ExposureState::Flagged);
        exposure.set((0, 2), ExposureState::Flagged);
        reveal(&board, &mut exposure, (0, 0)).unwrap();

        let result = reveal(&board, &mut exposure, (0, 0)).unwrap();

        assert!(!result.has_update());
        assert_eq!(exposure.flagged_count(), 2);
    }
}
