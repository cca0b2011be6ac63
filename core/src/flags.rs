use crate::*;

/// Flips `coords` between covered and flagged, returning the new state.
pub fn toggle_flag(exposure: &mut ExposureMap, coords: Coord2) -> Result<ExposureState> {
    if !exposure.contains(coords) {
        return Err(GameError::OutOfBounds(coords));
    }

    let next = match exposure.get(coords) {
        ExposureState::Revealed => return Err(InvalidOperation::FlagRevealed(coords).into()),
        ExposureState::Covered => ExposureState::Flagged,
        ExposureState::Flagged => ExposureState::Covered,
    };
    exposure.set(coords, next);
    Ok(next)
}

/// Flags still to place; goes negative once the player over-flags.
pub fn flags_remaining(mine_count: CellCount, exposure: &ExposureMap) -> i32 {
    i32::from(mine_count) - i32::from(exposure.flagged_count())
}
