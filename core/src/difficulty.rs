use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Custom,
}

impl Difficulty {
    pub const PRESETS: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Custom => "Custom",
        }
    }

    /// Preset configuration, `None` for [`Difficulty::Custom`].
    pub const fn config(self) -> Option<DifficultyConfig> {
        match self {
            Self::Easy => Some(DifficultyConfig::easy()),
            Self::Medium => Some(DifficultyConfig::medium()),
            Self::Hard => Some(DifficultyConfig::hard()),
            Self::Custom => None,
        }
    }
}

/// Board shape and rules of one difficulty level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub difficulty: Difficulty,
    pub rows: Coord,
    pub cols: Coord,
    pub mine_count: CellCount,
    /// Pixel size of one tile, for renderers.
    pub tile_size: u16,
    /// Cells closer than this (Chebyshev) to the first click never hold a mine.
    pub safe_radius: Coord,
}

impl DifficultyConfig {
    pub const fn easy() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            rows: 10,
            cols: 10,
            mine_count: 10,
            tile_size: 50,
            safe_radius: 2,
        }
    }

    pub const fn medium() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            rows: 15,
            cols: 15,
            mine_count: 35,
            tile_size: 34,
            safe_radius: 3,
        }
    }

    pub const fn hard() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            rows: 20,
            cols: 20,
            mine_count: 80,
            tile_size: 26,
            safe_radius: 4,
        }
    }

    pub fn custom(
        (rows, cols): Coord2,
        mine_count: CellCount,
        tile_size: u16,
        safe_radius: Coord,
    ) -> Result<Self> {
        let config = Self {
            difficulty: Difficulty::Custom,
            rows,
            cols,
            mine_count,
            tile_size,
            safe_radius,
        };
        config.validate()?;
        Ok(config)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    /// Largest safe region a first click can produce, reached away from the edges.
    pub fn max_safe_region_len(&self) -> CellCount {
        let side = (2 * CellCount::from(self.safe_radius)).saturating_sub(1);
        let rows = side.min(self.rows.into());
        let cols = side.min(self.cols.into());
        rows * cols
    }

    /// Checks that every possible first click leaves room for all the mines.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidConfig("board must have at least one cell"));
        }
        if self.safe_radius == 0 {
            return Err(GameError::InvalidConfig(
                "safe radius must cover the first click",
            ));
        }

        let free = self.total_cells() - self.max_safe_region_len();
        if self.mine_count > free {
            return Err(GameError::GenerationPrecondition {
                mines: self.mine_count.into(),
                free: free.into(),
            });
        }
        Ok(())
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self::easy()
    }
}
