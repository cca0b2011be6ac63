use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from first click to win or loss.
///
/// The board does not exist until the first reveal, which generates it
/// around the clicked cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    difficulty: DifficultyConfig,
    board: Option<Board>,
    exposure: ExposureMap,
    state: SessionState,
    timer: Timer,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    pub fn new(difficulty: DifficultyConfig) -> Result<Self> {
        difficulty.validate()?;
        Ok(Self::new_unchecked(difficulty))
    }

    fn new_unchecked(difficulty: DifficultyConfig) -> Self {
        Self {
            difficulty,
            board: None,
            exposure: ExposureMap::new(difficulty.size()),
            state: SessionState::NotStarted,
            timer: Timer::default(),
            triggered_mine: None,
        }
    }

    pub fn difficulty(&self) -> DifficultyConfig {
        self.difficulty
    }

    pub fn size(&self) -> Coord2 {
        self.difficulty.size()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn exposure(&self) -> &ExposureMap {
        &self.exposure
    }

    pub fn exposure_at(&self, coords: Coord2) -> ExposureState {
        self.exposure.get(coords)
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.timer.elapsed_seconds()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mine_count(&self) -> CellCount {
        self.difficulty.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.exposure.flagged_count()
    }

    pub fn flags_remaining(&self) -> i32 {
        flags_remaining(self.difficulty.mine_count, &self.exposure)
    }

    /// Score shown on the end screen: the elapsed time on a win, 0 on a loss.
    pub fn final_score(&self) -> Option<Score> {
        match self.state {
            SessionState::Won => Some(self.elapsed_seconds()),
            SessionState::Lost => Some(0),
            SessionState::NotStarted | SessionState::Playing => None,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.exposure.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn handle_reveal<G>(&mut self, coords: Coord2, generator: &mut G) -> Result<RevealOutcome>
    where
        G: BoardGenerator + ?Sized,
    {
        let coords = self.validate_coords(coords)?;
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }

        let board = match &self.board {
            Some(board) => board,
            None => {
                let safe_region =
                    SafeRegion::around(coords, self.difficulty.safe_radius, self.size());
                let board =
                    generator.generate(self.size(), self.difficulty.mine_count, &safe_region)?;
                log::debug!("First reveal at {coords:?}, game started");
                self.state = SessionState::Playing;
                self.board.insert(board)
            }
        };

        let revealed = reveal(board, &mut self.exposure, coords)?;

        let outcome = if revealed.hit_mine {
            self.state = SessionState::Lost;
            self.triggered_mine = Some(coords);
            RevealOutcome::HitMine
        } else if self.exposure.revealed_count() == board.safe_cell_count() {
            self.state = SessionState::Won;
            RevealOutcome::Won
        } else if !revealed.swept_flags.is_empty() {
            RevealOutcome::FlagsSwept
        } else if revealed.has_update() {
            RevealOutcome::Revealed
        } else {
            RevealOutcome::NoChange
        };

        log::debug!(
            "Reveal {coords:?}: {outcome:?}, {} cells opened",
            revealed.newly_revealed.len()
        );
        Ok(outcome)
    }

    pub fn handle_flag_toggle(&mut self, coords: Coord2) -> Result<ExposureState> {
        let coords = self.validate_coords(coords)?;

        match self.state {
            SessionState::NotStarted => Err(InvalidOperation::NotStarted.into()),
            SessionState::Won | SessionState::Lost => Err(GameError::AlreadyEnded),
            SessionState::Playing => {
                let state = toggle_flag(&mut self.exposure, coords)?;
                log::debug!("Flag {coords:?}: {state:?}");
                Ok(state)
            }
        }
    }

    /// Advances the clock by one second if the game is under way.
    pub fn tick(&mut self) -> bool {
        self.timer
            .tick(self.state.is_playing() && self.exposure.has_progress())
    }

    pub fn cell_view(&self, coords: Coord2) -> CellView {
        match (self.exposure.get(coords), &self.board) {
            (ExposureState::Covered, _) => CellView::Covered,
            (ExposureState::Flagged, _) => CellView::Flagged,
            (ExposureState::Revealed, Some(board)) if board.contains_mine(coords) => {
                CellView::Mine
            }
            (ExposureState::Revealed, Some(board)) => CellView::Revealed(board[coords].adjacent),
            (ExposureState::Revealed, None) => CellView::Covered,
        }
    }
}

/// A session together with the generator feeding it boards and the store
/// keeping the best time.
#[derive(Debug)]
pub struct Game<G, S> {
    session: GameSession,
    generator: G,
    scores: S,
    high_score: Score,
}

impl<G: BoardGenerator, S: ScoreStore> Game<G, S> {
    pub fn new(difficulty: DifficultyConfig, generator: G, scores: S) -> Result<Self> {
        let session = GameSession::new(difficulty)?;
        let high_score = scores.high_score();
        Ok(Self {
            session,
            generator,
            scores,
            high_score,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn high_score(&self) -> Score {
        self.high_score
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let outcome = self.session.handle_reveal(coords, &mut self.generator)?;
        if outcome == RevealOutcome::Won {
            self.record_win();
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<ExposureState> {
        self.session.handle_flag_toggle(coords)
    }

    pub fn tick(&mut self) -> bool {
        self.session.tick()
    }

    /// Starts over with the same difficulty.
    pub fn reset(&mut self) {
        log::debug!("Reset {} game", self.session.difficulty.difficulty.name());
        self.session = GameSession::new_unchecked(self.session.difficulty);
    }

    /// Starts over with `config`, which is validated first, and clears the
    /// stored high score.
    pub fn switch_difficulty(&mut self, config: DifficultyConfig) -> Result<()> {
        self.session = GameSession::new(config)?;
        log::debug!(
            "Switched to {} ({}x{}, {} mines)",
            config.difficulty.name(),
            config.rows,
            config.cols,
            config.mine_count
        );

        if let Err(err) = self.scores.reset() {
            log::warn!("Could not reset high score: {err}");
        }
        self.high_score = self.scores.high_score();
        Ok(())
    }

    pub fn apply(&mut self, event: InputEvent) -> Result<Flow> {
        Ok(match event {
            InputEvent::Reveal(coords) => match self.reveal(coords)? {
                RevealOutcome::NoChange => Flow::Idle,
                _ => Flow::Updated,
            },
            InputEvent::ToggleFlag(coords) => {
                self.toggle_flag(coords)?;
                Flow::Updated
            }
            InputEvent::SelectDifficulty(config) if config == self.session.difficulty => {
                Flow::Idle
            }
            InputEvent::SelectDifficulty(config) => {
                self.switch_difficulty(config)?;
                Flow::Updated
            }
            InputEvent::Reset => {
                self.reset();
                Flow::Updated
            }
            InputEvent::Tick if self.tick() => Flow::Updated,
            InputEvent::Tick => Flow::Idle,
            InputEvent::Quit => Flow::Quit,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(&self.session, self.high_score)
    }

    fn record_win(&mut self) {
        let score = self.session.elapsed_seconds();
        match self.scores.persist_if_better(score) {
            Ok(true) => log::debug!("New best time: {score}s"),
            Ok(false) => {}
            Err(err) => log::warn!("Could not save score {score}: {err}"),
        }
        self.high_score = self.scores.high_score();
    }
}
