use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Discrete input surfaced by the host, one at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Reveal(Coord2),
    ToggleFlag(Coord2),
    SelectDifficulty(DifficultyConfig),
    Reset,
    Quit,
    /// One real-time second has passed.
    Tick,
}

/// What the event loop should do after an event was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Idle,
    Updated,
    Quit,
}

pub trait InputSource {
    /// Blocks until the next event; `None` once input is exhausted.
    fn next_event(&mut self) -> Option<InputEvent>;
}

pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// What a renderer draws for a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Covered,
    Flagged,
    Revealed(u8),
    Mine,
}

/// Read-only copy of a session, taken between events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub difficulty: DifficultyConfig,
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub mine_count: CellCount,
    pub flag_count: CellCount,
    pub flags_remaining: i32,
    pub elapsed_seconds: u32,
    pub state: SessionState,
    pub triggered_mine: Option<Coord2>,
    pub high_score: Score,
    pub final_score: Option<Score>,
}

impl Snapshot {
    pub fn new(session: &GameSession, high_score: Score) -> Self {
        let size = session.size();
        let mut cells: Array2<CellView> = Array2::default(size.to_nd_index());
        for coords in iter_coords(size) {
            cells[coords.to_nd_index()] = session.cell_view(coords);
        }

        Self {
            difficulty: session.difficulty(),
            size,
            cells,
            mine_count: session.mine_count(),
            flag_count: session.flag_count(),
            flags_remaining: session.flags_remaining(),
            elapsed_seconds: session.elapsed_seconds(),
            state: session.state(),
            triggered_mine: session.triggered_mine(),
            high_score,
            final_score: session.final_score(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}

/// Feeds events from `input` into `game` until quit, rendering after every
/// change.
pub fn run<G, S, I, R>(game: &mut Game<G, S>, input: &mut I, renderer: &mut R)
where
    G: BoardGenerator,
    S: ScoreStore,
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
{
    renderer.render(&game.snapshot());

    while let Some(event) = input.next_event() {
        match game.apply(event) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Idle) => {}
            Ok(Flow::Updated) => renderer.render(&game.snapshot()),
            Err(err @ (GameError::GenerationPrecondition { .. } | GameError::InvalidConfig(_))) => {
                log::error!("Rejected configuration in {event:?}: {err}");
            }
            Err(err) => log::debug!("Ignored {event:?}: {err}"),
        }
    }
    log::debug!("Event loop finished");
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    struct Scripted(VecDeque<InputEvent>);

    impl InputSource for Scripted {
        fn next_event(&mut self) -> Option<InputEvent> {
            self.0.pop_front()
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<Snapshot>);

    impl Renderer for Recorder {
        fn render(&mut self, snapshot: &Snapshot) {
            self.0.push(snapshot.clone());
        }
    }

    fn game() -> Game<FixedBoardGenerator, MemoryScoreStore> {
        Game::new(
            DifficultyConfig::custom((5, 5), 3, 20, 1).unwrap(),
            FixedBoardGenerator::new([(0, 0), (0, 1), (4, 4)]),
            MemoryScoreStore::default(),
        )
        .unwrap()
    }

    #[test]
    fn loop_renders_changes_and_skips_rejected_events() {
        use InputEvent::*;

        let mut game = game();
        let mut input = Scripted(VecDeque::from([
            Tick,
            ToggleFlag((0, 0)),
            Reveal((1, 0)),
            ToggleFlag((0, 0)),
            Tick,
            Reveal((9, 9)),
            Reveal((2, 2)),
            Quit,
            Reveal((3, 3)),
        ]));
        let mut renderer = Recorder::default();

        run(&mut game, &mut input, &mut renderer);

        let states: Vec<_> = renderer.0.iter().map(|snap| snap.state).collect();
        assert_eq!(
            states,
            vec![
                SessionState::NotStarted,
                SessionState::Playing,
                SessionState::Playing,
                SessionState::Playing,
                SessionState::Won,
            ]
        );

        let last = renderer.0.last().unwrap();
        assert_eq!(last.elapsed_seconds, 1);
        assert_eq!(last.final_score, Some(1));
        assert_eq!(last.high_score, 1);
        assert_eq!(last.cell_at((0, 0)), CellView::Flagged);
        assert_eq!(last.cell_at((1, 1)), CellView::Revealed(2));
        assert_eq!(last.flags_remaining, 2);
        assert_eq!(input.0.front(), Some(&Reveal((3, 3))));
    }

    #[test]
    fn snapshot_shows_numbers_and_mines_after_loss() {
        let mut game = game();
        game.reveal((1, 0)).unwrap();
        game.reveal((4, 4)).unwrap();

        let snapshot = game.snapshot();

        assert_eq!(snapshot.state, SessionState::Lost);
        assert_eq!(snapshot.triggered_mine, Some((4, 4)));
        assert_eq!(snapshot.cell_at((1, 0)), CellView::Revealed(2));
        assert_eq!(snapshot.cell_at((0, 1)), CellView::Mine);
        assert_eq!(snapshot.cell_at((2, 2)), CellView::Covered);
    }

    #[test]
    fn snapshot_serializes_for_external_renderers() {
        let snapshot = game().snapshot();

        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["state"], "NotStarted");
        assert_eq!(json["mine_count"], 3);
        assert_eq!(json["flags_remaining"], 3);
    }
}
