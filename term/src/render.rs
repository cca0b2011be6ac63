use std::io::{self, Write};

use sapper_core::{CellView, Renderer, SessionState, Snapshot};

/// Draws the board as plain text, one frame per visible change.
///
/// Frames that differ only by the clock are skipped so that a quiet player
/// does not get a fresh board every second.
pub struct TextRenderer<W> {
    out: W,
    last: Option<Snapshot>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn only_clock_moved(&self, snapshot: &Snapshot) -> bool {
        self.last.as_ref().is_some_and(|last| {
            last.state == snapshot.state
                && last.difficulty == snapshot.difficulty
                && last.high_score == snapshot.high_score
                && last.cells == snapshot.cells
        })
    }

    fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        let (rows, cols) = snapshot.size;
        let out = &mut self.out;

        write!(
            out,
            "{}  flags: {}  time: {}s",
            snapshot.difficulty.difficulty.name(),
            snapshot.flags_remaining,
            snapshot.elapsed_seconds,
        )?;
        if snapshot.high_score > 0 {
            write!(out, "  best: {}s", snapshot.high_score)?;
        }
        writeln!(out)?;

        write!(out, "   ")?;
        for col in 0..cols {
            write!(out, "{col:>3}")?;
        }
        writeln!(out)?;

        for row in 0..rows {
            write!(out, "{row:>3}")?;
            for col in 0..cols {
                let coords = (row, col);
                let triggered = snapshot.triggered_mine == Some(coords);
                let glyph = glyph(snapshot.cell_at(coords), triggered);
                write!(out, "{glyph:>3}")?;
            }
            writeln!(out)?;
        }

        match (snapshot.state, snapshot.final_score) {
            (SessionState::Won, Some(score)) => {
                writeln!(out, "cleared in {score}s, type `new` to play again")?
            }
            (SessionState::Lost, _) => writeln!(out, "boom! type `new` to play again")?,
            _ => {}
        }
        out.flush()
    }
}

fn glyph(cell: CellView, triggered: bool) -> char {
    match cell {
        CellView::Covered => '#',
        CellView::Flagged => 'F',
        CellView::Revealed(0) => '.',
        CellView::Revealed(n) => char::from_digit(n.into(), 10).unwrap_or('?'),
        CellView::Mine if triggered => 'X',
        CellView::Mine => '*',
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) {
        if self.only_clock_moved(snapshot) {
            return;
        }
        if let Err(err) = self.draw(snapshot) {
            log::warn!("failed to draw board: {err}");
        }
        self.last = Some(snapshot.clone());
    }
}
