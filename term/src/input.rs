use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use sapper_core::{Coord, Coord2, DifficultyConfig, InputEvent, InputSource};
use thiserror::Error;
use web_time::Instant;

const TICK: Duration = Duration::from_secs(1);

pub const HELP: &str = "\
commands:
  r ROW COL    reveal a cell
  f ROW COL    toggle a flag
  easy | medium | hard
               switch difficulty
  new          start over
  q            quit";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command {0:?}, try `help`")]
    UnknownCommand(String),
    #[error("`{0}` needs a row and a column")]
    MissingCoords(&'static str),
    #[error("{0:?} is not a valid coordinate")]
    BadCoord(String),
}

/// Parses one line of player input; blank lines and `help` yield no event.
pub fn parse_command(line: &str) -> Result<Option<InputEvent>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let event = match command.to_ascii_lowercase().as_str() {
        "r" | "reveal" => InputEvent::Reveal(parse_coords(&mut words, "reveal")?),
        "f" | "flag" => InputEvent::ToggleFlag(parse_coords(&mut words, "flag")?),
        "easy" => InputEvent::SelectDifficulty(DifficultyConfig::easy()),
        "medium" => InputEvent::SelectDifficulty(DifficultyConfig::medium()),
        "hard" => InputEvent::SelectDifficulty(DifficultyConfig::hard()),
        "n" | "new" => InputEvent::Reset,
        "q" | "quit" | "exit" => InputEvent::Quit,
        "h" | "help" | "?" => {
            println!("{HELP}");
            return Ok(None);
        }
        _ => return Err(ParseError::UnknownCommand(command.to_owned())),
    };
    Ok(Some(event))
}

fn parse_coords<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<Coord2, ParseError> {
    let mut next = || -> Result<Coord, ParseError> {
        let word = words.next().ok_or(ParseError::MissingCoords(command))?;
        word.parse()
            .map_err(|_| ParseError::BadCoord(word.to_owned()))
    };
    Ok((next()?, next()?))
}

/// Player commands from stdin, interleaved with one `Tick` per second.
///
/// Stdin is read on a helper thread so that ticks keep coming while the
/// player thinks.
pub struct StdinInput {
    lines: Receiver<String>,
    next_tick: Instant,
}

impl StdinInput {
    pub fn spawn() -> Self {
        let (sender, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if sender.send(line).is_err() {
                    break;
                }
            }
            log::debug!("stdin closed");
        });

        Self {
            lines,
            next_tick: Instant::now() + TICK,
        }
    }
}

impl InputSource for StdinInput {
    fn next_event(&mut self) -> Option<InputEvent> {
        loop {
            let now = Instant::now();
            if now >= self.next_tick {
                self.next_tick += TICK;
                return Some(InputEvent::Tick);
            }

            match self.lines.recv_timeout(self.next_tick - now) {
                Ok(line) => match parse_command(&line) {
                    Ok(Some(event)) => return Some(event),
                    Ok(None) => {}
                    Err(err) => eprintln!("{err}"),
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!(parse_command("r 3 4"), Ok(Some(InputEvent::Reveal((3, 4)))));
        assert_eq!(
            parse_command("  FLAG 0 19 "),
            Ok(Some(InputEvent::ToggleFlag((0, 19))))
        );
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!(
            parse_command("hard"),
            Ok(Some(InputEvent::SelectDifficulty(DifficultyConfig::hard())))
        );
        assert_eq!(parse_command("new"), Ok(Some(InputEvent::Reset)));
        assert_eq!(parse_command("q"), Ok(Some(InputEvent::Quit)));
        assert_eq!(parse_command(""), Ok(None));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(parse_command("r 3"), Err(ParseError::MissingCoords("reveal")));
        assert_eq!(
            parse_command("f x 1"),
            Err(ParseError::BadCoord("x".to_owned()))
        );
        assert_eq!(
            parse_command("r -1 2"),
            Err(ParseError::BadCoord("-1".to_owned()))
        );
        assert_eq!(
            parse_command("dig 1 1"),
            Err(ParseError::UnknownCommand("dig".to_owned()))
        );
    }
}
