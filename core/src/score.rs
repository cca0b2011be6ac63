use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Best time in whole seconds; 0 means no recorded score.
pub type Score = u32;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Score file {path:?} could not be accessed")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Score file {path:?} does not hold a number: {content:?}")]
    Corrupt { path: PathBuf, content: String },
}

/// Persistence of the single best (lowest) completion time.
pub trait ScoreStore {
    fn high_score(&self) -> Score;

    /// Records `score` when none is stored yet or it beats the stored one.
    /// Returns whether anything was written.
    fn persist_if_better(&mut self, score: Score) -> Result<bool, StoreError> {
        let best = self.high_score();
        if best == 0 || score < best {
            self.write(score)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn reset(&mut self) -> Result<(), StoreError> {
        self.write(0)
    }

    fn write(&mut self, score: Score) -> Result<(), StoreError>;
}

/// Keeps the score in memory only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    best: Score,
}

impl MemoryScoreStore {
    pub fn new(best: Score) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn high_score(&self) -> Score {
        self.best
    }

    fn write(&mut self, score: Score) -> Result<(), StoreError> {
        self.best = score;
        Ok(())
    }
}

/// Plain-text file holding one integer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Score, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        // last non-empty line holds the score
        let last = content.lines().rev().find(|line| !line.trim().is_empty());
        match last {
            None => Ok(0),
            Some(line) => line.trim().parse().map_err(|_| StoreError::Corrupt {
                path: self.path.clone(),
                content: line.to_owned(),
            }),
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn high_score(&self) -> Score {
        match self.read() {
            Ok(score) => score,
            Err(StoreError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::debug!("No score file at {:?} yet", self.path);
                0
            }
            Err(err) => {
                log::warn!("{err}, treating high score as 0");
                0
            }
        }
    }

    fn write(&mut self, score: Score) -> Result<(), StoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
