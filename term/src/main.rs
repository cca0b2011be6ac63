use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sapper_core::{DifficultyConfig, FileScoreStore, Game, RandomBoardGenerator};
use tracing_subscriber::filter::LevelFilter;

mod input;
mod render;

use input::{HELP, StdinInput};
use render::TextRenderer;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board to start on
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Easy)]
    difficulty: DifficultyArg,

    /// Where the best time is kept
    #[arg(long, default_value = "score.txt")]
    score_file: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for DifficultyConfig {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => DifficultyConfig::easy(),
            DifficultyArg::Medium => DifficultyConfig::medium(),
            DifficultyArg::Hard => DifficultyConfig::hard(),
        }
    }
}

fn level_filter(level: log::Level) -> LevelFilter {
    match level {
        log::Level::Error => LevelFilter::ERROR,
        log::Level::Warn => LevelFilter::WARN,
        log::Level::Info => LevelFilter::INFO,
        log::Level::Debug => LevelFilter::DEBUG,
        log::Level::Trace => LevelFilter::TRACE,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(log_level) = args.verbose.log_level() {
        tracing_subscriber::fmt()
            .with_max_level(level_filter(log_level))
            .with_writer(io::stderr)
            .init();
    }

    let generator = match args.seed {
        Some(seed) => RandomBoardGenerator::new(seed),
        None => RandomBoardGenerator::from_entropy(),
    };
    log::debug!("seed: {}", generator.seed());

    let scores = FileScoreStore::new(&args.score_file);
    let mut game = Game::new(args.difficulty.into(), generator, scores)
        .context("could not set up the first game")?;
    log::info!("best time read from {}", args.score_file.display());

    println!("{HELP}");
    let mut input = StdinInput::spawn();
    let mut renderer = TextRenderer::new(io::stdout());
    sapper_core::run(&mut game, &mut input, &mut renderer);

    log::debug!("App finished");
    Ok(())
}
