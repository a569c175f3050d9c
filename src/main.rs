// Command line front end for the generator and solver.
// Levels are read and printed in the usual text format:
// '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target, ' ' floor.

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use rand::prelude::*;
use PuzzleEngine::clock::SystemClock;
use PuzzleEngine::console_interface::try_parse_level;
use PuzzleEngine::generator::{GeneratorConfig, PuzzleGenerator};
use PuzzleEngine::state_graph::{solve, SolverConfig};

/// Generate and solve box-pushing puzzles.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate puzzles and print them
    Generate {
        /// JSON file with a generator configuration; missing fields use defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        width: Option<usize>,

        #[arg(long)]
        height: Option<usize>,

        #[arg(short, long)]
        boxes: Option<usize>,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of puzzles to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Print puzzles as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Solve a level read from a text file
    Solve {
        level: PathBuf,

        #[arg(short, long, default_value_t = 2000)]
        time_limit_ms: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match args.command {
        Command::Generate { config, width, height, boxes, seed, count, json } => {
            let mut generator_config = match config {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
                None => GeneratorConfig::default(),
            };
            if let Some(width) = width {
                generator_config.width = width..=width;
            }
            if let Some(height) = height {
                generator_config.height = height..=height;
            }
            if let Some(boxes) = boxes {
                generator_config.boxes = boxes..=boxes;
            }
            run_generate(&generator_config, seed, count, json)
        }
        Command::Solve { level, time_limit_ms } => run_solve(level, time_limit_ms),
    }
}

fn run_generate(
    config: &GeneratorConfig,
    seed: Option<u64>,
    count: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let clock = SystemClock::new();
    let mut generator = PuzzleGenerator::new(config);

    for _ in 0..count {
        let generated = generator.generate(&mut rng, &clock);
        if json {
            println!("{}", serde_json::to_string_pretty(&generated.puzzle)?);
            continue;
        }

        println!("{}", generated.puzzle.render());
        match &generated.solution {
            Some(solution) => println!(
                "attempts: {} | {}",
                generated.attempts,
                solution.stats.to_human_string()
            ),
            None => println!("attempts: {} | fallback layout", generated.attempts),
        }
        println!();
    }
    Ok(())
}

fn run_solve(level: PathBuf, time_limit_ms: u64) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&level)?;
    let (game, shared) = try_parse_level(&text)?;
    let config = SolverConfig { time_limit_ms, ..SolverConfig::default() };
    let clock = SystemClock::new();

    info!("solving {}", level.display());
    let solution = solve(&shared, &game, &config, &clock)?;
    println!("{}", solution.stats.to_human_string());
    for (index, push) in solution.moves.iter().enumerate() {
        let direction = push
            .direction()
            .map(|d| format!("{:?}", d))
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{:>3}: push ({}, {}) {} from ({}, {})",
            index + 1, push.from.i, push.from.j, direction, push.player_at.i, push.player_at.j
        );
    }
    Ok(())
}
