//! Play and compare adversarial searchers on pursuit layouts.
//!
//! The protagonist is driven by minimax, alpha-beta or expectimax; ghosts
//! move at random. Games run in parallel and can be saved as a JSON report.

mod play;

use adversary_core::Game;
use adversary_search::{
    games::{Layout, Pursuit, PursuitEvaluator},
    Algorithm, Search, SearchConfig,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use play::{play_game, GameRecord, Summary};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Adversarial search arena.
#[derive(Parser)]
#[command(name = "adversary-arena")]
#[command(about = "Play pursuit games with minimax, alpha-beta and expectimax searchers")]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a batch of games and report the results.
    Play {
        /// Search algorithm: minimax, alphabeta or expectimax.
        #[arg(short, long, default_value = "alphabeta")]
        algorithm: String,

        /// Search depth in rounds.
        #[arg(short, long, default_value = "2")]
        depth: usize,

        /// Evaluation function: score or heuristic.
        #[arg(short, long, default_value = "heuristic")]
        eval: String,

        /// Built-in layout name (small, open) or path to a layout file.
        #[arg(short, long, default_value = "small")]
        layout: String,

        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Random seed for the ghosts; game i uses seed + i.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Protagonist moves before a game is called unfinished.
        #[arg(long, default_value = "200")]
        max_moves: usize,

        /// Write a JSON report to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run every algorithm once on the initial state.
    Compare {
        /// Search depth in rounds.
        #[arg(short, long, default_value = "2")]
        depth: usize,

        /// Evaluation function: score or heuristic.
        #[arg(short, long, default_value = "heuristic")]
        eval: String,

        /// Built-in layout name (small, open) or path to a layout file.
        #[arg(short, long, default_value = "small")]
        layout: String,
    },
}

/// JSON report written by `play --output`.
#[derive(Serialize)]
struct Report<'a> {
    algorithm: Algorithm,
    depth: usize,
    evaluator: &'a str,
    layout: &'a str,
    seed: u64,
    summary: &'a Summary,
    games: &'a [GameRecord],
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Resolve a built-in layout name, falling back to reading a file.
fn load_game(layout: &str) -> Result<Pursuit> {
    if let Ok(named) = Layout::named(layout) {
        return Ok(Pursuit::new(named));
    }
    let text = fs::read_to_string(Path::new(layout))
        .with_context(|| format!("'{}' is neither a built-in layout nor a readable file", layout))?;
    text.parse::<Pursuit>()
        .with_context(|| format!("Failed to parse layout file {:?}", layout))
}

#[allow(clippy::too_many_arguments)]
fn cmd_play(
    algorithm: &str,
    depth: usize,
    eval: &str,
    layout: &str,
    games: usize,
    seed: u64,
    max_moves: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let algorithm: Algorithm = algorithm.parse()?;
    let evaluator: PursuitEvaluator = eval.parse()?;
    let game = load_game(layout)?;
    let searcher = algorithm
        .searcher::<Pursuit, _>(SearchConfig::with_depth(depth), evaluator)
        .context("Invalid search configuration")?;

    println!(
        "Playing {} games on '{}' ({} ghosts) with {} depth {} and {} evaluation...",
        games,
        layout,
        game.num_agents() - 1,
        algorithm,
        depth,
        evaluator
    );

    let start = Instant::now();
    let records = (0..games as u64)
        .into_par_iter()
        .map(|i| play_game(&game, searcher.as_ref(), seed.wrapping_add(i), max_moves))
        .collect::<adversary_core::Result<Vec<_>>>()
        .context("Search failed during play")?;
    let elapsed = start.elapsed();

    let summary = Summary::from_records(&records);
    info!(
        games = summary.games,
        wins = summary.wins,
        elapsed_ms = elapsed.as_millis() as u64,
        "batch finished"
    );

    println!("\n================================================");
    println!("RESULTS");
    println!("================================================");
    let percent = |n: usize| if summary.games == 0 { 0.0 } else { n as f64 / summary.games as f64 * 100.0 };
    println!("Wins:       {} ({:.1}%)", summary.wins, summary.win_rate() * 100.0);
    println!("Losses:     {} ({:.1}%)", summary.losses, percent(summary.losses));
    println!("Unfinished: {} ({:.1}%)", summary.unfinished, percent(summary.unfinished));
    println!("------------------------------------------------");
    println!("Average score:    {:.1}", summary.average_score);
    println!("Average length:   {:.1} moves", summary.average_moves);
    println!("States per move:  {:.1}", summary.nodes_per_move);
    println!("Completed in {:.2}s", elapsed.as_secs_f64());

    if let Some(path) = output {
        let report = Report {
            algorithm,
            depth,
            evaluator: evaluator.name(),
            layout,
            seed,
            summary: &summary,
            games: &records,
        };
        let file = File::create(&path).with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)
            .with_context(|| format!("Failed to write report to {:?}", path))?;
        println!("Report saved to: {:?}", path);
    }

    Ok(())
}

fn cmd_compare(depth: usize, eval: &str, layout: &str) -> Result<()> {
    let evaluator: PursuitEvaluator = eval.parse()?;
    let game = load_game(layout)?;
    let state = game.initial_state();
    let config = SearchConfig::with_depth(depth);

    println!("{}\n", game.render(&state));
    println!(
        "{:<12} {:>12} {:>8} {:>10} {:>8} {:>10}",
        "algorithm", "value", "action", "states", "cutoffs", "time"
    );
    for algorithm in Algorithm::ALL {
        let searcher = algorithm.searcher::<Pursuit, _>(config.clone(), evaluator)?;
        let start = Instant::now();
        let result = searcher
            .search(&game, &state)
            .with_context(|| format!("{} search failed", algorithm))?;
        let action = result.action.map_or_else(|| "-".to_string(), |a| a.to_string());
        println!(
            "{:<12} {:>12.2} {:>8} {:>10} {:>8} {:>9.1}ms",
            algorithm.name(),
            result.value,
            action,
            result.stats.nodes,
            result.stats.cutoffs,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play {
            algorithm,
            depth,
            eval,
            layout,
            games,
            seed,
            max_moves,
            output,
        } => cmd_play(&algorithm, depth, &eval, &layout, games, seed, max_moves, output),

        Commands::Compare { depth, eval, layout } => cmd_compare(depth, &eval, &layout),
    }
}
