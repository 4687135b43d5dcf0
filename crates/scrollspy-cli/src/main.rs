//! Scrollspy - replay and debug tool for the header tracking engine
//!
//! Feeds recorded scroll sessions through the engine and renders the
//! threshold heuristic's internals and the resulting sidebar state, the
//! terminal counterpart of the in-page threshold debug overlay.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use scrollspy_core::{Replay, Scenario};

mod render;

/// Scrollspy - scroll session replay for the header tracking engine
#[derive(Parser)]
#[command(name = "scrollspy")]
#[command(about = "Replay scroll sessions through the header tracking engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario and print the tracker state after each step
    Replay {
        /// Scenario file (TOML, or JSON with a .json extension)
        scenario: PathBuf,

        /// Print the threshold debug readout for every step
        #[arg(long)]
        debug: bool,

        /// Emit step reports as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Print the sidebar tree a scenario's headings build
    Tree {
        /// Scenario file
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Replay {
            scenario,
            debug,
            json,
        } => replay(&scenario, debug, json),
        Commands::Tree { scenario } => tree(&scenario),
    }
}

fn replay(path: &Path, debug: bool, json: bool) -> Result<()> {
    let scenario = Scenario::load(path)?;
    debug!(steps = scenario.steps.len(), "scenario loaded");

    let mut replay = Replay::new(&scenario);
    if debug {
        replay.tracker_mut().enable_threshold_debug();
    }

    for (index, step) in scenario.steps.iter().enumerate() {
        let report = replay.run_step(step);
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            render::print_step(index, &report, replay.tracker(), debug);
        }
    }

    if !json {
        println!();
        render::print_tree(replay.tracker());
    }
    Ok(())
}

fn tree(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let replay = Replay::new(&scenario);
    render::print_tree(replay.tracker());
    Ok(())
}
