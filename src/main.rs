use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use forcelayout::{
    graph::Graph,
    input::{parse_seconds, prompt_until_valid},
    loader::load_graph,
    renderer::{from_fn, Canvas, Throttled},
    simulator::SimulatorBuilder,
};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Lay out a graph by letting its nodes repel and its edges attract.
#[derive(Parser, Debug)]
#[command(name = "forcelayout", author, version, about, long_about = None)]
struct Cli {
    /// Graph description: node count followed by pairs of node indices.
    /// Prompted for when omitted.
    file: Option<PathBuf>,

    /// How long to run the simulation, in seconds. Prompted for when omitted.
    #[arg(short, long, value_parser = parse_seconds)]
    seconds: Option<Duration>,

    /// Repulsion constant between every pair of nodes.
    #[arg(long, default_value_t = 0.001)]
    repel: f64,

    /// Attraction constant along every edge.
    #[arg(long, default_value_t = 0.001)]
    attract: f64,

    /// Skip the repulsion of nodes sharing the exact same position
    /// instead of letting their positions become non-finite.
    #[arg(long)]
    guard_coincident: bool,

    /// Width of the drawing in characters.
    #[arg(long, default_value_t = 78)]
    width: usize,

    /// Height of the drawing in characters.
    #[arg(long, default_value_t = 24)]
    height: usize,

    /// Minimum time between two drawn frames, in milliseconds.
    #[arg(long, default_value_t = 34)]
    frame_interval_ms: u64,

    /// Only draw the final layout.
    #[arg(long)]
    no_draw: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::ERROR
    } else if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    welcome();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let mut graph = match &cli.file {
        Some(path) => load_graph(path).with_context(|| format!("loading {}", path.display()))?,
        None => prompt_until_valid(&mut input, &mut stdout, "Enter file name: ", |name| {
            load_graph(name.trim())
        })
        .context("reading the graph file name")?,
    };
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    graph.place_on_circle();

    let canvas = Canvas::new(io::stdout(), cli.width, cli.height).clear_screen(!cli.no_draw);
    let mut renderer = Throttled::new(canvas, Duration::from_millis(cli.frame_interval_ms));
    if !cli.no_draw {
        renderer.force_render(&graph)?;
    }

    let seconds = match cli.seconds {
        Some(seconds) => seconds,
        None => read_seconds(&mut input, &mut stdout)?,
    };

    let simulator = SimulatorBuilder::new()
        .repel_force(cli.repel)
        .attract_force(cli.attract)
        .guard_coincident(cli.guard_coincident)
        .build();

    let summary = if cli.no_draw {
        simulator.run_for(&mut graph, seconds, &mut from_fn(|_| Ok(())))?
    } else {
        simulator.run_for(&mut graph, seconds, &mut renderer)?
    };
    renderer.force_render(&graph)?;
    renderer.into_inner().into_inner().flush()?;

    info!(ticks = summary.ticks, elapsed = ?summary.elapsed, "layout finished");
    println!(
        "{} ticks in {:.2}s",
        summary.ticks,
        summary.elapsed.as_secs_f64()
    );
    print_positions(&graph, &mut stdout)?;
    Ok(())
}

fn welcome() {
    println!("Force-directed graph layout");
    println!("Nodes repel each other, edges pull their nodes together.");
    println!();
}

fn read_seconds<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Duration> {
    prompt_until_valid(input, output, "Enter the number of seconds: ", parse_seconds)
        .context("reading the number of seconds")
}

fn print_positions<W: Write>(graph: &Graph, out: &mut W) -> Result<()> {
    for (index, node) in graph.nodes().iter().enumerate() {
        writeln!(out, "{index}: {:.6} {:.6}", node.position.x, node.position.y)?;
    }
    Ok(())
}
