mod io;
mod provenance;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polyscatter::{assign_points, jitter_layers, JitterCfg, PointLayer};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Jitter points uniformly within their enclosing polygons")]
struct Cmd {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Jitter a point table and write it next to a provenance sidecar
    Jitter(JitterArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct JitterArgs {
    /// CSV with `x`, `y` columns
    #[arg(long)]
    points: PathBuf,
    /// JSON polygon layer (`crs` plus `polygons`)
    #[arg(long)]
    polygons: PathBuf,
    /// Output table (`.csv` or `.parquet`)
    #[arg(long)]
    out: PathBuf,
    /// Generator seed; a random one is drawn and recorded when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// CRS tag of the points; must match the polygon layer when given
    #[arg(long)]
    points_crs: Option<String>,
}

/// Counts reported after a jitter run.
#[derive(Debug, PartialEq, Eq)]
struct JitterSummary {
    points: usize,
    jittered: usize,
    seed: u64,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Jitter(args) => jitter(&args).map(|_| ()),
        Action::Report => report(),
    }
}

fn jitter(args: &JitterArgs) -> Result<JitterSummary> {
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(
        points = %args.points.display(),
        polygons = %args.polygons.display(),
        out = %args.out.display(),
        seed,
        "jitter"
    );

    let polygons = io::read_polygons(&args.polygons)?;
    let points = PointLayer {
        crs: args.points_crs.clone(),
        points: io::read_points(&args.points)?,
    };
    let assignments = assign_points(&points.points, &polygons.polygons);
    let jittered = jitter_layers(&points, &polygons, &JitterCfg::seeded(seed))
        .context("jittering points")?;

    io::write_points(&args.out, &jittered.points, &assignments)?;
    let payload = provenance::Payload::new(serde_json::json!({
        "seed": seed,
        "crs": polygons.crs,
        "points_crs": args.points_crs,
        "polygon_count": polygons.polygons.len(),
    }))
    .with_input(&args.points)
    .with_input(&args.polygons);
    let sidecar = provenance::write_sidecar(&args.out, payload)?;

    let summary = JitterSummary {
        points: jittered.points.len(),
        jittered: jittered.points.iter().filter(|p| p.is_some()).count(),
        seed,
    };
    tracing::info!(
        points = summary.points,
        jittered = summary.jittered,
        unresolved = summary.points - summary.jittered,
        sidecar = %sidecar.display(),
        "jitter done"
    );
    Ok(summary)
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "polyscatter_version": polyscatter::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
