//! Collect container images from the `images` section of every chart's
//! `values.yaml` and write them, unique and sorted, to `images.list`.

use chartlist::{
    Result, exit_with, init_logging, non_empty_path, parse_args, report_written, resolve_repo_root,
};
use chartlist_core::{ImageListConfig, collect_images, write_list};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "collect-chart-images")]
#[command(version)]
#[command(about = "List container images referenced by Helm chart values", long_about = None)]
struct Cli {
    /// Repository root (default: two levels above this binary's directory)
    #[arg(long, env = "REPO_ROOT")]
    repo_root: Option<PathBuf>,

    /// Charts directory (default: <repo root>/charts)
    #[arg(long, env = "CHARTS_DIR")]
    charts_dir: Option<PathBuf>,

    /// Output file (default: <repo root>/images.list)
    #[arg(short, long, env = "OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Registry prefix for every image, e.g. registry.example.com
    #[arg(long, env = "IMAGE_REGISTRY")]
    registry: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    miette::set_panic_hook();

    let cli: Cli = parse_args();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        exit_with(err);
    }
}

fn run(cli: Cli) -> Result<()> {
    let repo_root = resolve_repo_root(cli.repo_root);
    let mut config = ImageListConfig::for_repo(&repo_root).with_registry(cli.registry.as_deref());
    if let Some(charts_dir) = non_empty_path(cli.charts_dir) {
        config.charts_dir = charts_dir;
    }
    if let Some(output_file) = non_empty_path(cli.output_file) {
        config.output_file = output_file;
    }

    let report = collect_images(&config)?;
    if !report.failures.is_empty() {
        tracing::warn!("{} chart(s) skipped, see warnings above", report.failures.len());
    }

    let lines = report.lines();
    write_list(&config.output_file, lines.as_slice())?;
    report_written(lines.len(), "unique image(s)", &config.output_file);
    Ok(())
}
