//! Write the OCI reference of the main chart to `charts.list`:
//! `<registry>/<chart-name>:<version>` (no `oci://` prefix).
//!
//! Only the target chart is listed, not its dependency charts. The version
//! comes from `VERSION` when set, otherwise from `make get-version` run in
//! the repository root.

use chartlist::{
    Result, exit_with, init_logging, non_empty_path, parse_args, report_written, resolve_repo_root,
};
use chartlist_core::config::non_blank;
use chartlist_core::{ChartListConfig, collect_chart_refs, version_source, write_list};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "collect-chart-oci-refs")]
#[command(version)]
#[command(about = "List the OCI reference of the main Helm chart", long_about = None)]
struct Cli {
    /// Repository root (default: two levels above this binary's directory)
    #[arg(long, env = "REPO_ROOT")]
    repo_root: Option<PathBuf>,

    /// Charts directory (default: <repo root>/charts)
    #[arg(long, env = "CHARTS_DIR")]
    charts_dir: Option<PathBuf>,

    /// Output file (default: <repo root>/charts.list)
    #[arg(short, long, env = "OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// OCI charts registry without scheme, e.g. ghcr.io/owner/charts (required)
    #[arg(long, env = "OCI_CHARTS_REGISTRY")]
    registry: Option<String>,

    /// Chart version (default: output of `make get-version`)
    #[arg(long, env = "VERSION")]
    chart_version: Option<String>,

    /// Name of the chart to list (default: pelagia-ceph)
    #[arg(long, env = "CHART_NAME")]
    chart_name: Option<String>,

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

    // Registry is validated before anything is read or executed
    let mut config = ChartListConfig::for_repo(&repo_root, cli.registry.as_deref())?;
    if let Some(charts_dir) = non_empty_path(cli.charts_dir) {
        config.charts_dir = charts_dir;
    }
    if let Some(output_file) = non_empty_path(cli.output_file) {
        config.output_file = output_file;
    }
    if let Some(chart_name) = non_blank(cli.chart_name.as_deref()) {
        config.chart_name = chart_name;
    }

    let version = version_source(cli.chart_version.as_deref(), &repo_root);
    tracing::debug!("Resolving chart version from {}", version.describe());

    let refs = collect_chart_refs(&config, version.as_ref())?;
    let lines: Vec<String> = refs.iter().map(ToString::to_string).collect();
    write_list(&config.output_file, lines.as_slice())?;
    report_written(lines.len(), "chart ref(s)", &config.output_file);
    Ok(())
}
