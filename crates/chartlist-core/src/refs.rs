//! OCI chart reference collection
//!
//! Lists `<registry>/<chart-name>:<version>` for the chart whose
//! `Chart.yaml` name matches the configured target. Dependency charts living
//! next to it are not listed.
//!
//! Unlike image collection this is strict: a descriptor that fails to parse
//! aborts the run, since a missing reference would silently break
//! packaging further down the pipeline.

use std::fmt;

use crate::chart::discover_charts;
use crate::config::ChartListConfig;
use crate::error::Result;
use crate::version::VersionSource;

/// An OCI chart reference without the `oci://` scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRef {
    pub registry: String,
    pub name: String,
    pub version: String,
}

impl fmt::Display for ChartRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.registry, self.name, self.version)
    }
}

/// Resolve the chart version, then list references for every matching chart
///
/// The version is resolved before the charts directory is read, so a
/// failed `make get-version` is reported without touching any chart.
/// Matches are returned in directory order; more than one match is not an
/// error.
pub fn collect_chart_refs(
    config: &ChartListConfig,
    version: &dyn VersionSource,
) -> Result<Vec<ChartRef>> {
    let version = version.resolve()?;
    tracing::debug!("Chart version {}", version);

    let mut refs = Vec::new();
    for chart in discover_charts(&config.charts_dir)? {
        if !chart.has_descriptor() {
            continue;
        }

        let descriptor = chart.load_descriptor()?;
        let name = descriptor.trimmed_name();
        if name != config.chart_name {
            tracing::debug!("Skipping chart '{}' at {}", name, chart.path.display());
            continue;
        }

        tracing::info!("Found chart {} at {}", name, chart.path.display());
        refs.push(ChartRef {
            registry: config.registry.clone(),
            name: name.to_string(),
            version: version.clone(),
        });
    }

    Ok(refs)
}
