//! Container image collection from chart values
//!
//! Every mapping under the top-level `images` key of a chart's
//! `values.yaml` that holds both `repository` and `tag` describes an image.
//! `tag` is either a plain string or a mapping of named variants:
//!
//! ```yaml
//! images:
//!   ceph:
//!     repository: mirantis/ceph
//!     tag:
//!       latest: v19.2.3
//!       squid: v19.2.3
//!       tentacle: v20.1.0
//!   controller:
//!     repository: mirantis/pelagia
//!     tag: 1.0.0
//! ```
//!
//! Image nodes may contain further image nodes, so the walk always continues
//! below a match.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::chart::discover_charts;
use crate::config::ImageListConfig;
use crate::error::{CoreError, Result};
use crate::node::{Mapping, Node};

/// A container image reference, `[registry/]repository:tag`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub registry: Option<String>,
    pub repository: String,
    pub tag: String,
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.registry {
            Some(registry) => write!(f, "{}/{}:{}", registry, self.repository, self.tag),
            None => write!(f, "{}:{}", self.repository, self.tag),
        }
    }
}

/// Collect image references from a parsed `values.yaml`
///
/// Returns nothing when the document has no top-level `images` mapping.
/// Order follows the document; callers dedupe and sort.
pub fn images_in_values(values: &Node, registry: Option<&str>) -> Vec<ImageRef> {
    let Some(images) = values.get("images") else {
        return Vec::new();
    };

    let mut refs = Vec::new();
    images.visit_mappings(&mut |map| image_node_refs(map, registry, &mut refs));
    refs
}

/// References declared directly by one mapping, if it is an image node
fn image_node_refs(map: &Mapping, registry: Option<&str>, out: &mut Vec<ImageRef>) {
    let (Some(repository), Some(tag)) = (map.get("repository"), map.get("tag")) else {
        return;
    };
    let Some(repository) = repository.scalar_text() else {
        return;
    };
    let repository = repository.trim();
    if repository.is_empty() {
        return;
    }

    let mut push = |tag: &str| {
        let tag = tag.trim();
        if !tag.is_empty() {
            out.push(ImageRef {
                registry: registry.map(str::to_string),
                repository: repository.to_string(),
                tag: tag.to_string(),
            });
        }
    };

    match tag {
        Node::String(tag) => push(tag.as_str()),
        Node::Mapping(variants) => variants.values().filter_map(Node::as_str).for_each(push),
        Node::Sequence(_) | Node::Scalar(_) => {}
    }
}

/// A chart whose values could not be read
#[derive(Debug)]
pub struct ChartFailure {
    pub chart: PathBuf,
    pub error: CoreError,
}

/// Result of an image collection run
#[derive(Debug, Default)]
pub struct ImageReport {
    /// Unique rendered references, sorted
    pub images: BTreeSet<String>,

    /// Charts skipped because their values failed to load
    pub failures: Vec<ChartFailure>,
}

impl ImageReport {
    /// Sorted references, ready for [`crate::write_list`]
    pub fn lines(&self) -> Vec<&str> {
        self.images.iter().map(String::as_str).collect()
    }
}

/// Walk every chart under `config.charts_dir` and gather its images
///
/// A chart needs both `Chart.yaml` and `values.yaml` to be considered.
/// Values that fail to load are logged and recorded in the report; the
/// remaining charts are still processed. Only a missing or unreadable
/// charts directory is fatal.
pub fn collect_images(config: &ImageListConfig) -> Result<ImageReport> {
    let mut report = ImageReport::default();
    let registry = config.registry.as_deref();

    for chart in discover_charts(&config.charts_dir)? {
        if !chart.has_descriptor() || !chart.has_values() {
            tracing::debug!("Skipping {}: not a chart", chart.path.display());
            continue;
        }

        tracing::info!("Processing chart: {}", chart.path.display());
        match chart.load_values() {
            Ok(values) => {
                let found = images_in_values(&values, registry);
                tracing::debug!("{} image reference(s) in {}", found.len(), chart.path.display());
                report.images.extend(found.iter().map(ImageRef::to_string));
            }
            Err(error) => {
                tracing::warn!("{}", error);
                report.failures.push(ChartFailure {
                    chart: chart.path,
                    error,
                });
            }
        }
    }

    Ok(report)
}
