//! Chartlist Core - artifact listing for Helm chart repositories
//!
//! This crate provides the building blocks of the two CI listing tools:
//! - `Node`: Typed YAML tree with a recursive mapping walk
//! - `ChartDir`: Chart package discovery under a charts directory
//! - `ImageRef`: Container image references found in `values.yaml`
//! - `ChartRef`: OCI chart references for the target chart
//! - `VersionSource`: Chart version resolution (explicit or `make get-version`)
//! - `write_list`: Deterministic list output

pub mod chart;
pub mod config;
pub mod error;
pub mod images;
pub mod node;
pub mod output;
pub mod refs;
pub mod version;

pub use chart::{CHART_DESCRIPTOR, ChartDescriptor, ChartDir, VALUES_FILE, discover_charts};
pub use config::{ChartListConfig, DEFAULT_CHART_NAME, ImageListConfig};
pub use error::{CoreError, Result};
pub use images::{ChartFailure, ImageRef, ImageReport, collect_images, images_in_values};
pub use node::{Mapping, Node, Scalar};
pub use output::{render_list, write_list};
pub use refs::{ChartRef, collect_chart_refs};
pub use version::{CommandVersion, ExplicitVersion, VersionSource, version_source};
