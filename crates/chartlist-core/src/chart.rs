//! Chart package discovery and descriptor loading

use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{CoreError, Result};
use crate::node::Node;

/// Chart descriptor file name
pub const CHART_DESCRIPTOR: &str = "Chart.yaml";

/// Chart values file name
pub const VALUES_FILE: &str = "values.yaml";

/// A chart package directory under the charts directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDir {
    pub path: PathBuf,
}

impl ChartDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.path.join(CHART_DESCRIPTOR)
    }

    pub fn values_path(&self) -> PathBuf {
        self.path.join(VALUES_FILE)
    }

    pub fn has_descriptor(&self) -> bool {
        self.descriptor_path().is_file()
    }

    pub fn has_values(&self) -> bool {
        self.values_path().is_file()
    }

    /// Load and parse `Chart.yaml`
    pub fn load_descriptor(&self) -> Result<ChartDescriptor> {
        ChartDescriptor::from_file(self.descriptor_path())
    }

    /// Load and parse `values.yaml` into a typed tree
    pub fn load_values(&self) -> Result<Node> {
        read_yaml(&self.values_path())
    }
}

/// The fields of `Chart.yaml` the collectors read
///
/// Only `name` is interpreted. Everything else in the descriptor is
/// ignored, so descriptors carrying unknown keys still load.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartDescriptor {
    /// Chart name
    #[serde(default)]
    pub name: Option<String>,
}

impl ChartDescriptor {
    /// Load a descriptor from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| CoreError::InvalidDescriptor {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse a descriptor from YAML
    ///
    /// A blank document is a descriptor without a name.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let mut value: serde_yaml::Value = if yaml.trim().is_empty() {
            serde_yaml::Value::Null
        } else {
            serde_yaml::from_str(yaml)?
        };
        value.apply_merge()?;
        match value {
            serde_yaml::Value::Null => Ok(Self::default()),
            serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value),
            _ => Err(serde::de::Error::custom("chart descriptor must be a mapping")),
        }
    }

    /// Trimmed chart name, empty when missing
    pub fn trimmed_name(&self) -> &str {
        self.name.as_deref().map(str::trim).unwrap_or_default()
    }
}

/// List immediate subdirectories of `charts_dir`, sorted by name
///
/// Symlinks pointing at directories are included. Plain files are skipped;
/// whether a directory actually holds a chart is up to the caller.
pub fn discover_charts(charts_dir: &Path) -> Result<Vec<ChartDir>> {
    if !charts_dir.is_dir() {
        return Err(CoreError::ChartsDirNotFound {
            path: charts_dir.to_path_buf(),
        });
    }

    let mut charts = Vec::new();
    for entry in WalkDir::new(charts_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.path().is_dir() {
            charts.push(ChartDir::new(entry.path()));
        }
    }
    Ok(charts)
}

pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CoreError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_yaml(path: &Path) -> Result<Node> {
    let content = read_to_string(path)?;
    Node::from_yaml(&content).map_err(|source| CoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
