//! Serde schema for catalog YAML documents

use plan_core::{GpuSpec, VirtualizationProfile};
use serde::{Deserialize, Serialize};

/// Top-level catalog file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Physical GPU specifications
    pub gpus: Vec<GpuSpecRecord>,

    /// Virtualization profiles, each referencing a GPU model by name
    pub profiles: Vec<VirtualizationProfile>,
}

/// A GPU specification plus the alternate spellings it is known by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuSpecRecord {
    #[serde(flatten)]
    pub spec: GpuSpec,

    /// Alternate names accepted by inventory parsing (e.g. "RTX 6000 Ada")
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl CatalogDocument {
    /// Parse a catalog document from YAML text
    pub fn from_yaml(text: &str) -> plan_core::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
