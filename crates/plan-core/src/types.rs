//! Core type definitions for vgpuplan

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier for a physical GPU SKU (e.g. "A40", "L40S", "A100-80GB")
///
/// Stores the canonical casing as authored in the catalog, but compares and
/// hashes on a trimmed, case-folded normalization so that user-supplied names
/// like "a40 " resolve to the same model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GpuModel(String);

impl GpuModel {
    /// Create a new GpuModel, trimming surrounding whitespace
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    /// Get the canonical string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the normalized form used for comparisons and map keys
    pub fn normalized(&self) -> String {
        self.0.trim().to_ascii_lowercase()
    }
}

impl PartialEq for GpuModel {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for GpuModel {}

impl Hash for GpuModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for GpuModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GpuModel {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for GpuModel {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// How a workload is placed on physical GPUs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Multiple VMs share a card through vGPU slicing
    Virtualized,
    /// One workload owns the whole card
    Passthrough,
}

impl std::str::FromStr for DeploymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "virtualized" | "vgpu" => Ok(DeploymentMode::Virtualized),
            "passthrough" => Ok(DeploymentMode::Passthrough),
            _ => Err(format!("Unknown deployment mode: {}", s)),
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentMode::Virtualized => write!(f, "virtualized"),
            DeploymentMode::Passthrough => write!(f, "passthrough"),
        }
    }
}

/// Instance ceiling selection for a vGPU profile
///
/// Equal-size mode requires every slice on a card to use the same profile and
/// allows the higher ceiling; mixed-size mode permits heterogeneous slices at
/// a reduced ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileMode {
    EqualSize,
    MixedSize,
}

impl Default for ProfileMode {
    fn default() -> Self {
        ProfileMode::EqualSize
    }
}

impl std::str::FromStr for ProfileMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equal" | "equal_size" | "equal-size" => Ok(ProfileMode::EqualSize),
            "mixed" | "mixed_size" | "mixed-size" => Ok(ProfileMode::MixedSize),
            _ => Err(format!("Unknown profile mode: {}", s)),
        }
    }
}

impl fmt::Display for ProfileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileMode::EqualSize => write!(f, "equal_size"),
            ProfileMode::MixedSize => write!(f, "mixed_size"),
        }
    }
}

/// Performance tier derived from per-instance GPU memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Entry,
    Standard,
    HighPerformance,
    MaximumPerformance,
}

impl PerformanceTier {
    /// Classify a per-instance memory allocation in GB
    pub fn for_instance_memory(memory_gb: u32) -> Self {
        if memory_gb <= 4 {
            PerformanceTier::Entry
        } else if memory_gb <= 12 {
            PerformanceTier::Standard
        } else if memory_gb <= 24 {
            PerformanceTier::HighPerformance
        } else {
            PerformanceTier::MaximumPerformance
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::Entry => write!(f, "Entry"),
            PerformanceTier::Standard => write!(f, "Standard"),
            PerformanceTier::HighPerformance => write!(f, "High Performance"),
            PerformanceTier::MaximumPerformance => write!(f, "Maximum Performance"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_gpu_model_normalization() {
        let a = GpuModel::new("A40");
        let b = GpuModel::new("  a40 ");

        assert_eq!(a, b);
        assert_eq!(a.as_str(), "A40");
        assert_eq!(b.as_str(), "a40");
        assert_eq!(b.normalized(), "a40");
    }

    #[test]
    fn test_gpu_model_as_map_key() {
        let mut counts: HashMap<GpuModel, u32> = HashMap::new();
        counts.insert(GpuModel::new("L40S"), 2);

        assert_eq!(counts.get(&GpuModel::new("l40s")), Some(&2));
        assert_eq!(counts.get(&GpuModel::new("L40")), None);
    }

    #[test]
    fn test_deployment_mode_parsing() {
        assert_eq!(
            "vgpu".parse::<DeploymentMode>().unwrap(),
            DeploymentMode::Virtualized
        );
        assert_eq!(
            "PASSTHROUGH".parse::<DeploymentMode>().unwrap(),
            DeploymentMode::Passthrough
        );
        assert!("bare-metal".parse::<DeploymentMode>().is_err());
    }

    #[test]
    fn test_profile_mode_parsing() {
        assert_eq!("equal".parse::<ProfileMode>().unwrap(), ProfileMode::EqualSize);
        assert_eq!("mixed_size".parse::<ProfileMode>().unwrap(), ProfileMode::MixedSize);
        assert_eq!(ProfileMode::default(), ProfileMode::EqualSize);
    }

    #[test]
    fn test_performance_tier_boundaries() {
        assert_eq!(PerformanceTier::for_instance_memory(1), PerformanceTier::Entry);
        assert_eq!(PerformanceTier::for_instance_memory(4), PerformanceTier::Entry);
        assert_eq!(PerformanceTier::for_instance_memory(8), PerformanceTier::Standard);
        assert_eq!(PerformanceTier::for_instance_memory(12), PerformanceTier::Standard);
        assert_eq!(
            PerformanceTier::for_instance_memory(24),
            PerformanceTier::HighPerformance
        );
        assert_eq!(
            PerformanceTier::for_instance_memory(48),
            PerformanceTier::MaximumPerformance
        );
    }
}
