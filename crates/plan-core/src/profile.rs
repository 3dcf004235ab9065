//! Virtualization profile and physical GPU specification records
//!
//! These structures are the reference data the catalog serves: per-model
//! physical specifications and the officially supported slicing
//! configurations for each model.

use crate::types::{GpuModel, PerformanceTier, ProfileMode};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Physical specification of a GPU model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuSpec {
    /// GPU model identifier
    pub model: GpuModel,

    /// Total onboard memory in GB
    pub total_memory_gb: u32,

    /// Architecture name (e.g. "Ampere", "Ada Lovelace")
    pub architecture: String,

    /// Hard ceiling of vGPU instances the card supports
    pub max_vgpus_per_gpu: u32,

    /// Board power in Watts
    pub power_watts: u32,
}

impl GpuSpec {
    pub fn validate(&self) -> Result<()> {
        if self.total_memory_gb == 0 {
            return Err(Error::catalog(format!(
                "GPU '{}' has zero total memory",
                self.model
            )));
        }
        if self.max_vgpus_per_gpu == 0 {
            return Err(Error::catalog(format!(
                "GPU '{}' has zero max vGPU instances",
                self.model
            )));
        }
        Ok(())
    }
}

/// One officially supported slicing configuration for a GPU model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualizationProfile {
    /// Profile name, unique within its GPU model (e.g. "A40-8Q")
    pub name: String,

    /// Owning GPU model; a profile is meaningless without it
    pub gpu_model: GpuModel,

    /// Memory allocated to each virtual instance in GB
    pub memory_per_instance_gb: u32,

    /// Hard ceiling of concurrent VM instances per card (equal-size mode)
    pub max_instances_per_gpu: u32,

    /// Instance ceiling when mixed profile sizes share the card
    pub max_instances_mixed: u32,

    /// Intended use cases (e.g. "VDI", "AI inference")
    #[serde(default)]
    pub use_cases: Vec<String>,

    /// Minimum host driver version
    #[serde(default)]
    pub min_driver_version: String,
}

impl VirtualizationProfile {
    /// Get the normalized form of the profile name used for lookups
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_ascii_lowercase()
    }

    /// Instance ceiling for the given profile mode
    pub fn max_instances(&self, mode: ProfileMode) -> u32 {
        match mode {
            ProfileMode::EqualSize => self.max_instances_per_gpu,
            ProfileMode::MixedSize => self.max_instances_mixed,
        }
    }

    /// Performance tier implied by the per-instance memory allocation
    pub fn performance_tier(&self) -> PerformanceTier {
        PerformanceTier::for_instance_memory(self.memory_per_instance_gb)
    }

    /// Check the catalog-authoring invariant against the physical spec:
    /// the slices of a fully packed card must fit in its memory.
    pub fn check_against(&self, spec: &GpuSpec) -> Result<()> {
        if self.gpu_model != spec.model {
            return Err(Error::catalog(format!(
                "profile '{}' belongs to '{}', not '{}'",
                self.name, self.gpu_model, spec.model
            )));
        }
        if self.memory_per_instance_gb == 0 || self.max_instances_per_gpu == 0 {
            return Err(Error::catalog(format!(
                "profile '{}' has zero memory or instance count",
                self.name
            )));
        }
        if self.max_instances_mixed > self.max_instances_per_gpu {
            return Err(Error::catalog(format!(
                "profile '{}' mixed-size ceiling exceeds equal-size ceiling",
                self.name
            )));
        }
        let packed = self.memory_per_instance_gb * self.max_instances_per_gpu;
        if packed > spec.total_memory_gb {
            return Err(Error::catalog(format!(
                "profile '{}' packs {} GB onto '{}' which only has {} GB",
                self.name, packed, spec.model, spec.total_memory_gb
            )));
        }
        Ok(())
    }
}
