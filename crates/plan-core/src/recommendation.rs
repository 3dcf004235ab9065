//! Deployment recommendation produced by the planner
//!
//! A recommendation is built fresh per request and never mutated after
//! construction; it is handed to the caller (typically a response assembler)
//! and discarded.

use crate::profile::VirtualizationProfile;
use crate::types::{DeploymentMode, GpuModel, PerformanceTier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-model slice of a capacity calculation, in inventory input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuAllocation {
    /// GPU model this entry covers
    pub gpu_model: GpuModel,

    /// Number of physical cards of this model
    pub gpu_count: u32,

    /// Profile used on this model, if any resolved
    pub profile: Option<String>,

    /// VM instances each card contributes (0 when no profile resolved)
    pub instances_per_gpu: u32,

    /// Total instances across all cards of this model
    pub total_instances: u32,
}

impl GpuAllocation {
    /// An allocation contributing nothing, recorded so partial results stay
    /// visible in the breakdown
    pub fn zero(gpu_model: GpuModel, gpu_count: u32) -> Self {
        Self {
            gpu_model,
            gpu_count,
            profile: None,
            instances_per_gpu: 0,
            total_instances: 0,
        }
    }
}

/// Storage media class for a recommended VM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StorageType {
    Ssd,
    Nvme,
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::Ssd => write!(f, "SSD"),
            StorageType::Nvme => write!(f, "NVMe"),
        }
    }
}

/// Concrete VM sizing derived from the selected profile and workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmConfiguration {
    /// vGPU profile assigned to each VM (None for passthrough)
    pub vgpu_profile: Option<String>,

    /// Deployment mode this configuration assumes
    pub deployment_mode: DeploymentMode,

    /// vCPUs per VM
    pub vcpu_count: u32,

    /// GPU memory visible to each VM in GB
    pub gpu_memory_gb: u32,

    /// System RAM per VM in GB, rounded to a standard size
    pub system_ram_gb: u32,

    /// Storage capacity per VM in GB, rounded to a standard size
    pub storage_capacity_gb: u32,

    /// Storage media class
    pub storage_type: StorageType,

    /// Performance tier of the configuration
    pub performance_tier: PerformanceTier,

    /// Users this configuration can serve concurrently
    pub concurrent_users: u32,
}

/// Structured output of the capacity planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRecommendation {
    /// Profile backing the recommendation; None when passthrough or when the
    /// selection varies per model (see the breakdown)
    pub selected_profile: Option<VirtualizationProfile>,

    /// Recommended deployment mode
    pub deployment_mode: DeploymentMode,

    /// Total deployable VM count across the inventory
    pub total_vm_capacity: u32,

    /// Per-model contributions, in inventory input order
    pub per_gpu_breakdown: Vec<GpuAllocation>,

    /// Advisory messages for the caller to surface verbatim
    pub warnings: Vec<String>,

    /// Concrete VM sizing, when one could be derived
    pub vm_configuration: Option<VmConfiguration>,
}

impl DeploymentRecommendation {
    /// Build a virtualized recommendation from computed parts
    pub fn virtualized(
        selected_profile: Option<VirtualizationProfile>,
        total_vm_capacity: u32,
        per_gpu_breakdown: Vec<GpuAllocation>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            selected_profile,
            deployment_mode: DeploymentMode::Virtualized,
            total_vm_capacity,
            per_gpu_breakdown,
            warnings,
            vm_configuration: None,
        }
    }

    /// Build a passthrough recommendation: each card hosts one workload
    pub fn passthrough(
        total_gpus: u32,
        per_gpu_breakdown: Vec<GpuAllocation>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            selected_profile: None,
            deployment_mode: DeploymentMode::Passthrough,
            total_vm_capacity: total_gpus,
            per_gpu_breakdown,
            warnings,
            vm_configuration: None,
        }
    }

    /// Attach a VM configuration (consumed at construction time only)
    pub fn with_vm_configuration(mut self, vm: VmConfiguration) -> Self {
        self.vm_configuration = Some(vm);
        self
    }
}
