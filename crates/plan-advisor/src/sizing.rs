//! VM sizing heuristics
//!
//! Derives a concrete per-VM hardware configuration (vCPUs, system RAM,
//! storage) from the GPU memory footprint. RAM and storage round up to
//! standard hypervisor sizes.

use plan_core::{
    AdvisorConfig, DeploymentMode, GpuSpec, PerformanceTier, StorageType, VirtualizationProfile,
    VmConfiguration,
};

const RAM_SIZES_GB: &[u32] = &[32, 64, 96, 128, 192, 256, 384, 512, 768, 1024];
const STORAGE_SIZES_GB: &[u32] = &[256, 512, 1024, 2048, 4096, 8192];
const OS_STORAGE_GB: u32 = 100;
const WORKSPACE_STORAGE_GB: u32 = 200;
const RAM_OVERHEAD_GB: u32 = 16;

/// Recommended vCPUs for a given per-VM GPU memory allocation
pub fn vcpus_for_memory(gpu_memory_gb: u32) -> u32 {
    if gpu_memory_gb <= 4 {
        4
    } else if gpu_memory_gb <= 8 {
        8
    } else if gpu_memory_gb <= 16 {
        16
    } else if gpu_memory_gb <= 24 {
        24
    } else {
        32
    }
}

/// Recommended system RAM: twice the larger of GPU and workload memory,
/// plus OS overhead, rounded up to a standard size
pub fn system_ram_gb(gpu_memory_gb: u32, workload_memory_gb: u32) -> u32 {
    let base = gpu_memory_gb.max(workload_memory_gb) * 2 + RAM_OVERHEAD_GB;
    round_to_standard(base, RAM_SIZES_GB)
}

/// Recommended storage: OS + model artifact + dataset + workspace, rounded
/// up to a standard size
pub fn storage_capacity_gb(config: &AdvisorConfig) -> u32 {
    let base = OS_STORAGE_GB + config.model_size_gb + config.dataset_size_gb + WORKSPACE_STORAGE_GB;
    round_to_standard(base, STORAGE_SIZES_GB)
}

/// NVMe for the upper performance tiers, SSD otherwise
pub fn storage_type_for(tier: PerformanceTier) -> StorageType {
    match tier {
        PerformanceTier::HighPerformance | PerformanceTier::MaximumPerformance => StorageType::Nvme,
        _ => StorageType::Ssd,
    }
}

fn round_to_standard(value: u32, sizes: &[u32]) -> u32 {
    sizes
        .iter()
        .copied()
        .find(|&size| value <= size)
        .unwrap_or_else(|| sizes.last().copied().unwrap_or(value))
}

/// Size a VM around a virtualization profile
pub fn vm_for_profile(
    profile: &VirtualizationProfile,
    workload_memory_gb: u32,
    concurrent_users: u32,
    config: &AdvisorConfig,
) -> VmConfiguration {
    let tier = profile.performance_tier();
    VmConfiguration {
        vgpu_profile: Some(profile.name.clone()),
        deployment_mode: DeploymentMode::Virtualized,
        vcpu_count: vcpus_for_memory(profile.memory_per_instance_gb),
        gpu_memory_gb: profile.memory_per_instance_gb,
        system_ram_gb: system_ram_gb(profile.memory_per_instance_gb, workload_memory_gb),
        storage_capacity_gb: storage_capacity_gb(config),
        storage_type: storage_type_for(tier),
        performance_tier: tier,
        concurrent_users,
    }
}

/// Size a VM that owns a whole card
pub fn vm_for_passthrough(
    spec: &GpuSpec,
    workload_memory_gb: u32,
    concurrent_users: u32,
    config: &AdvisorConfig,
) -> VmConfiguration {
    VmConfiguration {
        vgpu_profile: None,
        deployment_mode: DeploymentMode::Passthrough,
        vcpu_count: vcpus_for_memory(spec.total_memory_gb),
        gpu_memory_gb: spec.total_memory_gb,
        system_ram_gb: system_ram_gb(spec.total_memory_gb, workload_memory_gb),
        storage_capacity_gb: storage_capacity_gb(config),
        storage_type: StorageType::Nvme,
        performance_tier: PerformanceTier::MaximumPerformance,
        concurrent_users,
    }
}
