//! Capacity calculation
//!
//! Deterministic integer arithmetic turning an inventory and resolved
//! profiles into a total deployable VM count. Memory quantities are whole
//! GB throughout; nothing here rounds.
//!
//! Heterogeneous calculations are best-effort: a model that resolves no
//! profile contributes zero instances with a warning, and the rest of the
//! calculation proceeds. A multi-GPU request never fails wholesale.

use plan_catalog::ProfileCatalog;
use plan_core::{
    DeploymentRecommendation, Error, GpuAllocation, GpuInventory, GpuModel, ProfileMode, Result,
    VirtualizationProfile,
};
use tracing::{debug, warn};

/// Capacity arithmetic over a catalog
#[derive(Debug, Clone, Copy)]
pub struct CapacityCalculator<'a> {
    catalog: &'a ProfileCatalog,
}

impl<'a> CapacityCalculator<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self { catalog }
    }

    /// VM capacity of `count` identical cards under one profile:
    /// `count * profile.max_instances_per_gpu`
    pub fn homogeneous(
        &self,
        model: &GpuModel,
        profile: &VirtualizationProfile,
        count: u32,
    ) -> Result<u32> {
        if count == 0 {
            return Err(Error::validation("GPU count must be >= 1"));
        }
        if &profile.gpu_model != model {
            return Err(Error::validation(format!(
                "profile '{}' belongs to GPU model '{}', not '{}'",
                profile.name, profile.gpu_model, model
            )));
        }
        count
            .checked_mul(profile.max_instances_per_gpu)
            .ok_or_else(|| {
                Error::validation(format!(
                    "instance count for {} x '{}' exceeds the supported range",
                    count, profile.name
                ))
            })
    }

    /// Capacity across a heterogeneous inventory, resolving a profile per
    /// model through `selector` (typically a `best_fit` closure). Models for
    /// which the selector fails contribute zero instances with a warning;
    /// partial results are always returned.
    pub fn heterogeneous<F>(
        &self,
        inventory: &GpuInventory,
        selector: F,
    ) -> DeploymentRecommendation
    where
        F: Fn(&GpuModel) -> Result<VirtualizationProfile>,
    {
        let mut total = 0u64;
        let mut breakdown = Vec::with_capacity(inventory.len());
        let mut warnings = Vec::new();

        for entry in inventory {
            match selector(&entry.model) {
                Ok(profile) => match entry.count.checked_mul(profile.max_instances_per_gpu) {
                    Some(instances) => {
                        total += u64::from(instances);
                        breakdown.push(GpuAllocation {
                            gpu_model: entry.model.clone(),
                            gpu_count: entry.count,
                            profile: Some(profile.name.clone()),
                            instances_per_gpu: profile.max_instances_per_gpu,
                            total_instances: instances,
                        });
                    }
                    None => {
                        warn!(model = %entry.model, count = entry.count, "instance count overflows; contributing zero");
                        warnings.push(format!(
                            "instance count for {} x '{}' exceeds the supported range; '{}' contributes no capacity",
                            entry.count, profile.name, entry.model
                        ));
                        breakdown.push(GpuAllocation::zero(entry.model.clone(), entry.count));
                    }
                },
                Err(e) => {
                    warn!(model = %entry.model, error = %e, "no profile resolved; contributing zero");
                    warnings.push(format!(
                        "{}; '{}' contributes no capacity",
                        e, entry.model
                    ));
                    breakdown.push(GpuAllocation::zero(entry.model.clone(), entry.count));
                }
            }
        }

        let total = clamp_total(total, &mut warnings);
        debug!(total, models = breakdown.len(), "heterogeneous capacity computed");
        DeploymentRecommendation::virtualized(None, total, breakdown, warnings)
    }

    /// Capacity of an inventory under one named profile. Only models the
    /// profile belongs to contribute; others are recorded as zero with a
    /// warning. The profile name itself must exist in the catalog.
    pub fn with_profile(
        &self,
        inventory: &GpuInventory,
        profile_name: &str,
        mode: ProfileMode,
    ) -> Result<DeploymentRecommendation> {
        let profile = self
            .catalog
            .find_profile(profile_name)
            .ok_or_else(|| Error::not_found(format!("profile '{}' does not exist", profile_name)))?
            .clone();

        let per_gpu = profile.max_instances(mode);
        let mut total = 0u64;
        let mut breakdown = Vec::with_capacity(inventory.len());
        let mut warnings = Vec::new();

        for entry in inventory {
            if entry.model != profile.gpu_model {
                warnings.push(format!(
                    "profile '{}' is not valid for GPU model '{}'; contributing no capacity",
                    profile.name, entry.model
                ));
                breakdown.push(GpuAllocation::zero(entry.model.clone(), entry.count));
                continue;
            }
            match entry.count.checked_mul(per_gpu) {
                Some(instances) => {
                    total += u64::from(instances);
                    breakdown.push(GpuAllocation {
                        gpu_model: entry.model.clone(),
                        gpu_count: entry.count,
                        profile: Some(profile.name.clone()),
                        instances_per_gpu: per_gpu,
                        total_instances: instances,
                    });
                }
                None => {
                    warnings.push(format!(
                        "instance count for {} x '{}' exceeds the supported range; '{}' contributes no capacity",
                        entry.count, profile.name, entry.model
                    ));
                    breakdown.push(GpuAllocation::zero(entry.model.clone(), entry.count));
                }
            }
        }

        let total = clamp_total(total, &mut warnings);
        Ok(DeploymentRecommendation::virtualized(
            Some(profile),
            total,
            breakdown,
            warnings,
        ))
    }
}

/// Fold a widened running total back into the u32 capacity field. Totals
/// past `u32::MAX` are clamped with a warning, never wrapped.
pub(crate) fn clamp_total(total: u64, warnings: &mut Vec<String>) -> u32 {
    u32::try_from(total).unwrap_or_else(|_| {
        warnings.push("total VM capacity exceeds the supported range; clamped".to_string());
        u32::MAX
    })
}
