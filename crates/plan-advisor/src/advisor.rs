//! Deployment mode advice
//!
//! Decides virtualized sharing versus dedicated passthrough for a workload
//! on a GPU model. The decision is terminal on first evaluation: a
//! sufficient profile exists and the workload virtualizes, or no profile's
//! per-instance memory meets the requirement and the workload must own the
//! whole card. No state is retained across calls.

use plan_catalog::ProfileCatalog;
use plan_core::{DeploymentMode, Error, GpuModel, Result, VirtualizationProfile};
use serde::Serialize;
use tracing::debug;

/// Outcome of a mode decision for one (model, workload) pair
#[derive(Debug, Clone, Serialize)]
pub struct ModeDecision {
    /// Chosen deployment mode
    pub mode: DeploymentMode,

    /// Best-fit profile when virtualized; None for passthrough
    pub profile: Option<VirtualizationProfile>,

    /// Advisory messages (why virtualization was rejected, capacity caveats)
    pub warnings: Vec<String>,
}

/// Chooses between virtualized and passthrough deployment
#[derive(Debug, Clone, Copy)]
pub struct DeploymentAdvisor<'a> {
    catalog: &'a ProfileCatalog,
}

impl<'a> DeploymentAdvisor<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self { catalog }
    }

    /// Recommend a deployment mode for a workload needing
    /// `workload_memory_gb` of GPU memory on the given model.
    ///
    /// A zero workload memory is a caller contract violation and fails
    /// fast; an unknown model is a recoverable `NotFound`.
    pub fn recommend(&self, model: &GpuModel, workload_memory_gb: u32) -> Result<ModeDecision> {
        if workload_memory_gb == 0 {
            return Err(Error::validation("workload memory must be > 0 GB"));
        }

        let spec = self.catalog.spec_for(model)?;

        match self.catalog.best_fit(model, workload_memory_gb) {
            Ok(profile) => {
                debug!(model = %model, profile = %profile.name, "workload virtualizes");
                Ok(ModeDecision {
                    mode: DeploymentMode::Virtualized,
                    profile: Some(profile.clone()),
                    warnings: Vec::new(),
                })
            }
            Err(_) => {
                let mut warnings = vec![match self.catalog.largest_instance_memory(model) {
                    Some(largest) => format!(
                        "no vGPU profile on '{}' offers {} GB per instance (largest is {} GB); \
                         the workload must own a whole card",
                        model, workload_memory_gb, largest
                    ),
                    None => format!(
                        "'{}' has no vGPU profiles; the workload must own a whole card",
                        model
                    ),
                }];
                if workload_memory_gb > spec.total_memory_gb {
                    warnings.push(format!(
                        "workload needs {} GB but '{}' has {} GB of physical memory; \
                         even passthrough will not fit it on one card",
                        workload_memory_gb, model, spec.total_memory_gb
                    ));
                }
                Ok(ModeDecision {
                    mode: DeploymentMode::Passthrough,
                    profile: None,
                    warnings,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ProfileCatalog {
        ProfileCatalog::builtin().unwrap()
    }

    #[test]
    fn test_small_workload_virtualizes() {
        let catalog = catalog();
        let advisor = DeploymentAdvisor::new(&catalog);

        let decision = advisor.recommend(&GpuModel::new("A40"), 8).unwrap();
        assert_eq!(decision.mode, DeploymentMode::Virtualized);
        assert_eq!(decision.profile.unwrap().name, "A40-8Q");
        assert!(decision.warnings.is_empty());
    }

    #[test]
    fn test_passthrough_boundary() {
        let catalog = catalog();
        let advisor = DeploymentAdvisor::new(&catalog);
        let model = GpuModel::new("A40");

        // Equal to the largest profile still virtualizes
        let decision = advisor.recommend(&model, 48).unwrap();
        assert_eq!(decision.mode, DeploymentMode::Virtualized);
        assert_eq!(decision.profile.unwrap().name, "A40-48Q");

        // One GB past it goes passthrough
        let decision = advisor.recommend(&model, 49).unwrap();
        assert_eq!(decision.mode, DeploymentMode::Passthrough);
        assert!(decision.profile.is_none());
        assert!(!decision.warnings.is_empty());
    }

    #[test]
    fn test_oversized_workload_goes_passthrough_with_warning() {
        let catalog = catalog();
        let advisor = DeploymentAdvisor::new(&catalog);

        // 90 GB exceeds the 80 GB card entirely
        let decision = advisor.recommend(&GpuModel::new("A100-80GB"), 90).unwrap();
        assert_eq!(decision.mode, DeploymentMode::Passthrough);
        assert_eq!(decision.warnings.len(), 2);
        assert!(decision.warnings[1].contains("physical memory"));
    }

    #[test]
    fn test_model_without_profiles_goes_passthrough() {
        let catalog = catalog();
        let advisor = DeploymentAdvisor::new(&catalog);

        let decision = advisor.recommend(&GpuModel::new("H100"), 40).unwrap();
        assert_eq!(decision.mode, DeploymentMode::Passthrough);
        assert!(decision.warnings[0].contains("no vGPU profiles"));
    }

    #[test]
    fn test_zero_workload_memory_fails_fast() {
        let catalog = catalog();
        let advisor = DeploymentAdvisor::new(&catalog);

        let err = advisor.recommend(&GpuModel::new("A40"), 0).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_unknown_model_is_not_found() {
        let catalog = catalog();
        let advisor = DeploymentAdvisor::new(&catalog);

        let err = advisor.recommend(&GpuModel::new("FooGPU"), 8).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
