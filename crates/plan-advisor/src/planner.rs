//! End-to-end planning facade
//!
//! Owns the catalog, the inventory parser, and the configuration, and wires
//! the validator, calculator, and advisor into single-call planning flows.
//! A `Planner` is immutable after construction and safe to share across
//! threads.

use crate::advisor::{DeploymentAdvisor, ModeDecision};
use crate::capacity::CapacityCalculator;
use crate::parser::{InventoryParser, ParsedInventory};
use crate::sizing;
use crate::validator::{ProfileValidator, ValidationResult};
use plan_catalog::ProfileCatalog;
use plan_core::{
    DeploymentMode, DeploymentRecommendation, Error, GpuAllocation, GpuInventory, GpuModel,
    GpuSpec, PlannerConfig, ProfileMode, Result, VirtualizationProfile,
};
use tracing::{info, warn};

/// Facade over the full planning pipeline
#[derive(Debug)]
pub struct Planner {
    catalog: ProfileCatalog,
    parser: InventoryParser,
    config: PlannerConfig,
}

impl Planner {
    /// Build a planner around an already-loaded catalog
    pub fn new(catalog: ProfileCatalog, config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let parser = InventoryParser::new(&catalog, &config.parser)?;
        Ok(Self {
            catalog,
            parser,
            config,
        })
    }

    /// Build a planner from configuration: the catalog comes from
    /// `catalog.path` when set, otherwise the builtin reference catalog
    pub fn from_config(config: PlannerConfig) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => ProfileCatalog::load_from_file(path)?,
            None => ProfileCatalog::builtin()?,
        };
        Self::new(catalog, config)
    }

    /// Planner over the builtin catalog with default configuration
    pub fn builtin() -> Result<Self> {
        Self::from_config(PlannerConfig::default())
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Parse a free-text hardware description into an inventory
    pub fn parse(&self, text: &str) -> ParsedInventory {
        self.parser.parse_text(text)
    }

    /// Parse structured `(model, count)` pairs into an inventory
    pub fn parse_pairs<I, S>(&self, pairs: I) -> ParsedInventory
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        self.parser.parse_pairs(pairs)
    }

    /// Validate a candidate profile name against a GPU model
    pub fn validate(&self, model: &GpuModel, candidate: &str) -> ValidationResult {
        ProfileValidator::new(&self.catalog).validate(model, candidate)
    }

    /// VM capacity of `count` identical cards under a named profile
    pub fn capacity_homogeneous(
        &self,
        model: &GpuModel,
        profile_name: &str,
        count: u32,
    ) -> Result<u32> {
        let profile = self.catalog.lookup(model, profile_name)?;
        CapacityCalculator::new(&self.catalog).homogeneous(model, profile, count)
    }

    /// Capacity across a heterogeneous inventory, picking the smallest
    /// sufficient profile per model for the given workload memory
    pub fn capacity_heterogeneous(
        &self,
        inventory: &GpuInventory,
        workload_memory_gb: u32,
    ) -> DeploymentRecommendation {
        CapacityCalculator::new(&self.catalog).heterogeneous(inventory, |model| {
            self.catalog.best_fit(model, workload_memory_gb).cloned()
        })
    }

    /// Capacity of an inventory under one named profile
    pub fn capacity_with_profile(
        &self,
        inventory: &GpuInventory,
        profile_name: &str,
        mode: ProfileMode,
    ) -> Result<DeploymentRecommendation> {
        CapacityCalculator::new(&self.catalog).with_profile(inventory, profile_name, mode)
    }

    /// Deployment mode decision for one model and workload
    pub fn recommend(&self, model: &GpuModel, workload_memory_gb: u32) -> Result<ModeDecision> {
        DeploymentAdvisor::new(&self.catalog).recommend(model, workload_memory_gb)
    }

    /// Plan a deployment for an inventory and a per-workload GPU memory
    /// requirement.
    ///
    /// Each model gets its own mode decision; virtualized models contribute
    /// `count * max_instances` and passthrough models contribute one VM per
    /// card. Unknown models contribute zero with a warning. The overall mode
    /// is virtualized when any model virtualizes, and a selected profile is
    /// reported only when every virtualized model resolved the same one.
    pub fn plan(
        &self,
        inventory: &GpuInventory,
        workload_memory_gb: u32,
        concurrent_users: Option<u32>,
    ) -> Result<DeploymentRecommendation> {
        if inventory.is_empty() {
            return Err(Error::validation("inventory must name at least one GPU"));
        }
        if workload_memory_gb == 0 {
            return Err(Error::validation("workload memory must be > 0 GB"));
        }

        let advisor = DeploymentAdvisor::new(&self.catalog);
        let mut total = 0u64;
        let mut breakdown = Vec::with_capacity(inventory.len());
        let mut warnings = Vec::new();
        let mut profiles_used: Vec<VirtualizationProfile> = Vec::new();
        let mut passthrough_specs: Vec<GpuSpec> = Vec::new();
        let mut any_virtualized = false;

        for entry in inventory {
            match advisor.recommend(&entry.model, workload_memory_gb) {
                Ok(decision) => {
                    warnings.extend(decision.warnings);
                    match decision.profile {
                        Some(profile) => {
                            let instances =
                                match entry.count.checked_mul(profile.max_instances_per_gpu) {
                                    Some(instances) => instances,
                                    None => {
                                        warnings.push(format!(
                                            "instance count for {} x '{}' exceeds the supported range; '{}' contributes no capacity",
                                            entry.count, profile.name, entry.model
                                        ));
                                        breakdown.push(GpuAllocation::zero(
                                            entry.model.clone(),
                                            entry.count,
                                        ));
                                        continue;
                                    }
                                };
                            any_virtualized = true;
                            total += u64::from(instances);
                            breakdown.push(GpuAllocation {
                                gpu_model: entry.model.clone(),
                                gpu_count: entry.count,
                                profile: Some(profile.name.clone()),
                                instances_per_gpu: profile.max_instances_per_gpu,
                                total_instances: instances,
                            });
                            if !profiles_used.iter().any(|p| p.name == profile.name) {
                                profiles_used.push(profile);
                            }
                        }
                        None => {
                            total += u64::from(entry.count);
                            breakdown.push(GpuAllocation {
                                gpu_model: entry.model.clone(),
                                gpu_count: entry.count,
                                profile: None,
                                instances_per_gpu: 1,
                                total_instances: entry.count,
                            });
                            // spec_for cannot miss here: recommend resolved it
                            if let Ok(spec) = self.catalog.spec_for(&entry.model) {
                                if !passthrough_specs.iter().any(|s| s.model == spec.model) {
                                    passthrough_specs.push(spec.clone());
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(model = %entry.model, error = %e, "model excluded from plan");
                    warnings.push(format!("{}; '{}' contributes no capacity", e, entry.model));
                    breakdown.push(GpuAllocation::zero(entry.model.clone(), entry.count));
                }
            }
        }

        let total = crate::capacity::clamp_total(total, &mut warnings);
        let mode = if any_virtualized {
            DeploymentMode::Virtualized
        } else {
            DeploymentMode::Passthrough
        };
        let selected_profile = match (&mode, profiles_used.as_slice()) {
            (DeploymentMode::Virtualized, [only]) => Some(only.clone()),
            _ => None,
        };

        let users = concurrent_users.unwrap_or(self.config.advisor.default_concurrent_users);
        let vm = match (&selected_profile, &mode) {
            (Some(profile), _) => Some(sizing::vm_for_profile(
                profile,
                workload_memory_gb,
                users,
                &self.config.advisor,
            )),
            (None, DeploymentMode::Passthrough) if passthrough_specs.len() == 1 => {
                Some(sizing::vm_for_passthrough(
                    &passthrough_specs[0],
                    workload_memory_gb,
                    users,
                    &self.config.advisor,
                ))
            }
            _ => None,
        };

        info!(
            mode = %mode,
            capacity = total,
            models = breakdown.len(),
            "plan computed"
        );

        let mut recommendation = DeploymentRecommendation {
            selected_profile,
            deployment_mode: mode,
            total_vm_capacity: total,
            per_gpu_breakdown: breakdown,
            warnings,
            vm_configuration: None,
        };
        if let Some(vm) = vm {
            recommendation = recommendation.with_vm_configuration(vm);
        }
        Ok(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner() -> Planner {
        Planner::builtin().unwrap()
    }

    #[test]
    fn test_plan_homogeneous_virtualized() {
        let planner = planner();
        let inventory = GpuInventory::from_pairs([("A40", 4)]).unwrap();

        let plan = planner.plan(&inventory, 8, None).unwrap();

        assert_eq!(plan.deployment_mode, DeploymentMode::Virtualized);
        assert_eq!(plan.total_vm_capacity, 24);
        assert_eq!(plan.selected_profile.as_ref().unwrap().name, "A40-8Q");
        let vm = plan.vm_configuration.unwrap();
        assert_eq!(vm.vgpu_profile.as_deref(), Some("A40-8Q"));
        assert_eq!(vm.gpu_memory_gb, 8);
    }

    #[test]
    fn test_plan_heterogeneous_distinct_profiles() {
        let planner = planner();
        let inventory = GpuInventory::from_pairs([("A40", 4), ("L40S", 2)]).unwrap();

        let plan = planner.plan(&inventory, 8, None).unwrap();

        // 4 * 6 + 2 * 6, but the per-model profiles differ so none is selected
        assert_eq!(plan.total_vm_capacity, 36);
        assert!(plan.selected_profile.is_none());
        assert!(plan.vm_configuration.is_none());
        assert_eq!(
            plan.per_gpu_breakdown[0].profile.as_deref(),
            Some("A40-8Q")
        );
        assert_eq!(
            plan.per_gpu_breakdown[1].profile.as_deref(),
            Some("L40S-8Q")
        );
    }

    #[test]
    fn test_plan_all_passthrough() {
        let planner = planner();
        // H100 carries no vGPU profiles
        let inventory = GpuInventory::from_pairs([("H100", 2)]).unwrap();

        let plan = planner.plan(&inventory, 40, None).unwrap();

        assert_eq!(plan.deployment_mode, DeploymentMode::Passthrough);
        assert_eq!(plan.total_vm_capacity, 2);
        assert!(plan.selected_profile.is_none());
        assert!(!plan.warnings.is_empty());
        let vm = plan.vm_configuration.unwrap();
        assert_eq!(vm.deployment_mode, DeploymentMode::Passthrough);
        assert_eq!(vm.gpu_memory_gb, 80);
    }

    #[test]
    fn test_plan_mixed_modes_is_virtualized() {
        let planner = planner();
        // L4 tops out at 24 GB per instance; A40 reaches 48
        let inventory = GpuInventory::from_pairs([("A40", 2), ("L4", 3)]).unwrap();

        let plan = planner.plan(&inventory, 32, None).unwrap();

        assert_eq!(plan.deployment_mode, DeploymentMode::Virtualized);
        // 2 * 1 (A40-48Q) + 3 passthrough cards
        assert_eq!(plan.total_vm_capacity, 5);
        assert_eq!(plan.per_gpu_breakdown[1].profile, None);
        assert_eq!(plan.per_gpu_breakdown[1].instances_per_gpu, 1);
        assert!(!plan.warnings.is_empty());
    }

    #[test]
    fn test_plan_unknown_model_contributes_zero() {
        let planner = planner();
        let inventory = GpuInventory::from_pairs([("A40", 4), ("FooGPU", 2)]).unwrap();

        let plan = planner.plan(&inventory, 8, None).unwrap();

        assert_eq!(plan.total_vm_capacity, 24);
        assert_eq!(plan.per_gpu_breakdown[1].total_instances, 0);
        assert!(plan.warnings.iter().any(|w| w.contains("FooGPU")));
    }

    #[test]
    fn test_plan_overflowing_count_contributes_zero() {
        let planner = planner();
        let inventory =
            GpuInventory::from_pairs([("A40", 100_000_000), ("L4", 1)]).unwrap();

        // A40-1Q at 100M cards overflows u32 and is zeroed out; L4-1Q
        // still contributes its 24 instances
        let plan = planner.plan(&inventory, 1, None).unwrap();

        assert_eq!(plan.per_gpu_breakdown[0].total_instances, 0);
        assert_eq!(plan.total_vm_capacity, 24);
        assert!(plan.warnings.iter().any(|w| w.contains("A40")));
    }

    #[test]
    fn test_plan_rejects_empty_inventory() {
        let planner = planner();
        let err = planner.plan(&GpuInventory::new(), 8, None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_plan_rejects_zero_workload() {
        let planner = planner();
        let inventory = GpuInventory::from_pairs([("A40", 4)]).unwrap();
        let err = planner.plan(&inventory, 0, None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_plan_concurrent_users_override() {
        let planner = planner();
        let inventory = GpuInventory::from_pairs([("A40", 1)]).unwrap();

        let plan = planner.plan(&inventory, 8, Some(12)).unwrap();
        assert_eq!(plan.vm_configuration.unwrap().concurrent_users, 12);

        let plan = planner.plan(&inventory, 8, None).unwrap();
        assert_eq!(plan.vm_configuration.unwrap().concurrent_users, 1);
    }

    #[test]
    fn test_capacity_homogeneous_via_facade() {
        let planner = planner();
        let capacity = planner
            .capacity_homogeneous(&GpuModel::new("A40"), "A40-8Q", 4)
            .unwrap();
        assert_eq!(capacity, 24);
    }

    #[test]
    fn test_parse_then_plan_round_trip() {
        let planner = planner();
        let parsed = planner.parse("4x A40 and 2 L40S");
        assert!(parsed.warnings.is_empty());

        let plan = planner.plan(&parsed.inventory, 8, None).unwrap();
        assert_eq!(plan.total_vm_capacity, 36);
    }

    #[test]
    fn test_from_config_with_catalog_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(
            &path,
            r#"
gpus:
  - model: L4
    total_memory_gb: 24
    architecture: Ada Lovelace
    max_vgpus_per_gpu: 24
    power_watts: 72
profiles:
  - name: L4-8Q
    gpu_model: L4
    memory_per_instance_gb: 8
    max_instances_per_gpu: 3
    max_instances_mixed: 2
"#,
        )
        .unwrap();

        let mut config = PlannerConfig::default();
        config.catalog.path = Some(path);
        let planner = Planner::from_config(config).unwrap();

        assert_eq!(planner.catalog().models().len(), 1);
        let inventory = GpuInventory::from_pairs([("L4", 2)]).unwrap();
        let plan = planner.plan(&inventory, 8, None).unwrap();
        assert_eq!(plan.total_vm_capacity, 6);
    }
}
