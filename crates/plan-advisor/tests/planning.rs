//! End-to-end planning flows over the builtin catalog

use plan_advisor::Planner;
use plan_core::{DeploymentMode, Error, GpuInventory, GpuModel, ProfileMode};

fn planner() -> Planner {
    Planner::builtin().expect("builtin planner must construct")
}

#[test]
fn homogeneous_capacity_from_validated_profile() {
    let planner = planner();
    let model = GpuModel::new("A40");

    // A validated name feeds straight into capacity math
    let result = planner.validate(&model, "A40-8Q");
    assert!(result.valid);
    let profile = result.resolved.unwrap();

    let capacity = planner
        .capacity_homogeneous(&model, &profile.name, 4)
        .unwrap();
    assert_eq!(capacity, 24);
}

#[test]
fn invalid_profile_stops_before_capacity_math() {
    let planner = planner();
    let model = GpuModel::new("A40");

    let result = planner.validate(&model, "A40-64Q");
    assert!(!result.valid);
    assert!(result.suggestion.is_some());

    // The hallucinated name fails lookup-backed paths too
    let err = planner
        .capacity_homogeneous(&model, "A40-64Q", 4)
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn heterogeneous_capacity_with_best_fit_per_model() {
    let planner = planner();
    let inventory = GpuInventory::from_pairs([("A40", 4), ("L40S", 2)]).unwrap();

    let rec = planner.capacity_heterogeneous(&inventory, 8);

    assert_eq!(rec.total_vm_capacity, 36);
    assert!(rec.warnings.is_empty());
    assert_eq!(rec.per_gpu_breakdown.len(), 2);
}

#[test]
fn named_profile_capacity_in_both_instance_modes() {
    let planner = planner();
    let inventory = GpuInventory::from_pairs([("A40", 4)]).unwrap();

    let equal = planner
        .capacity_with_profile(&inventory, "A40-8Q", ProfileMode::EqualSize)
        .unwrap();
    let mixed = planner
        .capacity_with_profile(&inventory, "A40-8Q", ProfileMode::MixedSize)
        .unwrap();

    assert_eq!(equal.total_vm_capacity, 24);
    assert_eq!(mixed.total_vm_capacity, 16);
}

#[test]
fn mode_recommendation_boundary() {
    let planner = planner();
    let model = GpuModel::new("A40");

    let decision = planner.recommend(&model, 48).unwrap();
    assert_eq!(decision.mode, DeploymentMode::Virtualized);

    let decision = planner.recommend(&model, 49).unwrap();
    assert_eq!(decision.mode, DeploymentMode::Passthrough);
}

#[test]
fn free_text_to_full_plan() {
    let planner = planner();

    let parsed = planner.parse("we have 4x A40 and 2 L40S in rack 7");
    assert!(parsed.warnings.is_empty());
    assert_eq!(parsed.inventory.total_gpus(), 6);

    let plan = planner.plan(&parsed.inventory, 8, Some(4)).unwrap();
    assert_eq!(plan.deployment_mode, DeploymentMode::Virtualized);
    assert_eq!(plan.total_vm_capacity, 36);

    // Output is JSON-serializable for response assembly
    let json = serde_json::to_string(&plan).unwrap();
    assert!(json.contains("per_gpu_breakdown"));
}

#[test]
fn capacity_grows_monotonically_with_cards() {
    let planner = planner();
    let model = GpuModel::new("L4");

    let mut last = 0;
    for count in 1..=8 {
        let capacity = planner
            .capacity_homogeneous(&model, "L4-4Q", count)
            .unwrap();
        assert!(capacity > last);
        last = capacity;
    }
}

#[test]
fn plan_survives_partially_unknown_inventory() {
    let planner = planner();
    let parsed = planner.parse("4x A40, 2x FooGPU");
    assert_eq!(parsed.warnings.len(), 1);

    let plan = planner.plan(&parsed.inventory, 8, None).unwrap();
    assert_eq!(plan.total_vm_capacity, 24);
}
