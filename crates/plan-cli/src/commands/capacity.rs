//! Capacity calculation command

use crate::output::{Formattable, OutputFormat, OutputFormatter};
use anyhow::{bail, Result};
use plan_advisor::Planner;
use plan_core::{DeploymentRecommendation, ProfileMode};
use serde::Serialize;

/// Per-model capacity contribution for display
#[derive(Debug, Serialize)]
pub struct AllocationRow {
    pub gpu_model: String,
    pub gpu_count: u32,
    pub profile: String,
    pub instances_per_gpu: u32,
    pub total_instances: u32,
}

impl Formattable for AllocationRow {
    fn table_headers() -> Vec<String> {
        vec![
            "GPU".to_string(),
            "Cards".to_string(),
            "Profile".to_string(),
            "VMs/GPU".to_string(),
            "Total VMs".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.gpu_model.clone(),
            self.gpu_count.to_string(),
            self.profile.clone(),
            self.instances_per_gpu.to_string(),
            self.total_instances.to_string(),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("GPU Model".to_string(), self.gpu_model.clone()),
            ("Cards".to_string(), self.gpu_count.to_string()),
            ("Profile".to_string(), self.profile.clone()),
            (
                "Instances per GPU".to_string(),
                self.instances_per_gpu.to_string(),
            ),
            (
                "Total Instances".to_string(),
                self.total_instances.to_string(),
            ),
        ]
    }
}

/// Print a recommendation: breakdown table, warnings, and the headline
/// capacity. Structured formats emit the full recommendation instead.
pub fn print_recommendation(
    recommendation: &DeploymentRecommendation,
    output_format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);

    if matches!(output_format, OutputFormat::Json | OutputFormat::Yaml) {
        return print_structured(recommendation, output_format);
    }

    let rows: Vec<AllocationRow> = recommendation
        .per_gpu_breakdown
        .iter()
        .map(|a| AllocationRow {
            gpu_model: a.gpu_model.as_str().to_string(),
            gpu_count: a.gpu_count,
            profile: a
                .profile
                .clone()
                .unwrap_or_else(|| match a.instances_per_gpu {
                    0 => "-".to_string(),
                    _ => "(passthrough)".to_string(),
                }),
            instances_per_gpu: a.instances_per_gpu,
            total_instances: a.total_instances,
        })
        .collect();
    formatter.print_list(&rows)?;

    for warning in &recommendation.warnings {
        formatter.print_warning(warning)?;
    }

    if let Some(vm) = &recommendation.vm_configuration {
        formatter.print_info(&format!(
            "per-VM sizing: {} vCPUs, {} GB GPU memory, {} GB RAM, {} GB {} storage ({})",
            vm.vcpu_count,
            vm.gpu_memory_gb,
            vm.system_ram_gb,
            vm.storage_capacity_gb,
            vm.storage_type,
            vm.performance_tier,
        ))?;
    }

    formatter.print_success(&format!(
        "{} deployment: {} VM(s) total",
        recommendation.deployment_mode, recommendation.total_vm_capacity
    ))
}

fn print_structured(
    recommendation: &DeploymentRecommendation,
    output_format: OutputFormat,
) -> Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(recommendation)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(recommendation)?),
        _ => unreachable!(),
    }
    Ok(())
}

/// Compute VM capacity for an inventory description. Exactly one of
/// `profile` (a named profile, applied where compatible) or `memory`
/// (best-fit per model) drives the profile choice.
pub fn capacity(
    planner: &Planner,
    inventory_text: String,
    profile: Option<String>,
    mode: ProfileMode,
    memory: Option<u32>,
    output_format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);

    let parsed = planner.parse(&inventory_text);
    for warning in &parsed.warnings {
        formatter.print_warning(warning)?;
    }
    if parsed.inventory.is_empty() {
        bail!("no known GPU models found in '{}'", inventory_text);
    }

    let recommendation = match (profile, memory) {
        (Some(name), None) => planner.capacity_with_profile(&parsed.inventory, &name, mode)?,
        (None, Some(memory_gb)) => planner.capacity_heterogeneous(&parsed.inventory, memory_gb),
        _ => bail!("specify exactly one of --profile or --memory"),
    };

    print_recommendation(&recommendation, output_format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_row_formattable() {
        let row = AllocationRow {
            gpu_model: "A40".to_string(),
            gpu_count: 4,
            profile: "A40-8Q".to_string(),
            instances_per_gpu: 6,
            total_instances: 24,
        };

        assert_eq!(AllocationRow::table_headers().len(), 5);
        assert_eq!(row.table_row()[4], "24");
        assert_eq!(row.key_value_pairs()[0].1, "A40");
    }
}
