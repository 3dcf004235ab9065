//! Deployment planning commands

use crate::commands::capacity::print_recommendation;
use crate::output::{Formattable, OutputFormat, OutputFormatter};
use anyhow::{bail, Result};
use plan_advisor::Planner;
use plan_core::GpuModel;
use serde::Serialize;

/// Mode decision for display
#[derive(Debug, Serialize)]
pub struct RecommendView {
    pub gpu_model: String,
    pub workload_memory_gb: u32,
    pub mode: String,
    pub profile: Option<String>,
    pub instances_per_gpu: u32,
}

impl Formattable for RecommendView {
    fn table_headers() -> Vec<String> {
        vec![
            "GPU".to_string(),
            "Workload (GB)".to_string(),
            "Mode".to_string(),
            "Profile".to_string(),
            "VMs/GPU".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.gpu_model.clone(),
            self.workload_memory_gb.to_string(),
            self.mode.clone(),
            self.profile.clone().unwrap_or_else(|| "-".to_string()),
            self.instances_per_gpu.to_string(),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("GPU Model".to_string(), self.gpu_model.clone()),
            (
                "Workload Memory".to_string(),
                format!("{} GB", self.workload_memory_gb),
            ),
            ("Deployment Mode".to_string(), self.mode.clone()),
            (
                "Profile".to_string(),
                self.profile.clone().unwrap_or_else(|| "-".to_string()),
            ),
            (
                "Instances per GPU".to_string(),
                self.instances_per_gpu.to_string(),
            ),
        ]
    }
}

/// Recommend a deployment mode for one GPU model and workload
pub fn recommend(
    planner: &Planner,
    model: String,
    memory: u32,
    output_format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);
    let model = GpuModel::new(model);
    let decision = planner.recommend(&model, memory)?;

    for warning in &decision.warnings {
        formatter.print_warning(warning)?;
    }

    let view = RecommendView {
        gpu_model: model.as_str().to_string(),
        workload_memory_gb: memory,
        mode: decision.mode.to_string(),
        profile: decision.profile.as_ref().map(|p| p.name.clone()),
        instances_per_gpu: decision
            .profile
            .as_ref()
            .map(|p| p.max_instances_per_gpu)
            .unwrap_or(1),
    };
    formatter.print_item(&view)
}

/// Plan a full deployment from a hardware description and workload memory
pub fn plan(
    planner: &Planner,
    inventory_text: String,
    memory: u32,
    users: Option<u32>,
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

    let recommendation = planner.plan(&parsed.inventory, memory, users)?;
    print_recommendation(&recommendation, output_format)
}
