//! Catalog browsing commands

use crate::output::{Formattable, OutputFormat, OutputFormatter};
use anyhow::Result;
use plan_advisor::Planner;
use plan_core::GpuModel;
use serde::Serialize;

/// GPU model information for display
#[derive(Debug, Serialize)]
pub struct GpuRow {
    pub model: String,
    pub architecture: String,
    pub memory_gb: u32,
    pub max_vgpus: u32,
    pub power_watts: u32,
    pub profiles: usize,
}

impl Formattable for GpuRow {
    fn table_headers() -> Vec<String> {
        vec![
            "Model".to_string(),
            "Architecture".to_string(),
            "Memory (GB)".to_string(),
            "Max vGPUs".to_string(),
            "Power (W)".to_string(),
            "Profiles".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.model.clone(),
            self.architecture.clone(),
            self.memory_gb.to_string(),
            self.max_vgpus.to_string(),
            self.power_watts.to_string(),
            self.profiles.to_string(),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("Model".to_string(), self.model.clone()),
            ("Architecture".to_string(), self.architecture.clone()),
            ("Memory".to_string(), format!("{} GB", self.memory_gb)),
            ("Max vGPUs".to_string(), self.max_vgpus.to_string()),
            ("Power".to_string(), format!("{} W", self.power_watts)),
            ("Profiles".to_string(), self.profiles.to_string()),
        ]
    }
}

/// vGPU profile information for display
#[derive(Debug, Serialize)]
pub struct ProfileRow {
    pub name: String,
    pub gpu_model: String,
    pub memory_gb: u32,
    pub max_instances: u32,
    pub max_instances_mixed: u32,
    pub tier: String,
    pub use_cases: String,
    pub min_driver: String,
}

impl Formattable for ProfileRow {
    fn table_headers() -> Vec<String> {
        vec![
            "Profile".to_string(),
            "GPU".to_string(),
            "Memory (GB)".to_string(),
            "Max/GPU".to_string(),
            "Max Mixed".to_string(),
            "Tier".to_string(),
            "Use Cases".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.gpu_model.clone(),
            self.memory_gb.to_string(),
            self.max_instances.to_string(),
            self.max_instances_mixed.to_string(),
            self.tier.clone(),
            self.use_cases.clone(),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("Profile".to_string(), self.name.clone()),
            ("GPU Model".to_string(), self.gpu_model.clone()),
            ("Memory".to_string(), format!("{} GB", self.memory_gb)),
            ("Max Instances".to_string(), self.max_instances.to_string()),
            (
                "Max Instances (mixed)".to_string(),
                self.max_instances_mixed.to_string(),
            ),
            ("Performance Tier".to_string(), self.tier.clone()),
            ("Use Cases".to_string(), self.use_cases.clone()),
            ("Min Driver".to_string(), self.min_driver.clone()),
        ]
    }
}

/// List GPU models known to the catalog
pub fn list_models(planner: &Planner, output_format: OutputFormat) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);
    let catalog = planner.catalog();

    let rows: Vec<GpuRow> = catalog
        .models()
        .iter()
        .filter_map(|model| {
            let spec = catalog.spec_for(model).ok()?;
            let profiles = catalog.profiles_for(model).map(|p| p.len()).unwrap_or(0);
            Some(GpuRow {
                model: spec.model.as_str().to_string(),
                architecture: spec.architecture.clone(),
                memory_gb: spec.total_memory_gb,
                max_vgpus: spec.max_vgpus_per_gpu,
                power_watts: spec.power_watts,
                profiles,
            })
        })
        .collect();

    formatter.print_list(&rows)
}

/// List profiles for a GPU model, optionally filtered by a per-instance
/// memory floor
pub fn list_profiles(
    planner: &Planner,
    model: String,
    min_memory: Option<u32>,
    output_format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);
    let model = GpuModel::new(model);
    let profiles = planner.catalog().profiles_for(&model)?;

    let rows: Vec<ProfileRow> = profiles
        .iter()
        .filter(|p| min_memory.map_or(true, |floor| p.memory_per_instance_gb >= floor))
        .map(|p| ProfileRow {
            name: p.name.clone(),
            gpu_model: p.gpu_model.as_str().to_string(),
            memory_gb: p.memory_per_instance_gb,
            max_instances: p.max_instances_per_gpu,
            max_instances_mixed: p.max_instances_mixed,
            tier: p.performance_tier().to_string(),
            use_cases: p.use_cases.join(", "),
            min_driver: p.min_driver_version.clone(),
        })
        .collect();

    formatter.print_list(&rows)
}
