//! Inventory parsing command

use crate::output::{Formattable, OutputFormat, OutputFormatter};
use anyhow::Result;
use plan_advisor::Planner;
use serde::Serialize;

/// Parsed inventory entry for display
#[derive(Debug, Serialize)]
pub struct InventoryRow {
    pub gpu_model: String,
    pub count: u32,
}

impl Formattable for InventoryRow {
    fn table_headers() -> Vec<String> {
        vec!["GPU".to_string(), "Count".to_string()]
    }

    fn table_row(&self) -> Vec<String> {
        vec![self.gpu_model.clone(), self.count.to_string()]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("GPU Model".to_string(), self.gpu_model.clone()),
            ("Count".to_string(), self.count.to_string()),
        ]
    }
}

/// Parse a hardware description and show the normalized inventory
pub fn parse_inventory(
    planner: &Planner,
    text: String,
    output_format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);
    let parsed = planner.parse(&text);

    for warning in &parsed.warnings {
        formatter.print_warning(warning)?;
    }

    let rows: Vec<InventoryRow> = parsed
        .inventory
        .iter()
        .map(|e| InventoryRow {
            gpu_model: e.model.as_str().to_string(),
            count: e.count,
        })
        .collect();
    formatter.print_list(&rows)?;

    if !parsed.inventory.is_empty() {
        formatter.print_info(&format!(
            "{} GPU(s) across {} model(s)",
            parsed.inventory.total_gpus(),
            parsed.inventory.len()
        ))?;
    }
    Ok(())
}
