//! Profile validation command

use crate::output::{Formattable, OutputFormat, OutputFormatter};
use anyhow::Result;
use plan_advisor::Planner;
use plan_core::GpuModel;
use serde::Serialize;

/// Validation outcome for display
#[derive(Debug, Serialize)]
pub struct ValidationView {
    pub gpu_model: String,
    pub profile: String,
    pub valid: bool,
    pub suggestion: Option<String>,
    pub message: Option<String>,
}

impl Formattable for ValidationView {
    fn table_headers() -> Vec<String> {
        vec![
            "GPU".to_string(),
            "Profile".to_string(),
            "Valid".to_string(),
            "Suggestion".to_string(),
        ]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            self.gpu_model.clone(),
            self.profile.clone(),
            if self.valid { "yes" } else { "no" }.to_string(),
            self.suggestion.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }

    fn key_value_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("GPU Model".to_string(), self.gpu_model.clone()),
            ("Profile".to_string(), self.profile.clone()),
            (
                "Valid".to_string(),
                if self.valid { "yes" } else { "no" }.to_string(),
            ),
        ];
        if let Some(suggestion) = &self.suggestion {
            pairs.push(("Suggestion".to_string(), suggestion.clone()));
        }
        if let Some(message) = &self.message {
            pairs.push(("Message".to_string(), message.clone()));
        }
        pairs
    }
}

/// Validate a profile name against a GPU model. Exits nonzero when the
/// profile does not exist so scripts can gate on the result.
pub fn validate_profile(
    planner: &Planner,
    model: String,
    profile: String,
    output_format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFormatter::new(output_format);
    let model = GpuModel::new(model);
    let result = planner.validate(&model, &profile);

    let view = ValidationView {
        gpu_model: model.as_str().to_string(),
        profile: profile.trim().to_string(),
        valid: result.valid,
        suggestion: result.suggestion.map(|s| s.name),
        message: result.message.clone(),
    };
    formatter.print_item(&view)?;

    if !result.valid {
        std::process::exit(1);
    }
    formatter.print_success(&format!(
        "profile '{}' is valid for GPU model '{}'",
        view.profile, view.gpu_model
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_view_formattable() {
        let view = ValidationView {
            gpu_model: "A40".to_string(),
            profile: "A40-64Q".to_string(),
            valid: false,
            suggestion: Some("A40-48Q".to_string()),
            message: Some("profile does not exist".to_string()),
        };

        assert_eq!(view.table_row()[2], "no");
        assert_eq!(view.key_value_pairs().len(), 5);

        let valid = ValidationView {
            gpu_model: "A40".to_string(),
            profile: "A40-8Q".to_string(),
            valid: true,
            suggestion: None,
            message: None,
        };
        assert_eq!(valid.key_value_pairs().len(), 3);
    }
}
