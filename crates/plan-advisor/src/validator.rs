//! Profile validation
//!
//! Guards against hallucinated or mismatched profile names before they reach
//! capacity math. On a miss, the closest name from the model's own profile
//! list (longest common prefix) is offered as a display aid only - the
//! caller must treat `valid == false` as a hard stop for that profile
//! choice; the suggestion is never substituted into downstream math.

use plan_catalog::ProfileCatalog;
use plan_core::{GpuModel, VirtualizationProfile};
use serde::Serialize;
use tracing::debug;

/// Outcome of validating a candidate profile name against a GPU model
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Whether the candidate names a real profile of the model
    pub valid: bool,

    /// The catalog profile, when valid
    pub resolved: Option<VirtualizationProfile>,

    /// Closest valid profile on the same model, advisory only
    pub suggestion: Option<VirtualizationProfile>,

    /// Human-readable explanation when invalid
    pub message: Option<String>,
}

impl ValidationResult {
    fn valid(profile: VirtualizationProfile) -> Self {
        Self {
            valid: true,
            resolved: Some(profile),
            suggestion: None,
            message: None,
        }
    }

    fn invalid(message: String, suggestion: Option<VirtualizationProfile>) -> Self {
        Self {
            valid: false,
            resolved: None,
            suggestion,
            message: Some(message),
        }
    }
}

/// Validates candidate profile names against the catalog
#[derive(Debug, Clone, Copy)]
pub struct ProfileValidator<'a> {
    catalog: &'a ProfileCatalog,
}

impl<'a> ProfileValidator<'a> {
    pub fn new(catalog: &'a ProfileCatalog) -> Self {
        Self { catalog }
    }

    /// Validate a candidate profile name for a GPU model
    pub fn validate(&self, model: &GpuModel, candidate: &str) -> ValidationResult {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return ValidationResult::invalid("profile name cannot be empty".to_string(), None);
        }

        match self.catalog.lookup(model, candidate) {
            Ok(profile) => {
                debug!(model = %model, profile = %profile.name, "profile validated");
                ValidationResult::valid(profile.clone())
            }
            Err(_) => {
                let profiles = match self.catalog.profiles_for(model) {
                    Ok(profiles) => profiles,
                    Err(_) => {
                        return ValidationResult::invalid(
                            format!("unknown GPU model '{}'", model),
                            None,
                        );
                    }
                };

                let suggestion = closest_by_prefix(candidate, profiles);
                let message = match &suggestion {
                    Some(s) => format!(
                        "profile '{}' does not exist for GPU model '{}'; did you mean '{}'?",
                        candidate, model, s.name
                    ),
                    None => format!(
                        "profile '{}' does not exist for GPU model '{}'",
                        candidate, model
                    ),
                };
                ValidationResult::invalid(message, suggestion)
            }
        }
    }
}

/// Pick the profile whose normalized name shares the longest common prefix
/// with the candidate; ties go to the earlier (smaller-memory) profile.
fn closest_by_prefix(
    candidate: &str,
    profiles: &[VirtualizationProfile],
) -> Option<VirtualizationProfile> {
    let wanted = candidate.to_ascii_lowercase();
    let mut best: Option<(usize, &VirtualizationProfile)> = None;

    for profile in profiles {
        let len = common_prefix_len(&wanted, &profile.normalized_name());
        if len > 0 && best.map(|(b, _)| len > b).unwrap_or(true) {
            best = Some((len, profile));
        }
    }

    best.map(|(_, p)| p.clone())
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}
