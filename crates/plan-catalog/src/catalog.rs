//! Immutable profile catalog with normalized lookups
//!
//! All lookups normalize model and profile names (trim + case-fold) and
//! return values in their canonical stored casing. Per-model profile lists
//! are kept sorted by ascending per-instance memory so "smallest sufficient
//! profile" policies are stable; ties prefer the denser profile.

use crate::schema::CatalogDocument;
use plan_core::{Error, GpuModel, GpuSpec, Result, VirtualizationProfile};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Builtin reference catalog data (NVIDIA vGPU documentation)
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.yaml");

/// Process-wide read-only mapping of GPU models to their profiles
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    /// Canonical models in document order
    models: Vec<GpuModel>,

    /// Normalized model name -> physical spec
    specs: HashMap<String, GpuSpec>,

    /// Normalized alias -> canonical model
    aliases: HashMap<String, GpuModel>,

    /// Normalized model name -> profiles sorted by ascending memory
    profiles: HashMap<String, Vec<VirtualizationProfile>>,

    /// Normalized profile name -> owning model key (profile names are
    /// globally unique in the source data)
    name_index: HashMap<String, String>,
}

impl ProfileCatalog {
    /// Build a catalog from a parsed document, validating every record.
    /// Any malformed record fails the whole load.
    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        let mut models = Vec::new();
        let mut specs = HashMap::new();
        let mut aliases = HashMap::new();

        for record in document.gpus {
            record.spec.validate()?;
            let key = record.spec.model.normalized();
            if specs.contains_key(&key) {
                return Err(Error::catalog(format!(
                    "duplicate GPU model '{}'",
                    record.spec.model
                )));
            }
            for alias in &record.aliases {
                let alias_key = alias.trim().to_ascii_lowercase();
                if aliases.contains_key(&alias_key) {
                    return Err(Error::catalog(format!("duplicate alias '{}'", alias)));
                }
                aliases.insert(alias_key, record.spec.model.clone());
            }
            models.push(record.spec.model.clone());
            specs.insert(key, record.spec);
        }

        let mut profiles: HashMap<String, Vec<VirtualizationProfile>> = HashMap::new();
        let mut name_index = HashMap::new();

        for profile in document.profiles {
            let model_key = profile.gpu_model.normalized();
            let spec = specs.get(&model_key).ok_or_else(|| {
                Error::catalog(format!(
                    "profile '{}' references unknown GPU model '{}'",
                    profile.name, profile.gpu_model
                ))
            })?;
            profile.check_against(spec)?;

            let name_key = profile.normalized_name();
            if name_index.contains_key(&name_key) {
                return Err(Error::catalog(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
            name_index.insert(name_key, model_key.clone());
            profiles.entry(model_key).or_default().push(profile);
        }

        // Ascending memory; denser packing first on ties
        for list in profiles.values_mut() {
            list.sort_by(|a, b| {
                a.memory_per_instance_gb
                    .cmp(&b.memory_per_instance_gb)
                    .then(b.max_instances_per_gpu.cmp(&a.max_instances_per_gpu))
                    .then(a.name.cmp(&b.name))
            });
        }

        debug!(
            models = models.len(),
            profiles = name_index.len(),
            "catalog loaded"
        );

        Ok(Self {
            models,
            specs,
            aliases,
            profiles,
            name_index,
        })
    }

    /// Build the builtin reference catalog
    pub fn builtin() -> Result<Self> {
        Self::from_document(CatalogDocument::from_yaml(BUILTIN_CATALOG)?)
    }

    /// Load a catalog from a YAML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_document(CatalogDocument::from_yaml(&text)?)
    }

    /// Resolve a model name or alias to its canonical model
    pub fn resolve_model(&self, name: &str) -> Option<&GpuModel> {
        let key = name.trim().to_ascii_lowercase();
        if let Some(spec) = self.specs.get(&key) {
            return Some(&spec.model);
        }
        self.aliases.get(&key)
    }

    /// Physical spec for a model
    pub fn spec_for(&self, model: &GpuModel) -> Result<&GpuSpec> {
        self.specs
            .get(&model.normalized())
            .ok_or_else(|| Error::not_found(format!("unknown GPU model '{}'", model)))
    }

    /// Profiles for a model, sorted by ascending per-instance memory.
    /// A known model with no profiles yields an empty slice.
    pub fn profiles_for(&self, model: &GpuModel) -> Result<&[VirtualizationProfile]> {
        let key = model.normalized();
        if !self.specs.contains_key(&key) {
            return Err(Error::not_found(format!("unknown GPU model '{}'", model)));
        }
        Ok(self.profiles.get(&key).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Exact (normalized) profile lookup for a model
    pub fn lookup(&self, model: &GpuModel, profile_name: &str) -> Result<&VirtualizationProfile> {
        let wanted = profile_name.trim().to_ascii_lowercase();
        self.profiles_for(model)?
            .iter()
            .find(|p| p.normalized_name() == wanted)
            .ok_or_else(|| {
                Error::not_found(format!(
                    "profile '{}' not found for GPU model '{}'",
                    profile_name.trim(),
                    model
                ))
            })
    }

    /// Smallest profile whose per-instance memory is >= the requested
    /// minimum; ties prefer the denser profile.
    pub fn best_fit(
        &self,
        model: &GpuModel,
        min_memory_per_instance_gb: u32,
    ) -> Result<&VirtualizationProfile> {
        self.profiles_for(model)?
            .iter()
            .find(|p| p.memory_per_instance_gb >= min_memory_per_instance_gb)
            .ok_or_else(|| {
                Error::not_found(format!(
                    "no profile on '{}' offers {} GB per instance",
                    model, min_memory_per_instance_gb
                ))
            })
    }

    /// Largest per-instance memory available on a model, if it has profiles
    pub fn largest_instance_memory(&self, model: &GpuModel) -> Option<u32> {
        self.profiles
            .get(&model.normalized())
            .and_then(|list| list.last())
            .map(|p| p.memory_per_instance_gb)
    }

    /// Global profile lookup by name alone
    pub fn find_profile(&self, profile_name: &str) -> Option<&VirtualizationProfile> {
        let key = profile_name.trim().to_ascii_lowercase();
        let model_key = self.name_index.get(&key)?;
        self.profiles
            .get(model_key)?
            .iter()
            .find(|p| p.normalized_name() == key)
    }

    /// Canonical models in document order
    pub fn models(&self) -> &[GpuModel] {
        &self.models
    }

    /// All accepted spellings for inventory parsing: canonical model names
    /// plus aliases, each paired with its canonical model
    pub fn model_spellings(&self) -> Vec<(String, GpuModel)> {
        let mut spellings: Vec<(String, GpuModel)> = self
            .models
            .iter()
            .map(|m| (m.as_str().to_string(), m.clone()))
            .collect();
        for (alias, model) in &self.aliases {
            spellings.push((alias.clone(), model.clone()));
        }
        spellings
    }

    /// Total number of profiles across all models
    pub fn profile_count(&self) -> usize {
        self.name_index.len()
    }
}
