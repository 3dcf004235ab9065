//! Inventory parsing
//!
//! Converts a loosely structured description of available hardware into a
//! normalized [`GpuInventory`]. Free text is matched case-insensitively
//! against the catalog's model names and aliases; a leading integer
//! multiplier (optionally followed by "x") immediately before a model token
//! is its count, and a bare mention counts as one card.
//!
//! Entry-level problems never abort the parse: unknown model tokens are
//! dropped with a warning, zero counts are rejected per entry, and the
//! remaining entries still return.

use once_cell::sync::Lazy;
use plan_catalog::ProfileCatalog;
use plan_core::{GpuInventory, GpuModel, ParserConfig};
use regex::Regex;
use std::collections::HashMap;
use tracing::warn;

/// Explicitly counted mentions ("4x foo", "2 foo"), used to surface
/// unknown models
static COUNTED_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)\s*(?:x\s*)?([a-z][a-z0-9_\-]*)").expect("static pattern compiles")
});

/// Result of a parse: the inventory plus advisory messages for entries
/// that were dropped or rejected
#[derive(Debug, Clone, Default)]
pub struct ParsedInventory {
    pub inventory: GpuInventory,
    pub warnings: Vec<String>,
}

/// Extracts GPU inventories from free text or structured pairs
#[derive(Debug)]
pub struct InventoryParser {
    pattern: Regex,
    models: HashMap<String, GpuModel>,
    default_count: u32,
}

impl InventoryParser {
    /// Build a parser for the models a catalog knows about
    pub fn new(catalog: &ProfileCatalog, config: &ParserConfig) -> plan_core::Result<Self> {
        let mut spellings = catalog.model_spellings();
        // Longest spelling first so "A100-80GB" wins over "A100" and
        // "L40S" over "L40"
        spellings.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(&b.0)));

        let alternation = spellings
            .iter()
            .map(|(text, _)| regex::escape(text))
            .collect::<Vec<_>>()
            .join("|");
        // The boundary sits before the whole mention so "4xA40" (multiplier
        // touching the token) still matches; a bare model token keeps its
        // own leading boundary since the count group is absent.
        let pattern = Regex::new(&format!(
            r"(?i)\b(?:(\d+)\s*x?\s*)?({})\b",
            alternation
        ))
        .map_err(|e| plan_core::Error::config(format!("bad model pattern: {}", e)))?;

        let models = spellings
            .into_iter()
            .map(|(text, model)| (text.trim().to_ascii_lowercase(), model))
            .collect();

        Ok(Self {
            pattern,
            models,
            default_count: config.default_count,
        })
    }

    /// Parse a free-text hardware description like "4x A40 and 2 L40S"
    pub fn parse_text(&self, text: &str) -> ParsedInventory {
        let mut parsed = ParsedInventory::default();
        let mut recognized_spans: Vec<(usize, usize)> = Vec::new();

        for captures in self.pattern.captures_iter(text) {
            let token = match captures.get(2) {
                Some(m) => m,
                None => continue,
            };
            let model = match self.models.get(&token.as_str().trim().to_ascii_lowercase()) {
                Some(model) => model.clone(),
                None => continue,
            };
            recognized_spans.push((token.start(), token.end()));

            let count = match captures.get(1) {
                Some(m) => match m.as_str().parse::<u32>() {
                    Ok(n) => n,
                    Err(_) => {
                        parsed.warnings.push(format!(
                            "count '{}' for GPU model '{}' is out of range; entry dropped",
                            m.as_str(),
                            model
                        ));
                        continue;
                    }
                },
                None => self.default_count,
            };

            self.push_entry(&mut parsed, model, count);
        }

        // Surface explicitly counted tokens that matched no known model. A
        // token inside a recognized mention (e.g. "Ada" within
        // "RTX 6000 Ada", "GB" within "A100-80GB") is not an unknown model.
        for captures in COUNTED_TOKEN_RE.captures_iter(text) {
            let token = match captures.get(2) {
                Some(m) => m,
                None => continue,
            };
            let overlaps = recognized_spans
                .iter()
                .any(|&(start, end)| token.start() < end && start < token.end());
            if !overlaps {
                let token = token.as_str();
                warn!(token, "unknown GPU model in inventory text");
                parsed
                    .warnings
                    .push(format!("unknown GPU model '{}' dropped from inventory", token));
            }
        }

        parsed
    }

    /// Parse structured `(model, count)` pairs
    pub fn parse_pairs<I, S>(&self, pairs: I) -> ParsedInventory
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut parsed = ParsedInventory::default();

        for (name, count) in pairs {
            let name = name.as_ref();
            match self.models.get(&name.trim().to_ascii_lowercase()) {
                Some(model) => {
                    self.push_entry(&mut parsed, model.clone(), count);
                }
                None => {
                    warn!(model = name, "unknown GPU model in inventory");
                    parsed
                        .warnings
                        .push(format!("unknown GPU model '{}' dropped from inventory", name));
                }
            }
        }

        parsed
    }

    fn push_entry(&self, parsed: &mut ParsedInventory, model: GpuModel, count: u32) {
        // add() rejects zero counts; keep the rest of the parse going
        if let Err(e) = parsed.inventory.add(model, count) {
            parsed.warnings.push(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> InventoryParser {
        let catalog = ProfileCatalog::builtin().unwrap();
        InventoryParser::new(&catalog, &ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_multiplier_forms() {
        let parsed = parser().parse_text("4x A40 and 2 L40S");

        assert!(parsed.warnings.is_empty());
        let entries = parsed.inventory.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].model.as_str(), "A40");
        assert_eq!(entries[0].count, 4);
        assert_eq!(entries[1].model.as_str(), "L40S");
        assert_eq!(entries[1].count, 2);
    }

    #[test]
    fn test_parse_multiplier_without_space() {
        let parsed = parser().parse_text("4xA40 and 2xL40S");

        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.inventory.count_of(&GpuModel::new("A40")), Some(4));
        assert_eq!(parsed.inventory.count_of(&GpuModel::new("L40S")), Some(2));
    }

    #[test]
    fn test_parse_counted_unknown_without_x_warns() {
        let parsed = parser().parse_text("4 A40 and 2 FooGPU");

        assert_eq!(parsed.inventory.count_of(&GpuModel::new("A40")), Some(4));
        assert_eq!(parsed.inventory.len(), 1);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("FooGPU"));
    }

    #[test]
    fn test_parse_bare_mention_defaults_to_one() {
        let parsed = parser().parse_text("we have an L4 in the lab");
        assert_eq!(parsed.inventory.count_of(&GpuModel::new("L4")), Some(1));
    }

    #[test]
    fn test_parse_longest_model_name_wins() {
        let parsed = parser().parse_text("2x A100-80GB plus 1 A100");

        assert_eq!(
            parsed.inventory.count_of(&GpuModel::new("A100-80GB")),
            Some(2)
        );
        assert_eq!(parsed.inventory.count_of(&GpuModel::new("A100")), Some(1));
    }

    #[test]
    fn test_parse_sums_duplicate_mentions() {
        let parsed = parser().parse_text("2x A40, 3 a40");
        assert_eq!(parsed.inventory.count_of(&GpuModel::new("A40")), Some(5));
        assert_eq!(parsed.inventory.len(), 1);
    }

    #[test]
    fn test_parse_unknown_token_warns() {
        let parsed = parser().parse_text("4x A40 and 2x FooGPU");

        assert_eq!(parsed.inventory.len(), 1);
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("FooGPU"));
    }

    #[test]
    fn test_parse_zero_count_rejected_per_entry() {
        let parsed = parser().parse_text("0x A40 and 2 L4");

        assert_eq!(parsed.inventory.count_of(&GpuModel::new("A40")), None);
        assert_eq!(parsed.inventory.count_of(&GpuModel::new("L4")), Some(2));
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_parse_alias() {
        let parsed = parser().parse_text("3x RTX 6000 Ada workstations");
        assert_eq!(
            parsed.inventory.count_of(&GpuModel::new("RTX6000Ada")),
            Some(3)
        );
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_parse_pairs() {
        let parsed = parser().parse_pairs([("a40", 4), ("FooGPU", 2), ("L40S", 1)]);

        assert_eq!(parsed.inventory.len(), 2);
        assert_eq!(parsed.inventory.entries()[0].model.as_str(), "A40");
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn test_parse_pairs_zero_count() {
        let parsed = parser().parse_pairs([("A40", 0u32), ("L4", 2)]);

        assert_eq!(parsed.inventory.count_of(&GpuModel::new("L4")), Some(2));
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains(">= 1"));
    }

    #[test]
    fn test_parse_no_matches() {
        let parsed = parser().parse_text("no hardware mentioned here");
        assert!(parsed.inventory.is_empty());
        assert!(parsed.warnings.is_empty());
    }
}
