use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_LOCALE: &str = "en_US";
pub const DEFAULT_REPEAT_COUNT: usize = 3;
pub const DEFAULT_RECURSIVE_DEPTH: usize = 2;

/// Tunables for the generation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationSettings {
    /// Seed for every root request; equal seeds give equal output.
    pub seed: u64,
    /// Locale handed to the primitive provider.
    pub locale: String,
    /// Number of elements generated for arrays, lists, sets and dictionaries.
    pub repeat_count: usize,
    /// Default depth bound for types that can reach themselves.
    pub recursive_depth: usize,
    /// Maximum nested composite levels below the root, regardless of type.
    pub tree_depth: Option<usize>,
    /// Per-type depth bounds; take precedence over `recursive_depth`.
    pub type_depths: BTreeMap<String, usize>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            locale: DEFAULT_LOCALE.to_string(),
            repeat_count: DEFAULT_REPEAT_COUNT,
            recursive_depth: DEFAULT_RECURSIVE_DEPTH,
            tree_depth: None,
            type_depths: BTreeMap::new(),
        }
    }
}

impl GenerationSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Counters for a single root request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub instances_created: u64,
    pub members_populated: u64,
    pub members_skipped: u64,
    pub members_overridden: u64,
    pub generator_usage: BTreeMap<String, u64>,
    pub depth_refusals: BTreeMap<String, u64>,
    pub ungenerable: BTreeMap<String, u64>,
}

impl GenerationReport {
    pub fn record_instance(&mut self) {
        self.instances_created += 1;
    }

    pub fn record_populated(&mut self) {
        self.members_populated += 1;
    }

    pub fn record_skipped(&mut self) {
        self.members_skipped += 1;
    }

    pub fn record_overridden(&mut self) {
        self.members_overridden += 1;
    }

    pub fn record_generator_usage(&mut self, id: &str) {
        *self.generator_usage.entry(id.to_string()).or_insert(0) += 1;
    }

    pub fn record_depth_refusal(&mut self, ty: &str) {
        *self.depth_refusals.entry(ty.to_string()).or_insert(0) += 1;
    }

    pub fn record_ungenerable(&mut self, ty: &str) {
        *self.ungenerable.entry(ty.to_string()).or_insert(0) += 1;
    }

    /// Fold another request's counters into this one.
    pub fn merge(&mut self, other: GenerationReport) {
        self.instances_created += other.instances_created;
        self.members_populated += other.members_populated;
        self.members_skipped += other.members_skipped;
        self.members_overridden += other.members_overridden;
        for (id, count) in other.generator_usage {
            *self.generator_usage.entry(id).or_insert(0) += count;
        }
        for (ty, count) in other.depth_refusals {
            *self.depth_refusals.entry(ty).or_insert(0) += count;
        }
        for (ty, count) in other.ungenerable {
            *self.ungenerable.entry(ty).or_insert(0) += count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings =
            GenerationSettings::from_json_str(r#"{"recursive_depth": 3}"#).expect("parse settings");
        assert_eq!(settings.recursive_depth, 3);
        assert_eq!(settings.repeat_count, DEFAULT_REPEAT_COUNT);
        assert_eq!(settings.locale, DEFAULT_LOCALE);
    }

    #[test]
    fn negative_depth_is_rejected() {
        let result = GenerationSettings::from_json_str(r#"{"recursive_depth": -1}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = GenerationSettings::from_json_str(r#"{"recursion": 3}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn merge_sums_counters() {
        let mut total = GenerationReport::default();
        let mut other = GenerationReport::default();
        other.record_instance();
        other.record_depth_refusal("Node");
        total.record_depth_refusal("Node");
        total.merge(other);
        assert_eq!(total.instances_created, 1);
        assert_eq!(total.depth_refusals.get("Node"), Some(&2));
    }
}
