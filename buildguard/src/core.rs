//! File-based entry points shared by the CLI and other front ends.
//! The engine itself never touches the filesystem; this layer loads JSON
//! and hands typed values to it.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::build::BuildState;
use crate::catalog::{rank_candidates, related_parts, CandidateVerdict, Catalog, RelatedGroup};
use crate::compat::{CompatibilityResult, RulesEngine};
use crate::parts::{Category, PartAdapter, ProductRecord};

#[derive(Debug, thiserror::Error)]
pub enum BuildGuardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Invalid build: {0}")]
    InvalidBuild(String),
    #[error("Part not found: {0}")]
    PartNotFound(String),
    #[error("Unknown rule: {0}")]
    UnknownRule(String),
}

impl From<crate::parts::UnknownCategory> for BuildGuardError {
    fn from(e: crate::parts::UnknownCategory) -> Self {
        BuildGuardError::UnknownCategory(e.0)
    }
}

/// Options for evaluation runs (CLI or embedding code).
#[derive(Clone, Debug)]
pub struct ValidationOptions {
    /// Rule ids to run; empty runs every rule.
    pub rules: Vec<String>,
    /// Maximum parts per related-parts group.
    pub related_limit: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            rules: vec![],
            related_limit: 4,
        }
    }
}

/// Evaluation of one build file.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub file: PathBuf,
    pub build: BuildState,
    pub result: CompatibilityResult,
}

impl BuildReport {
    pub fn has_errors(&self) -> bool {
        !self.result.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.result.warnings.is_empty()
    }
}

/// Reject rule filters naming rules the engine does not have.
fn check_rule_ids(
    engine: &RulesEngine,
    options: &ValidationOptions,
) -> Result<(), BuildGuardError> {
    match engine.unknown_rule(&options.rules) {
        Some(id) => Err(BuildGuardError::UnknownRule(id.to_string())),
        None => Ok(()),
    }
}

pub struct BuildGuardCore;

impl BuildGuardCore {
    /// Load a catalog: a JSON array of product records.
    pub fn load_catalog(path: &Path) -> Result<Catalog, BuildGuardError> {
        let text = std::fs::read_to_string(path)?;
        let records: Vec<ProductRecord> = serde_json::from_str(&text)?;
        let catalog = Catalog::from_records(&records);
        tracing::info!(
            "Loaded {} parts from {} catalog records in {}",
            catalog.len(),
            records.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load a build: a JSON object from slot name to product record, or to a
    /// list of records for `storage`.
    pub fn load_build(path: &Path) -> Result<BuildState, BuildGuardError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_build(&serde_json::from_str(&text)?)
    }

    pub fn parse_build(value: &Value) -> Result<BuildState, BuildGuardError> {
        let Value::Object(slots) = value else {
            return Err(BuildGuardError::InvalidBuild(
                "expected an object keyed by slot name".to_string(),
            ));
        };

        let mut build = BuildState::new();
        for (slot, entry) in slots {
            let category: Category = slot.parse()?;
            let records = match entry {
                Value::Null => continue,
                Value::Array(items) if category.is_multi() => items.clone(),
                Value::Array(_) => {
                    return Err(BuildGuardError::InvalidBuild(format!(
                        "slot '{}' holds a single part, got a list",
                        slot
                    )))
                }
                other => vec![other.clone()],
            };
            for raw in records {
                let record: ProductRecord = serde_json::from_value(raw)?;
                if !record.category.is_empty() {
                    let own = record.category.parse::<Category>().ok();
                    if own != Some(category) {
                        return Err(BuildGuardError::InvalidBuild(format!(
                            "slot '{}' holds product {} of category '{}'",
                            slot, record.id, record.category
                        )));
                    }
                }
                build.place(PartAdapter::adapt_as(&record, category));
            }
        }
        tracing::debug!("Parsed build with {} parts", build.part_count());
        Ok(build)
    }

    pub fn check_build(
        path: &Path,
        options: &ValidationOptions,
    ) -> Result<BuildReport, BuildGuardError> {
        let engine = RulesEngine::with_default_rules();
        check_rule_ids(&engine, options)?;
        let build = Self::load_build(path)?;
        let result = engine.evaluate_with(&build, options);
        Ok(BuildReport {
            file: path.to_path_buf(),
            build,
            result,
        })
    }

    /// Catalog parts for `category`, compatible-with-`build` first.
    pub fn rank_for_slot(
        catalog_path: &Path,
        build_path: &Path,
        category: Category,
        options: &ValidationOptions,
    ) -> Result<Vec<CandidateVerdict>, BuildGuardError> {
        let engine = RulesEngine::with_default_rules();
        check_rule_ids(&engine, options)?;
        let catalog = Self::load_catalog(catalog_path)?;
        let build = Self::load_build(build_path)?;
        let candidates = catalog.in_category(category);
        Ok(rank_candidates(&engine, &build, &candidates, options))
    }

    pub fn related_for(
        catalog_path: &Path,
        part_id: &str,
        options: &ValidationOptions,
    ) -> Result<Vec<RelatedGroup>, BuildGuardError> {
        let catalog = Self::load_catalog(catalog_path)?;
        let part = catalog
            .get(part_id)
            .ok_or_else(|| BuildGuardError::PartNotFound(part_id.to_string()))?;
        Ok(related_parts(
            &RulesEngine::with_default_rules(),
            part,
            &catalog,
            options.related_limit,
        ))
    }
}
