//! Candidate filtering and ranking over a catalog.
//!
//! All of this is built on [`RulesEngine::evaluate`]: a candidate is judged
//! by evaluating a copy of the build with the candidate placed in its slot.

use serde::Serialize;

use crate::build::BuildState;
use crate::compat::{CompatibilityResult, RulesEngine};
use crate::core::ValidationOptions;
use crate::parts::{Category, Part, PartAdapter, ProductRecord};

/// Adapted parts in catalog order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    parts: Vec<Part>,
}

impl Catalog {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    pub fn from_records(records: &[ProductRecord]) -> Self {
        Self::new(PartAdapter::adapt_all(records))
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id() == id)
    }

    pub fn in_category(&self, category: Category) -> Vec<Part> {
        self.parts
            .iter()
            .filter(|p| p.category() == category)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateVerdict {
    pub part: Part,
    /// Adding this part would leave the build without errors.
    pub compatible: bool,
    pub result: CompatibilityResult,
}

/// Judge each candidate against `build`, keeping input order.
pub fn assess_candidates(
    engine: &RulesEngine,
    build: &BuildState,
    candidates: &[Part],
    options: &ValidationOptions,
) -> Vec<CandidateVerdict> {
    candidates
        .iter()
        .map(|candidate| {
            let result = engine.evaluate_with(&build.with_candidate(candidate), options);
            CandidateVerdict {
                part: candidate.clone(),
                compatible: result.errors.is_empty(),
                result,
            }
        })
        .collect()
}

/// Compatible candidates first; ties keep their original order.
pub fn rank_candidates(
    engine: &RulesEngine,
    build: &BuildState,
    candidates: &[Part],
    options: &ValidationOptions,
) -> Vec<CandidateVerdict> {
    let mut verdicts = assess_candidates(engine, build, candidates, options);
    verdicts.sort_by_key(|v| !v.compatible);
    verdicts
}

#[derive(Debug, Clone, Serialize)]
pub struct RelatedGroup {
    pub title: String,
    pub category: Category,
    pub parts: Vec<Part>,
}

/// Categories worth suggesting next to a part, with their group titles.
/// A group keyed on an empty socket or memory type is left out.
fn related_targets(part: &Part) -> Vec<(&'static str, Category)> {
    match part {
        Part::Cpu(cpu) if !cpu.socket.is_empty() => {
            vec![("Compatible Motherboards", Category::Motherboard)]
        }
        Part::Motherboard(board) => {
            let mut targets = Vec::new();
            if !board.cpu_socket.is_empty() {
                targets.push(("Compatible Processors", Category::Cpu));
            }
            if !board.memory_type.trim().is_empty() {
                targets.push(("Compatible Memory", Category::Ram));
            }
            targets
        }
        Part::Ram(ram) if !ram.memory_type.trim().is_empty() => {
            vec![("Compatible Motherboards", Category::Motherboard)]
        }
        Part::Gpu(_) => vec![("Recommended Power Supplies", Category::Psu)],
        Part::Case(_) => vec![("Compatible Motherboards", Category::Motherboard)],
        _ => vec![],
    }
}

fn is_related(engine: &RulesEngine, base: &BuildState, part: &Part, candidate: &Part) -> bool {
    match (part, candidate) {
        (Part::Gpu(gpu), Part::Psu(psu)) => psu.wattage >= gpu.recommended_psu_w,
        _ => engine.evaluate(&base.with_candidate(candidate)).is_clean(),
    }
}

/// Parts from other categories that pair cleanly with `part`.
///
/// A pairing counts when a build holding just the two parts has neither
/// errors nor warnings. Power supplies for a graphics card are instead held
/// to the card's recommended wattage. Each group keeps at most `limit` parts.
pub fn related_parts(
    engine: &RulesEngine,
    part: &Part,
    catalog: &Catalog,
    limit: usize,
) -> Vec<RelatedGroup> {
    let base = BuildState::new().with(part.clone());
    related_targets(part)
        .into_iter()
        .map(|(title, category)| {
            let parts = catalog
                .parts()
                .iter()
                .filter(|c| c.category() == category)
                .filter(|c| is_related(engine, &base, part, c))
                .take(limit)
                .cloned()
                .collect();
            RelatedGroup {
                title: title.to_string(),
                category,
                parts,
            }
        })
        .collect()
}
