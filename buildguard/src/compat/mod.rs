//! Compatibility Evaluator
//!
//! Runs every rule in [`rules`] against a [`BuildState`] and folds the
//! findings into a [`CompatibilityResult`]. Evaluation is pure: the same
//! build always produces the same result, and nothing is remembered between
//! calls, so it is safe to call once per candidate part when filtering a list.

pub mod power;
pub mod rules;

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::build::BuildState;
use crate::core::ValidationOptions;

pub use power::{estimate_wattage, recommended_wattage};
pub use rules::{Issue, Rule, RulesEngine, Severity, Violation};

/// Outcome of one evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompatibilityResult {
    /// True iff `errors` is empty.
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(rename = "estimatedWattage")]
    pub estimated_wattage: u32,
    pub issues: Vec<Issue>,
}

impl CompatibilityResult {
    pub fn from_issues(issues: Vec<Issue>, estimated_wattage: u32) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for issue in &issues {
            match issue.severity {
                Severity::Error => errors.push(issue.message.clone()),
                Severity::Warning => warnings.push(issue.message.clone()),
            }
        }
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            estimated_wattage,
            issues,
        }
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

impl RulesEngine {
    pub fn evaluate(&self, build: &BuildState) -> CompatibilityResult {
        self.evaluate_rules(build, &[])
    }

    pub fn evaluate_with(
        &self,
        build: &BuildState,
        options: &ValidationOptions,
    ) -> CompatibilityResult {
        self.evaluate_rules(build, &options.rules)
    }

    fn evaluate_rules(&self, build: &BuildState, only: &[String]) -> CompatibilityResult {
        let issues = self.analyze_filtered(build, only);
        let result = CompatibilityResult::from_issues(issues, estimate_wattage(build));
        tracing::trace!(
            parts = build.part_count(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            watts = result.estimated_wattage,
            "evaluated build"
        );
        result
    }
}

fn default_engine() -> &'static RulesEngine {
    static ENGINE: OnceLock<RulesEngine> = OnceLock::new();
    ENGINE.get_or_init(RulesEngine::with_default_rules)
}

/// Evaluate a build against every built-in rule.
pub fn evaluate(build: &BuildState) -> CompatibilityResult {
    default_engine().evaluate(build)
}
