//! BuildGuard - PC build compatibility checking library
//!
//! Given the parts picked for a custom PC, this library reports whether they
//! physically and electrically fit together and estimates the power draw.
//!
//! # Quick Start
//!
//! ```
//! use buildguard::{evaluate, BuildState, PartAdapter, ProductRecord};
//!
//! let cpu = PartAdapter::adapt(
//!     &ProductRecord::new("cpu-1", "cpu")
//!         .with_spec("socket", "LGA 1700")
//!         .with_spec("tdp", 125),
//! )
//! .unwrap();
//! let board = PartAdapter::adapt(
//!     &ProductRecord::new("mb-1", "motherboard").with_spec("socket", "AM5"),
//! )
//! .unwrap();
//!
//! let build = BuildState::new().with(cpu).with(board);
//! let result = evaluate(&build);
//!
//! assert!(!result.valid);
//! for error in &result.errors {
//!     println!("{}", error);
//! }
//! ```
//!
//! # Pieces
//!
//! - **Part adapter**: catalog records with free-form spec maps become typed parts
//! - **Evaluator**: socket, memory, form factor, clearance, storage and power rules
//! - **Catalog helpers**: rank candidates for a slot, find related parts

pub mod build;
pub mod catalog;
pub mod compat;
pub mod core;
pub mod parts;

// Re-export main types
pub use build::BuildState;
pub use catalog::{
    assess_candidates, rank_candidates, related_parts, CandidateVerdict, Catalog, RelatedGroup,
};
pub use compat::{evaluate, CompatibilityResult, Issue, Rule, RulesEngine, Severity, Violation};
pub use crate::core::{BuildGuardCore, BuildGuardError, BuildReport, ValidationOptions};
pub use parts::{Category, Part, PartAdapter, ProductRecord};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        evaluate, BuildGuardCore, BuildGuardError, BuildState, Category, CompatibilityResult,
        Issue, Part, PartAdapter, ProductRecord, RulesEngine, Severity, ValidationOptions,
    };
}
