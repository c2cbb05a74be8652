//! `recipe-analysis` - Loop structure validation and semantic analysis.
//!
//! The static half of the timing engine. Given an immutable
//! [`Recipe`](recipe_model::Recipe), this crate answers two questions:
//!
//! 1. Is the flat step list structurally sound? Every `END_FOR` must close
//!    a `FOR`, every `FOR` must be closed, and nesting must stay within the
//!    controller's counter depth. All offenders are reported at once so the
//!    editor can mark every bad row in a single round.
//! 2. What loop shape does a sound list describe? Matched pairs become
//!    [`LoopBlock`]s with nesting depth and a validated iteration count.
//!
//! The pipeline runs validation, parsing and semantic evaluation in that
//! order and stops early when the structure is broken; results are bundled
//! in a [`StructureAnalysis`]. Analysis is pure: the same recipe value
//! always produces an identical result, which downstream code relies on
//! when deciding whether anything changed after an edit.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod analysis;
pub mod diagnostics;
pub mod loops;
pub mod semantics;
pub mod structure;

pub use analysis::StructureAnalysis;
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSeverity};
pub use loops::{LoopForest, LoopTopology};
pub use semantics::{LoopBlock, MAX_ITERATIONS};
pub use structure::{MatchedPair, StructureSeed};
