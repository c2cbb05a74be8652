//! Semantic evaluation of parsed loop blocks.
//!
//! Checks iteration counts against the controller's counter range and
//! promotes the topology into timing-ready [`LoopBlock`]s. Any error here
//! withholds all blocks; a recipe with one bad count must not be timed as
//! if its other loops were fine.

use recipe_model::Recipe;

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode};
use crate::loops::LoopForest;

/// Largest iteration count the controller's 16-bit loop counters can hold.
pub const MAX_ITERATIONS: i32 = 65_535;

/// A fully validated loop block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopBlock {
    /// Step index of the `FOR` marker.
    pub open: usize,
    /// Step index of the `END_FOR` marker.
    pub close: usize,
    /// Nesting depth, 0 for top-level blocks.
    pub depth: usize,
    /// Validated iteration count, at least 1.
    pub iterations: u32,
    /// Position of the enclosing block in the block list, if any.
    pub parent: Option<usize>,
}

impl LoopBlock {
    /// Step indices of the loop body, exclusive of both markers.
    #[must_use]
    pub fn body(&self) -> std::ops::Range<usize> {
        self.open + 1..self.close
    }
}

/// Validates iteration counts and builds the final block list.
///
/// Returns an empty block list when any count is out of range. Warnings
/// (an empty loop body, for instance) do not withhold blocks.
#[must_use]
pub fn evaluate(recipe: &Recipe, forest: &LoopForest) -> (Vec<LoopBlock>, Vec<Diagnostic>) {
    let mut diagnostics = DiagnosticBuilder::new();

    for block in &forest.blocks {
        let declared = block.declared_iterations;
        if declared <= 0 {
            diagnostics.error(
                DiagnosticCode::IterationCountNotPositive,
                block.open,
                format!("iteration count {declared} must be at least 1"),
            );
        } else if declared > MAX_ITERATIONS {
            diagnostics.error(
                DiagnosticCode::IterationCountTooWide,
                block.open,
                format!("iteration count {declared} exceeds the controller limit of {MAX_ITERATIONS}"),
            );
        }
        if block.body().is_empty() {
            let label = recipe
                .step(block.open)
                .map_or("FOR", |step| step.label.as_str());
            diagnostics.warning(
                DiagnosticCode::EmptyLoopBody,
                block.open,
                format!("'{label}' loop encloses no steps"),
            );
        }
    }

    if diagnostics.has_errors() {
        return (Vec::new(), diagnostics.finish());
    }

    let blocks = forest
        .blocks
        .iter()
        .map(|block| LoopBlock {
            open: block.open,
            close: block.close,
            depth: block.depth,
            // Counts were just range checked; 1 is unreachable filler.
            iterations: u32::try_from(block.declared_iterations).unwrap_or(1),
            parent: block.parent,
        })
        .collect();

    (blocks, diagnostics.finish())
}
