//! Loop parsing: matched pairs to a nesting forest.
//!
//! Runs only on structurally valid input, so pairs are guaranteed to be
//! properly nested and the walk below never sees a close out of order.

use recipe_model::{Recipe, StepKind, MAX_LOOP_DEPTH};
use rustc_hash::FxHashMap;

use crate::structure::MatchedPair;

/// Structural shape of one `FOR`..`END_FOR` block.
///
/// Carries the raw declared count; range checking happens in the semantic
/// pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTopology {
    /// Step index of the `FOR` marker.
    pub open: usize,
    /// Step index of the `END_FOR` marker.
    pub close: usize,
    /// Nesting depth, 0 for top-level blocks.
    pub depth: usize,
    /// Iteration count as entered in the editor, unvalidated.
    pub declared_iterations: i32,
    /// Position of the enclosing block in [`LoopForest::blocks`], if any.
    pub parent: Option<usize>,
}

impl LoopTopology {
    /// Step indices of the loop body, exclusive of both markers.
    #[must_use]
    pub fn body(&self) -> std::ops::Range<usize> {
        self.open + 1..self.close
    }
}

/// Output of the loop parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopForest {
    /// Blocks ordered by opening step index.
    pub blocks: Vec<LoopTopology>,
    /// Number of blocks strictly containing each step.
    ///
    /// Markers do not count their own block, so a `FOR` and its `END_FOR`
    /// share the depth of the surrounding context.
    pub depth_by_step: Vec<usize>,
}

/// Derives nesting depth and parent links from matched pairs.
#[must_use]
pub fn parse(recipe: &Recipe, pairs: &[MatchedPair]) -> LoopForest {
    let mut blocks: Vec<LoopTopology> = pairs
        .iter()
        .map(|pair| {
            let declared_iterations = match recipe.step(pair.open).map(|step| step.kind) {
                Some(StepKind::LoopBegin {
                    declared_iterations,
                }) => declared_iterations,
                // Pairs always point at FOR markers on validator output;
                // a zero count keeps the semantic pass honest if not.
                _ => 0,
            };
            LoopTopology {
                open: pair.open,
                close: pair.close,
                depth: 0,
                declared_iterations,
                parent: None,
            }
        })
        .collect();
    blocks.sort_unstable_by_key(|block| block.open);

    let by_open: FxHashMap<usize, usize> = blocks
        .iter()
        .enumerate()
        .map(|(position, block)| (block.open, position))
        .collect();

    let mut depth_by_step = vec![0; recipe.len()];
    let mut active: Vec<usize> = Vec::with_capacity(MAX_LOOP_DEPTH);
    for index in 0..recipe.len() {
        // Proper nesting means only the innermost active block can close
        // here, and it closes before the step's own depth is recorded.
        if let Some(&top) = active.last() {
            if blocks[top].close == index {
                active.pop();
            }
        }
        depth_by_step[index] = active.len();
        if let Some(&position) = by_open.get(&index) {
            blocks[position].depth = active.len();
            blocks[position].parent = active.last().copied();
            active.push(position);
        }
    }

    LoopForest {
        blocks,
        depth_by_step,
    }
}
