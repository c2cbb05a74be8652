//! Static timing aggregation over an analyzed recipe.
//!
//! Two lookups drive the countdown display: the remaining static duration
//! from any step to the end of the recipe, and the duration of a single
//! pass through each loop body. Both fold loop repetition in at build
//! time, so runtime reads are O(1).
//!
//! When analysis rejected the recipe the table degrades to flat sums:
//! every step contributes its own duration exactly once and markers
//! contribute nothing. The operator still sees a countdown, just one
//! without loop arithmetic behind it.

use indexmap::IndexMap;
use recipe_analysis::StructureAnalysis;
use recipe_model::{Duration, Recipe};
use tracing::debug;

/// Precomputed timing lookups for one recipe/analysis pair.
///
/// Equality is structural; recomputing over unchanged inputs yields an
/// equal table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingTable {
    step_durations: Vec<Duration>,
    remaining_from: Vec<Duration>,
    single_pass: IndexMap<usize, Duration>,
    flat: bool,
}

impl TimingTable {
    /// Computes the table for `recipe` as analyzed.
    ///
    /// The analysis must stem from the same recipe value. A mismatched
    /// pair produces meaningless numbers, never a panic.
    #[must_use]
    pub fn compute(recipe: &Recipe, analysis: &StructureAnalysis) -> Self {
        let len = recipe.len();
        let step_durations: Vec<Duration> = recipe
            .steps()
            .iter()
            .map(|step| step.kind.static_duration())
            .collect();
        let flat = !analysis.is_valid();

        let mut single_pass: IndexMap<usize, Duration> = IndexMap::new();
        if !flat {
            // Innermost blocks first, so an outer body folds each nested
            // block into one multiplication instead of walking into it.
            let mut order: Vec<_> = analysis.blocks().iter().collect();
            order.sort_by_key(|block| std::cmp::Reverse(block.depth));
            for block in order {
                let mut sum = Duration::ZERO;
                let mut index = block.open + 1;
                while index < block.close {
                    if let Some(child) = analysis.block_at_open(index) {
                        let pass = single_pass
                            .get(&child.open)
                            .copied()
                            .unwrap_or(Duration::ZERO);
                        sum = sum
                            .saturating_add(pass.saturating_mul(u64::from(child.iterations)));
                        index = child.close + 1;
                    } else {
                        sum = sum.saturating_add(step_durations[index]);
                        index += 1;
                    }
                }
                single_pass.insert(block.open, sum);
            }
            single_pass.sort_unstable_keys();
        }

        let mut remaining_from = vec![Duration::ZERO; len + 1];
        for index in (0..len).rev() {
            remaining_from[index] = match analysis.block_at_open(index) {
                Some(block) if !flat => {
                    let pass = single_pass
                        .get(&index)
                        .copied()
                        .unwrap_or(Duration::ZERO);
                    pass.saturating_mul(u64::from(block.iterations))
                        .saturating_add(remaining_from[block.close + 1])
                }
                // Leaves add their duration, markers add zero. In flat
                // mode every step falls through to this arm.
                _ => step_durations[index].saturating_add(remaining_from[index + 1]),
            };
        }

        debug!(
            "timing table computed: {len} steps, {} loops, flat={flat}",
            single_pass.len()
        );
        Self {
            step_durations,
            remaining_from,
            single_pass,
            flat,
        }
    }

    /// Static duration of one execution of `step`; zero out of range.
    #[must_use]
    pub fn step_duration(&self, step: usize) -> Duration {
        self.step_durations
            .get(step)
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Duration from the start of `step` to the end of the recipe with
    /// loop repetition folded in; zero at or past the end.
    #[must_use]
    pub fn remaining_from(&self, step: usize) -> Duration {
        self.remaining_from
            .get(step)
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Duration of one pass through the body of the block opening at
    /// `open`; zero when no block opens there.
    #[must_use]
    pub fn single_pass(&self, open: usize) -> Duration {
        self.single_pass
            .get(&open)
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Projected duration of the whole recipe.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.remaining_from(0)
    }

    /// `true` when loop structure was ignored for lack of a valid
    /// analysis.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.flat
    }
}
