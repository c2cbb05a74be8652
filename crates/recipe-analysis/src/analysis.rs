use recipe_model::Recipe;
use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::semantics::LoopBlock;
use crate::{loops, semantics, structure};

/// Complete static analysis of one recipe value.
///
/// Bundles validity, loop blocks, per-step depths and all diagnostics from
/// one pipeline run. Equality is structural, so callers can compare the
/// analysis of a re-submitted recipe against the previous one to detect
/// that nothing changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureAnalysis {
    valid: bool,
    blocks: Vec<LoopBlock>,
    depth_by_step: Vec<usize>,
    diagnostics: Vec<Diagnostic>,
}

impl StructureAnalysis {
    /// Runs validation, loop parsing and semantic evaluation.
    ///
    /// Parsing is skipped entirely on structural errors; in that case all
    /// step depths read as zero. Semantic errors keep the parsed depths
    /// (the editor still indents rows correctly) but withhold the blocks,
    /// which is what downstream timing keys off.
    #[must_use]
    pub fn analyze(recipe: &Recipe) -> Self {
        let seed = structure::validate(recipe);
        if !seed.is_valid() {
            let (_, diagnostics) = seed.into_parts();
            debug!(
                "structure analysis rejected recipe: {} steps, {} diagnostics",
                recipe.len(),
                diagnostics.len()
            );
            return Self {
                valid: false,
                blocks: Vec::new(),
                depth_by_step: vec![0; recipe.len()],
                diagnostics,
            };
        }

        let (pairs, mut diagnostics) = seed.into_parts();
        let forest = loops::parse(recipe, &pairs);
        let (blocks, semantic_diagnostics) = semantics::evaluate(recipe, &forest);
        diagnostics.extend(semantic_diagnostics);

        let valid = !diagnostics.iter().any(Diagnostic::is_error);
        debug!(
            "structure analysis complete: {} steps, {} loops, valid={}",
            recipe.len(),
            blocks.len(),
            valid
        );
        Self {
            valid,
            blocks,
            depth_by_step: forest.depth_by_step,
            diagnostics,
        }
    }

    /// `true` when the recipe produced no error diagnostics.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Validated loop blocks ordered by opening step, empty unless valid.
    #[must_use]
    pub fn blocks(&self) -> &[LoopBlock] {
        &self.blocks
    }

    /// The block whose `FOR` marker sits at `open`, if any.
    #[must_use]
    pub fn block_at_open(&self, open: usize) -> Option<&LoopBlock> {
        self.blocks
            .binary_search_by_key(&open, |block| block.open)
            .ok()
            .map(|position| &self.blocks[position])
    }

    /// Number of blocks strictly containing `step`; zero out of range.
    #[must_use]
    pub fn depth_of(&self, step: usize) -> usize {
        self.depth_by_step.get(step).copied().unwrap_or(0)
    }

    /// Per-step nesting depths, indexed by step.
    #[must_use]
    pub fn depths(&self) -> &[usize] {
        &self.depth_by_step
    }

    /// All diagnostics in discovery order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Steps carrying error diagnostics, ascending and deduplicated.
    #[must_use]
    pub fn offending_steps(&self) -> Vec<usize> {
        let mut steps: Vec<usize> = self
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.is_error())
            .map(|diagnostic| diagnostic.step)
            .collect();
        steps.sort_unstable();
        steps.dedup();
        steps
    }

    /// Blocks strictly enclosing `step`, outermost first.
    ///
    /// Empty for top-level steps, for loop markers of otherwise top-level
    /// blocks and for any recipe that failed analysis.
    #[must_use]
    pub fn enclosing_chain(&self, step: usize) -> Vec<&LoopBlock> {
        self.blocks
            .iter()
            .filter(|block| block.open < step && step < block.close)
            .collect()
    }

    /// The innermost block strictly enclosing `step`, if any.
    #[must_use]
    pub fn innermost_enclosing(&self, step: usize) -> Option<&LoopBlock> {
        self.blocks
            .iter()
            .rev()
            .find(|block| block.open < step && step < block.close)
    }
}
