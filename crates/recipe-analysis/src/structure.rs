//! Structural validation of the flat step list.
//!
//! A single left-to-right walk with an explicit stack of open `FOR`
//! indices. The walk never stops at the first problem: the editor wants
//! every offending row marked in one pass, so unmatched closers, unclosed
//! openers and depth violations are all collected.

use recipe_model::{Recipe, StepKind, MAX_LOOP_DEPTH};

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode};

/// A `FOR` step and the `END_FOR` that closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedPair {
    /// Step index of the `FOR` marker.
    pub open: usize,
    /// Step index of the `END_FOR` marker.
    pub close: usize,
}

/// Raw validation result, the seed for loop parsing.
///
/// Matched pairs are recorded even when other rows are broken; the loop
/// parser only ever consumes them from a seed with no errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureSeed {
    matched: Vec<MatchedPair>,
    diagnostics: Vec<Diagnostic>,
}

impl StructureSeed {
    /// Returns `true` when no structural errors were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Matched `FOR`/`END_FOR` pairs in order of their closing step.
    #[must_use]
    pub fn matched_pairs(&self) -> &[MatchedPair] {
        &self.matched
    }

    /// Collected diagnostics in discovery order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Splits the seed into pairs and diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (Vec<MatchedPair>, Vec<Diagnostic>) {
        (self.matched, self.diagnostics)
    }
}

/// Checks that `FOR`/`END_FOR` markers form properly nested blocks.
///
/// Openers that blow the depth limit are flagged but still pushed, so
/// their own `END_FOR` rows match instead of cascading into bogus
/// unmatched-closer errors. Process steps are irrelevant here and skipped.
#[must_use]
pub fn validate(recipe: &Recipe) -> StructureSeed {
    let mut stack: Vec<usize> = Vec::with_capacity(MAX_LOOP_DEPTH + 1);
    let mut matched = Vec::new();
    let mut diagnostics = DiagnosticBuilder::new();

    for step in recipe.steps() {
        match step.kind {
            StepKind::LoopBegin { .. } => {
                if stack.len() >= MAX_LOOP_DEPTH {
                    let mut diag = Diagnostic::error(
                        DiagnosticCode::NestingTooDeep,
                        step.index,
                        format!("loop nesting exceeds the supported depth of {MAX_LOOP_DEPTH}"),
                    );
                    for &open in &stack {
                        diag = diag.with_related(open, "enclosed by the FOR here");
                    }
                    diagnostics.add(diag);
                }
                stack.push(step.index);
            }
            StepKind::LoopEnd => match stack.pop() {
                Some(open) => matched.push(MatchedPair {
                    open,
                    close: step.index,
                }),
                None => diagnostics.error(
                    DiagnosticCode::UnmatchedLoopEnd,
                    step.index,
                    "END_FOR without a matching FOR",
                ),
            },
            StepKind::Process { .. } => {}
        }
    }

    for open in stack {
        diagnostics.error(
            DiagnosticCode::UnclosedLoop,
            open,
            "FOR without a matching END_FOR",
        );
    }

    StructureSeed {
        matched,
        diagnostics: diagnostics.finish(),
    }
}
