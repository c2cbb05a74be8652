use recipe_analysis::structure::{validate, MatchedPair};
use recipe_analysis::DiagnosticCode;
use recipe_model::{Duration, Recipe, RecipeBuilder};

mod common;

#[test]
fn empty_recipe_is_valid() {
    let seed = validate(&Recipe::default());
    assert!(seed.is_valid());
    assert!(seed.matched_pairs().is_empty());
    assert!(seed.diagnostics().is_empty());
}

#[test]
fn flat_recipe_has_no_pairs() {
    let seed = validate(&common::flat_recipe());
    assert!(seed.is_valid());
    assert!(seed.matched_pairs().is_empty());
}

#[test]
fn single_loop_matches_its_markers() {
    let seed = validate(&common::single_loop());
    assert!(seed.is_valid());
    assert_eq!(seed.matched_pairs(), &[MatchedPair { open: 0, close: 2 }]);
}

#[test]
fn pairs_are_recorded_innermost_first() {
    let seed = validate(&common::mixed_recipe());
    assert!(seed.is_valid());
    assert_eq!(
        seed.matched_pairs(),
        &[
            MatchedPair { open: 3, close: 5 },
            MatchedPair { open: 1, close: 6 },
        ]
    );
}

#[test]
fn unmatched_end_for_is_an_error() {
    let recipe = RecipeBuilder::new()
        .process("heat", Duration::from_secs(10))
        .loop_end()
        .build();

    let seed = validate(&recipe);
    assert!(!seed.is_valid());
    assert!(seed.matched_pairs().is_empty());
    assert_eq!(seed.diagnostics().len(), 1);
    assert_eq!(seed.diagnostics()[0].code, DiagnosticCode::UnmatchedLoopEnd);
    assert_eq!(seed.diagnostics()[0].step, 1);
}

#[test]
fn unclosed_for_is_an_error() {
    let recipe = RecipeBuilder::new()
        .loop_begin(3)
        .process("dose", Duration::from_secs(5))
        .build();

    let seed = validate(&recipe);
    assert!(!seed.is_valid());
    assert_eq!(seed.diagnostics().len(), 1);
    assert_eq!(seed.diagnostics()[0].code, DiagnosticCode::UnclosedLoop);
    assert_eq!(seed.diagnostics()[0].step, 0);
}

#[test]
fn all_broken_rows_are_reported_together() {
    // END_FOR at 0 has nothing to close, FOR at 1 is never closed.
    let recipe = RecipeBuilder::new()
        .loop_end()
        .loop_begin(2)
        .process("dose", Duration::from_secs(5))
        .build();

    let seed = validate(&recipe);
    assert!(!seed.is_valid());
    let codes: Vec<DiagnosticCode> = seed.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::UnmatchedLoopEnd,
            DiagnosticCode::UnclosedLoop,
        ]
    );
    let steps: Vec<usize> = seed.diagnostics().iter().map(|d| d.step).collect();
    assert_eq!(steps, vec![0, 1]);
}

#[test]
fn fourth_nesting_level_is_flagged_without_cascading() {
    let recipe = RecipeBuilder::new()
        .loop_begin(1)
        .loop_begin(1)
        .loop_begin(1)
        .loop_begin(1)
        .process("stir", Duration::from_secs(1))
        .loop_end()
        .loop_end()
        .loop_end()
        .loop_end()
        .build();

    let seed = validate(&recipe);
    assert!(!seed.is_valid());

    // Exactly one diagnostic: the offending opener. Its END_FOR still
    // matches, so no unmatched-closer noise follows.
    assert_eq!(seed.diagnostics().len(), 1);
    let diag = &seed.diagnostics()[0];
    assert_eq!(diag.code, DiagnosticCode::NestingTooDeep);
    assert_eq!(diag.step, 3);
    let related: Vec<usize> = diag.related.iter().map(|r| r.step).collect();
    assert_eq!(related, vec![0, 1, 2]);

    assert_eq!(
        seed.matched_pairs(),
        &[
            MatchedPair { open: 3, close: 5 },
            MatchedPair { open: 2, close: 6 },
            MatchedPair { open: 1, close: 7 },
            MatchedPair { open: 0, close: 8 },
        ]
    );
}

#[test]
fn every_too_deep_opener_is_flagged() {
    let mut builder = RecipeBuilder::new();
    for _ in 0..5 {
        builder = builder.loop_begin(1);
    }
    builder = builder.process("stir", Duration::from_secs(1));
    for _ in 0..5 {
        builder = builder.loop_end();
    }

    let seed = validate(&builder.build());
    let offenders: Vec<usize> = seed
        .diagnostics()
        .iter()
        .filter(|d| d.code == DiagnosticCode::NestingTooDeep)
        .map(|d| d.step)
        .collect();
    assert_eq!(offenders, vec![3, 4]);
}
