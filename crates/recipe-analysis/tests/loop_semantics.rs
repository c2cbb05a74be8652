use expect_test::expect;
use recipe_analysis::{DiagnosticCode, StructureAnalysis};
use recipe_model::{Duration, RecipeBuilder};

mod common;

#[test]
fn valid_counts_become_block_iterations() {
    let recipe = common::mixed_recipe();
    let analysis = StructureAnalysis::analyze(&recipe);

    assert!(analysis.is_valid());
    assert!(analysis.diagnostics().is_empty());
    let iterations: Vec<u32> = analysis.blocks().iter().map(|b| b.iterations).collect();
    assert_eq!(iterations, vec![2, 3]);
}

#[test]
fn zero_iteration_count_is_rejected() {
    let recipe = RecipeBuilder::new()
        .loop_begin(0)
        .process("stir", Duration::from_secs(5))
        .loop_end()
        .build();

    let analysis = StructureAnalysis::analyze(&recipe);
    assert!(!analysis.is_valid());
    assert!(analysis.blocks().is_empty());
    assert_eq!(analysis.diagnostics().len(), 1);
    assert_eq!(
        analysis.diagnostics()[0].code,
        DiagnosticCode::IterationCountNotPositive
    );
    assert_eq!(analysis.diagnostics()[0].step, 0);

    // The shape still parsed, so the editor keeps its indentation.
    assert_eq!(analysis.depths(), &[0, 1, 0]);
}

#[test]
fn negative_iteration_count_is_rejected() {
    let recipe = RecipeBuilder::new()
        .loop_begin(-2)
        .process("stir", Duration::from_secs(5))
        .loop_end()
        .build();

    let analysis = StructureAnalysis::analyze(&recipe);
    assert!(!analysis.is_valid());
    assert_eq!(
        analysis.offending_steps(),
        vec![0],
        "the FOR row carries the error"
    );
}

#[test]
fn oversized_iteration_count_is_rejected() {
    let recipe = RecipeBuilder::new()
        .loop_begin(70_000)
        .process("stir", Duration::from_secs(5))
        .loop_end()
        .build();

    let analysis = StructureAnalysis::analyze(&recipe);
    assert!(!analysis.is_valid());
    assert_eq!(
        analysis.diagnostics()[0].code,
        DiagnosticCode::IterationCountTooWide
    );
}

#[test]
fn empty_loop_body_warns_but_stays_valid() {
    let recipe = RecipeBuilder::new().loop_begin(2).loop_end().build();

    let analysis = StructureAnalysis::analyze(&recipe);
    assert!(analysis.is_valid());
    assert_eq!(analysis.blocks().len(), 1);
    assert_eq!(analysis.diagnostics().len(), 1);
    assert_eq!(analysis.diagnostics()[0].code, DiagnosticCode::EmptyLoopBody);
    assert!(analysis.offending_steps().is_empty());
}

#[test]
fn structural_failure_zeroes_all_depths() {
    let recipe = RecipeBuilder::new()
        .loop_begin(2)
        .process("stir", Duration::from_secs(5))
        .build();

    let analysis = StructureAnalysis::analyze(&recipe);
    assert!(!analysis.is_valid());
    assert!(analysis.blocks().is_empty());
    assert_eq!(analysis.depths(), &[0, 0]);
}

#[test]
fn offending_steps_are_sorted_and_deduplicated() {
    // Four unclosed FORs: the depth violation lands on step 3 during the
    // walk, then steps 0..=3 are drained as unclosed, so step 3 is
    // reported twice and out of order.
    let recipe = RecipeBuilder::new()
        .loop_begin(1)
        .loop_begin(1)
        .loop_begin(1)
        .loop_begin(1)
        .process("stir", Duration::from_secs(5))
        .build();

    let analysis = StructureAnalysis::analyze(&recipe);
    let raw: Vec<usize> = analysis.diagnostics().iter().map(|d| d.step).collect();
    assert_eq!(raw, vec![3, 0, 1, 2, 3]);
    assert_eq!(analysis.offending_steps(), vec![0, 1, 2, 3]);
}

#[test]
fn analysis_is_idempotent() {
    let recipe = common::mixed_recipe();
    let first = StructureAnalysis::analyze(&recipe);
    let second = StructureAnalysis::analyze(&recipe);
    assert_eq!(first, second);
}

#[test]
fn enclosing_chain_is_outermost_first() {
    let recipe = common::mixed_recipe();
    let analysis = StructureAnalysis::analyze(&recipe);

    // spin sits inside both loops.
    let chain = analysis.enclosing_chain(4);
    let opens: Vec<usize> = chain.iter().map(|b| b.open).collect();
    assert_eq!(opens, vec![1, 3]);
    assert_eq!(analysis.innermost_enclosing(4).map(|b| b.open), Some(3));

    // rinse only inside the outer loop; markers are not inside their own
    // block.
    assert_eq!(analysis.enclosing_chain(2).len(), 1);
    assert_eq!(analysis.enclosing_chain(1).len(), 0);
    assert_eq!(analysis.enclosing_chain(3).len(), 1);

    // dry is top level.
    assert!(analysis.enclosing_chain(7).is_empty());
    assert!(analysis.innermost_enclosing(7).is_none());
}

#[test]
fn blocks_are_found_by_opener() {
    let recipe = common::mixed_recipe();
    let analysis = StructureAnalysis::analyze(&recipe);

    assert_eq!(analysis.block_at_open(1).map(|b| b.close), Some(6));
    assert_eq!(analysis.block_at_open(3).map(|b| b.iterations), Some(3));
    assert!(analysis.block_at_open(2).is_none());
}

#[test]
fn diagnostics_render_for_the_editor() {
    let recipe = RecipeBuilder::new()
        .loop_begin(0)
        .process("stir", Duration::from_secs(5))
        .loop_end()
        .loop_begin(70_000)
        .process("stir", Duration::from_secs(5))
        .loop_end()
        .build();

    let analysis = StructureAnalysis::analyze(&recipe);
    let rendered: Vec<String> = analysis
        .diagnostics()
        .iter()
        .map(ToString::to_string)
        .collect();

    expect![[r#"
        error[E101]: iteration count 0 must be at least 1 (step 0)
        error[E102]: iteration count 70000 exceeds the controller limit of 65535 (step 3)"#]]
    .assert_eq(&rendered.join("\n"));
}
