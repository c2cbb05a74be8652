//! Static timing table aggregation.

mod common;

use common::{flat_recipe, mixed_recipe, nested_two_by_two, single_loop, unclosed_loop};
use recipe_analysis::StructureAnalysis;
use recipe_model::Duration;
use recipe_timing::TimingTable;

fn table_for(recipe: &recipe_model::Recipe) -> TimingTable {
    let analysis = StructureAnalysis::analyze(recipe);
    TimingTable::compute(recipe, &analysis)
}

#[test]
fn flat_recipe_sums_sequentially() {
    let table = table_for(&flat_recipe());

    assert!(!table.is_flat());
    assert_eq!(table.total_duration(), Duration::from_secs(18));
    assert_eq!(table.remaining_from(1), Duration::from_secs(8));
    assert_eq!(table.remaining_from(2), Duration::from_secs(3));
    assert_eq!(table.remaining_from(3), Duration::ZERO);
    assert_eq!(table.step_duration(0), Duration::from_secs(10));
}

#[test]
fn single_loop_multiplies_body() {
    let table = table_for(&single_loop());

    assert_eq!(table.single_pass(0), Duration::from_secs(5));
    assert_eq!(table.total_duration(), Duration::from_secs(15));
    // Markers themselves contribute nothing.
    assert_eq!(table.step_duration(0), Duration::ZERO);
    assert_eq!(table.step_duration(2), Duration::ZERO);
}

#[test]
fn nested_loops_fold_innermost_first() {
    let table = table_for(&nested_two_by_two());

    assert_eq!(table.single_pass(1), Duration::from_secs(5));
    assert_eq!(table.single_pass(0), Duration::from_secs(10));
    assert_eq!(table.total_duration(), Duration::from_secs(20));
}

#[test]
fn mixed_recipe_combines_loops_and_leaves() {
    let table = table_for(&mixed_recipe());

    // inner FOR 3x [ spin 2s ]
    assert_eq!(table.single_pass(3), Duration::from_secs(2));
    // outer pass: rinse 6s + 3 x 2s
    assert_eq!(table.single_pass(1), Duration::from_secs(12));
    // prewash 4s + 2 x 12s + dry 8s
    assert_eq!(table.total_duration(), Duration::from_secs(36));
    // from rinse onward, mid-pass: rinse + one full inner loop + dry
    assert_eq!(table.remaining_from(2), Duration::from_secs(20));
    assert_eq!(table.remaining_from(7), Duration::from_secs(8));
}

#[test]
fn broken_structure_degrades_to_flat_sums() {
    let recipe = unclosed_loop();
    let analysis = StructureAnalysis::analyze(&recipe);
    let table = TimingTable::compute(&recipe, &analysis);

    assert!(!analysis.is_valid());
    assert!(table.is_flat());
    // 10s + 5s, the FOR marker counts for nothing and multiplies nothing.
    assert_eq!(table.total_duration(), Duration::from_secs(15));
    assert_eq!(table.single_pass(1), Duration::ZERO);
}

#[test]
fn out_of_range_lookups_read_zero() {
    let table = table_for(&flat_recipe());

    assert_eq!(table.step_duration(99), Duration::ZERO);
    assert_eq!(table.remaining_from(99), Duration::ZERO);
    assert_eq!(table.single_pass(0), Duration::ZERO);
}

#[test]
fn recomputation_is_bit_identical() {
    let recipe = mixed_recipe();
    let first_analysis = StructureAnalysis::analyze(&recipe);
    let second_analysis = StructureAnalysis::analyze(&recipe);
    assert_eq!(first_analysis, second_analysis);

    let first = TimingTable::compute(&recipe, &first_analysis);
    let second = TimingTable::compute(&recipe, &second_analysis);
    assert_eq!(first, second);
}
