#![no_main]

use libfuzzer_sys::fuzz_target;
use recipe_analysis::StructureAnalysis;
use recipe_model::{Duration, Recipe, RecipeBuilder};
use recipe_timing::TimingTable;

const MAX_STEPS: usize = 256;

fn decode_recipe(data: &[u8]) -> Recipe {
    let mut builder = RecipeBuilder::new();
    for chunk in data.chunks(2).take(MAX_STEPS) {
        let tag = chunk[0];
        let arg = i32::from(*chunk.get(1).unwrap_or(&0));
        builder = match tag % 4 {
            0 => builder.process("step", Duration::from_secs(i64::from(arg))),
            // Counts straddle every interesting boundary: negative, zero,
            // in range, and past the 16-bit counter limit.
            1 => builder.loop_begin(arg - 2),
            2 => builder.loop_begin(arg.saturating_mul(1024)),
            _ => builder.loop_end(),
        };
    }
    builder.build()
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let recipe = decode_recipe(data);
    let analysis = StructureAnalysis::analyze(&recipe);

    // Derived facts must stay inside the recipe no matter the input.
    for block in analysis.blocks() {
        assert!(block.open < block.close);
        assert!(block.close < recipe.len());
        assert!(block.iterations >= 1);
    }
    for step in 0..recipe.len() {
        assert!(analysis.depth_of(step) <= recipe_model::MAX_LOOP_DEPTH);
    }
    if !analysis.is_valid() {
        assert!(!analysis.offending_steps().is_empty());
        assert!(analysis.blocks().is_empty());
    }

    let table = TimingTable::compute(&recipe, &analysis);
    let _ = table.total_duration();
    for step in 0..recipe.len() {
        let _ = table.remaining_from(step);
    }

    // Re-running the pipeline on the unchanged recipe is bit-identical.
    let again = StructureAnalysis::analyze(&recipe);
    assert_eq!(analysis, again);
    assert_eq!(table, TimingTable::compute(&recipe, &again));
});
