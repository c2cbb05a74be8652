#![no_main]

use libfuzzer_sys::fuzz_target;
use recipe_model::{Duration, RecipeBuilder, RuntimeSnapshot};
use recipe_timing::harness::EngineHarness;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let recipe = RecipeBuilder::new()
        .process("prewash", Duration::from_secs(4))
        .loop_begin(i32::from(data[0] % 5) + 1)
        .process("rinse", Duration::from_secs(6))
        .loop_begin(i32::from(data[1] % 5) + 1)
        .process("spin", Duration::from_secs(2))
        .loop_end()
        .loop_end()
        .process("dry", Duration::from_secs(8))
        .build();

    let mut harness = EngineHarness::with_recipe(&recipe);
    let mut previous: Option<(RuntimeSnapshot, recipe_timing::TimeRemaining)> = None;

    for chunk in data[2..].chunks(6) {
        if chunk.len() < 6 {
            break;
        }
        let snapshot = RuntimeSnapshot::with_counters(
            usize::from(chunk[0] % 10),
            [
                u32::from(chunk[1] % 8),
                u32::from(chunk[2] % 8),
                u32::from(chunk[3] % 8),
            ],
            Duration::from_millis(i64::from(u16::from_le_bytes([chunk[4], chunk[5]]))),
        );

        let tick = harness.feed(snapshot);
        assert!(tick.reported.step_left >= Duration::ZERO);
        assert!(tick.reported.total_left >= Duration::ZERO);

        // Within one phase the countdown never climbs, whatever the raw
        // elapsed value did.
        if let Some((last_snapshot, last_reported)) = previous {
            if last_snapshot.current_step == snapshot.current_step
                && last_snapshot.level_counters == snapshot.level_counters
            {
                assert!(tick.reported.step_left <= last_reported.step_left);
                assert!(tick.reported.total_left <= last_reported.total_left);
            }
        }
        previous = Some((snapshot, tick.reported));
    }
});
