use recipe_model::{Duration, Recipe, RecipeBuilder};

/// heat 10s, hold 5s, drain 3s
pub fn flat_recipe() -> Recipe {
    RecipeBuilder::new()
        .process("heat", Duration::from_secs(10))
        .process("hold", Duration::from_secs(5))
        .process("drain", Duration::from_secs(3))
        .build()
}

/// FOR 3x [ dose 5s ]
pub fn single_loop() -> Recipe {
    RecipeBuilder::new()
        .loop_begin(3)
        .process("dose", Duration::from_secs(5))
        .loop_end()
        .build()
}

/// FOR 2x [ FOR 2x [ stir 5s ] ]
pub fn nested_two_by_two() -> Recipe {
    RecipeBuilder::new()
        .loop_begin(2)
        .loop_begin(2)
        .process("stir", Duration::from_secs(5))
        .loop_end()
        .loop_end()
        .build()
}

/// prewash 4s, FOR 2x [ rinse 6s, FOR 3x [ spin 2s ] ], dry 8s
pub fn mixed_recipe() -> Recipe {
    RecipeBuilder::new()
        .process("prewash", Duration::from_secs(4))
        .loop_begin(2)
        .process("rinse", Duration::from_secs(6))
        .loop_begin(3)
        .process("spin", Duration::from_secs(2))
        .loop_end()
        .loop_end()
        .process("dry", Duration::from_secs(8))
        .build()
}

/// heat 10s, FOR 4x [ dose 5s  (never closed)
pub fn unclosed_loop() -> Recipe {
    RecipeBuilder::new()
        .process("heat", Duration::from_secs(10))
        .loop_begin(4)
        .process("dose", Duration::from_secs(5))
        .build()
}
