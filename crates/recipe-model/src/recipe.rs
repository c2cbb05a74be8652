use smol_str::SmolStr;

use crate::duration::Duration;
use crate::step::{Step, StepKind};

/// Ordered, immutable list of recipe steps.
///
/// Step indices always match positions in this list. An editor change
/// produces a new `Recipe`; analysis results computed from an older value
/// keep referring to the indices of that older value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    steps: Vec<Step>,
}

impl Recipe {
    /// Builds a recipe from labelled step kinds, assigning indices by
    /// position.
    #[must_use]
    pub fn from_steps(steps: impl IntoIterator<Item = (SmolStr, StepKind)>) -> Self {
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, (label, kind))| Step { index, label, kind })
            .collect();
        Self { steps }
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` for the empty recipe.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`, if any.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// All steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Convenience builder for composing recipes in order.
///
/// Loop markers get fixed grid labels; process steps are named by the
/// caller. Indices are assigned on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RecipeBuilder {
    steps: Vec<(SmolStr, StepKind)>,
}

impl RecipeBuilder {
    /// Starts an empty recipe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a process step.
    #[must_use]
    pub fn process(mut self, label: impl Into<SmolStr>, duration: Duration) -> Self {
        self.steps.push((label.into(), StepKind::Process { duration }));
        self
    }

    /// Appends a `FOR` marker with the given iteration count.
    #[must_use]
    pub fn loop_begin(mut self, declared_iterations: i32) -> Self {
        self.steps.push((
            SmolStr::new_static("FOR"),
            StepKind::LoopBegin {
                declared_iterations,
            },
        ));
        self
    }

    /// Appends an `END_FOR` marker.
    #[must_use]
    pub fn loop_end(mut self) -> Self {
        self.steps
            .push((SmolStr::new_static("END_FOR"), StepKind::LoopEnd));
        self
    }

    /// Finishes the recipe.
    #[must_use]
    pub fn build(self) -> Recipe {
        Recipe::from_steps(self.steps)
    }
}
