use smol_str::SmolStr;

use crate::duration::Duration;

/// Deepest loop nesting the engine supports.
///
/// Matches the controller's block of iteration counters: telemetry reports
/// one counter word per nesting level, so a recipe that nests deeper could
/// not be tracked at runtime even if the editor accepted it.
pub const MAX_LOOP_DEPTH: usize = 3;

/// What a recipe row does when the controller executes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Executable process step with a statically resolved duration.
    ///
    /// The duration stays zero until the step's parameterisation has been
    /// resolved (ramp steps, for example, derive it from setpoints). A zero
    /// duration is valid input everywhere downstream.
    Process {
        /// Time one execution of this step takes.
        duration: Duration,
    },
    /// `FOR` marker opening a repeated block.
    LoopBegin {
        /// Iteration count as entered in the editor.
        ///
        /// Kept in its raw signed form; the semantic pass rejects values
        /// outside the controller's counter range.
        declared_iterations: i32,
    },
    /// `END_FOR` marker closing the innermost open block.
    LoopEnd,
}

impl StepKind {
    /// Static duration contributed by the step itself.
    ///
    /// Loop markers take no execution time; their blocks contribute through
    /// repetition of the enclosed process steps instead.
    #[must_use]
    pub fn static_duration(&self) -> Duration {
        match self {
            StepKind::Process { duration } => *duration,
            StepKind::LoopBegin { .. } | StepKind::LoopEnd => Duration::ZERO,
        }
    }

    /// Returns `true` for `FOR`/`END_FOR` markers.
    #[must_use]
    pub fn is_marker(&self) -> bool {
        !matches!(self, StepKind::Process { .. })
    }
}

/// One row of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 0-based position in the recipe, stable until the next structural
    /// edit.
    pub index: usize,
    /// Display name shown in the editor grid.
    pub label: SmolStr,
    /// Step behaviour.
    pub kind: StepKind,
}
