//! `recipe-model` - Shared data model for batch recipes.
//!
//! A recipe is a flat, ordered list of steps as shown in the editor grid.
//! Process steps carry a statically resolved duration; `FOR`/`END_FOR`
//! marker steps delimit repeated blocks and take no execution time of
//! their own. The model is deliberately dumb: structure checking lives in
//! `recipe-analysis` and all timing math lives in `recipe-timing`.
//!
//! Recipes are immutable values. An editor mutation builds a new [`Recipe`]
//! (usually through [`RecipeBuilder`]) and hands the whole value to the
//! analysis pipeline again; nothing here is updated in place.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod duration;
mod recipe;
mod step;
mod telemetry;

pub use duration::Duration;
pub use recipe::{Recipe, RecipeBuilder};
pub use step::{Step, StepKind, MAX_LOOP_DEPTH};
pub use telemetry::RuntimeSnapshot;
