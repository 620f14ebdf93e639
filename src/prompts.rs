//! Static prompt catalog. Selection is uniformly random per task and has no
//! effect on rendering.

use rand::{Rng, seq::SliceRandom};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptCategory {
    Default,
    WithLabels,
    Simple,
}

const DEFAULT_PROMPTS: [&str; 3] = [
    "Rearrange the symbols from their initial positions to match the exact target configuration. Each symbol must move to its designated final position.",
    "Reorder the symbols to transform the initial sequence into the target sequence. All symbols must be repositioned to achieve the exact final arrangement.",
    "Animate the symbols moving from the initial arrangement to the target arrangement. Each symbol transitions smoothly to its specified final position.",
];

const WITH_LABELS_PROMPTS: [&str; 3] = [
    "Rearrange the symbols from positions in the first image to match the positions shown in the final image. Each symbol moves to its exact target location.",
    "Transform the initial symbol sequence into the target sequence by moving each symbol to its designated final position as shown in the goal state.",
    "Reorder the symbols: move each symbol from its starting position to its ending position to achieve the exact configuration shown in the final image.",
];

const SIMPLE_PROMPTS: [&str; 3] = [
    "Move the symbols to match the target arrangement.",
    "Rearrange the symbols to achieve the goal configuration.",
    "Reorder the symbols from the initial state to the final state.",
];

pub fn prompts_for(category: PromptCategory) -> &'static [&'static str] {
    match category {
        PromptCategory::Default => &DEFAULT_PROMPTS,
        PromptCategory::WithLabels => &WITH_LABELS_PROMPTS,
        PromptCategory::Simple => &SIMPLE_PROMPTS,
    }
}

/// Pick a random prompt for the category.
pub fn prompt_for<R: Rng>(category: PromptCategory, rng: &mut R) -> &'static str {
    prompts_for(category)
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_PROMPTS[0])
}
