//! Deterministic cost estimate for a tutorial idea
//!
//! ```text
//! cost = 200
//! cost *= multiplier[difficulty]   // Beginner 1.0, Intermediate 1.3, Advanced 1.6, unknown 1.0
//! cost += (sections - 5) * 20      // sections = outline length, 5 when empty
//! cost += prerequisites * 20
//! cost = round_half_up(cost / 50) * 50
//! ```
//!
//! The arithmetic runs in tenths so the multipliers are exact and the result
//! never depends on floating point representation.

use crate::analyzer::types::{Difficulty, TutorialIdea};

const BASE_COST: i64 = 200;
const SECTION_STEP: i64 = 20;
const PREREQUISITE_STEP: i64 = 20;
const DEFAULT_SECTIONS: usize = 5;
const ROUNDING_UNIT: i64 = 50;

/// Difficulty multiplier, in tenths
fn multiplier_tenths(difficulty: Option<Difficulty>) -> i64 {
    match difficulty {
        Some(Difficulty::Beginner) | None => 10,
        Some(Difficulty::Intermediate) => 13,
        Some(Difficulty::Advanced) => 16,
    }
}

/// Computes the cost from the three inputs the formula depends on
///
/// # Examples
///
/// ```
/// use tutorial_forge::analyzer::{estimate_cost, Difficulty};
///
/// // 200 + 0 + 40 = 240, rounded to 250
/// assert_eq!(estimate_cost(Some(Difficulty::Beginner), 5, 2), 250);
/// ```
pub fn estimate_cost(
    difficulty: Option<Difficulty>,
    section_count: usize,
    prerequisite_count: usize,
) -> u32 {
    let sections = if section_count == 0 {
        DEFAULT_SECTIONS
    } else {
        section_count
    };
    let sections = i64::try_from(sections).unwrap_or(i64::MAX / 1000);
    let prerequisites = i64::try_from(prerequisite_count).unwrap_or(i64::MAX / 1000);

    let tenths = BASE_COST * multiplier_tenths(difficulty)
        + (sections - DEFAULT_SECTIONS as i64).saturating_mul(SECTION_STEP * 10)
        + prerequisites.saturating_mul(PREREQUISITE_STEP * 10);

    let unit = ROUNDING_UNIT * 10;
    let rounded_tenths = (tenths.saturating_add(unit / 2)).div_euclid(unit) * unit;
    let cost = (rounded_tenths / 10).max(0);

    u32::try_from(cost).unwrap_or(u32::MAX)
}

/// Computes the cost of a parsed idea
pub fn estimate_idea_cost(idea: &TutorialIdea) -> u32 {
    estimate_cost(idea.difficulty, idea.outline.len(), idea.prerequisites.len())
}
