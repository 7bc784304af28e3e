//! Difficulty levels and their search configurations.
//!
//! Each level maps to a fixed profile: a primary search plan and, for the
//! weaker levels, an alternate plan drawn with a fixed probability so play
//! is less predictable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::GameState;
use crate::eval::Heuristic;
use crate::search::{select_move, Decision, DepthPolicy, RootOptions, SearchPlan};

/// Engine playing strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A plan used instead of the primary one with probability `chance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlternatePlan {
    pub chance: f64,
    pub plan: SearchPlan,
}

/// The search configuration behind a difficulty level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub primary: SearchPlan,
    pub alternate: Option<AlternatePlan>,
}

impl DifficultyProfile {
    /// Draws the plan for one decision.
    pub fn pick_plan<R: Rng + ?Sized>(&self, rng: &mut R) -> SearchPlan {
        match self.alternate {
            Some(alt) if rng.gen_bool(alt.chance) => alt.plan,
            _ => self.primary,
        }
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Returns the protocol name of this level.
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parses a level from its name or its number (1-3).
    pub fn from_name(name: &str) -> Option<Difficulty> {
        match name.to_ascii_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "medium" | "2" => Some(Difficulty::Medium),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Returns the search profile for this level.
    ///
    /// Easy barely looks ahead and orders moves randomly. Medium searches
    /// three plies, mostly ordered by the weight table. Hard opens in the
    /// center and searches with the adaptive depth policy.
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                primary: plan(DepthPolicy::Fixed(2), Heuristic::Constant),
                alternate: Some(AlternatePlan {
                    chance: 0.3,
                    plan: plan(DepthPolicy::Fixed(1), Heuristic::Constant),
                }),
            },
            Difficulty::Medium => DifficultyProfile {
                primary: plan(DepthPolicy::Fixed(3), Heuristic::WeightTable),
                alternate: Some(AlternatePlan {
                    chance: 0.3,
                    plan: plan(DepthPolicy::Fixed(3), Heuristic::Constant),
                }),
            },
            Difficulty::Hard => DifficultyProfile {
                primary: SearchPlan {
                    center_opening: true,
                    ..plan(DepthPolicy::Adaptive, Heuristic::CenterDistanceAndHeight)
                },
                alternate: None,
            },
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn plan(depth: DepthPolicy, heuristic: Heuristic) -> SearchPlan {
    SearchPlan {
        depth,
        heuristic,
        use_search: true,
        center_opening: false,
    }
}

/// Chooses a column for the side to move at `difficulty`.
///
/// Returns `None` when the board is full. The state is searched in place
/// and left unchanged.
pub fn choose_move<R: Rng + ?Sized>(state: &mut GameState, difficulty: Difficulty, rng: &mut R) -> Option<usize> {
    choose_move_with(state, difficulty, &RootOptions::default(), rng).map(|d| d.column)
}

/// Like [`choose_move`], with explicit root options and full decision details.
pub fn choose_move_with<R: Rng + ?Sized>(
    state: &mut GameState,
    difficulty: Difficulty,
    options: &RootOptions,
    rng: &mut R,
) -> Option<Decision> {
    let plan = difficulty.profile().pick_plan(rng);
    select_move(state, &plan, options, rng)
}
