pub mod abilities;
pub mod api;
pub mod content;
pub mod dice;
pub mod error;
pub mod multiclass;
pub mod ruleset;

pub use abilities::{Ability, AbilityScore, AbilityScores, ResolvedScore, ScoreCap};
pub use dice::{Dice, DiceExpression, RandomSource, RollResult};
pub use error::{DiceError, Error, RulesError};
pub use multiclass::{ClassLevelEntry, HitPointMethod};
pub use ruleset::{get_ruleset, Ruleset, RulesetId};

use dice::{DiceTerm, Modifier};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl AdMode {
    /// Advantage and disadvantage from different sources cancel out.
    pub fn combine(self, other: AdMode) -> AdMode {
        match (self, other) {
            (AdMode::Normal, m) | (m, AdMode::Normal) => m,
            (a, b) if a == b => a,
            _ => AdMode::Normal,
        }
    }

    pub fn d20(self) -> DiceTerm {
        match self {
            AdMode::Normal => DiceTerm::new(1, 20),
            AdMode::Advantage => DiceTerm::new(2, 20).with_modifier(Modifier::KeepHigh(1)),
            AdMode::Disadvantage => DiceTerm::new(2, 20).with_modifier(Modifier::KeepLow(1)),
        }
    }
}

/// d20 plus a flat modifier under the given mode.
pub fn d20<R: RandomSource + ?Sized>(rng: &mut R, modifier: i32, mode: AdMode) -> RollResult {
    let expression = DiceExpression::from(mode.d20()).with_flat(modifier);
    dice::roll(&expression, rng)
}

#[derive(Debug, Clone, Copy)]
pub struct CheckInput {
    pub dc: i32,
    pub modifier: i32,
    pub mode: AdMode,
}

#[derive(Debug, Clone, Copy)]
pub struct CheckResult {
    pub roll: i32,
    pub total: i32,
    pub dc: i32,
    pub passed: bool,
    pub natural_20: bool,
    pub natural_1: bool,
}

/// Roll a d20 (with advantage/disadvantage), add modifier, compare vs DC.
pub fn check<R: RandomSource + ?Sized>(rng: &mut R, input: CheckInput) -> CheckResult {
    let result = d20(rng, input.modifier, input.mode);
    let total = result.total as i32;
    CheckResult {
        roll: total - input.modifier,
        total,
        dc: input.dc,
        passed: total >= input.dc,
        natural_20: result.natural_20,
        natural_1: result.natural_1,
    }
}

/// D&D ability modifier = floor((score - 10) / 2) for integer scores.
pub fn ability_mod(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}
