use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ability_mod;
use crate::error::RulesError;
use crate::ruleset::{AbilityGeneration, Ruleset};

/// Hard ceiling for any score, reachable only through an allowed override.
pub const ABSOLUTE_MAX_SCORE: i32 = 30;
pub const DEFAULT_SCORE_CAP: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    #[serde(alias = "strength")]
    Str,
    #[serde(alias = "dexterity")]
    Dex,
    #[serde(alias = "constitution")]
    Con,
    #[serde(alias = "intelligence")]
    Int,
    #[serde(alias = "wisdom")]
    Wis,
    #[serde(alias = "charisma")]
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            Ability::Str => "STR",
            Ability::Dex => "DEX",
            Ability::Con => "CON",
            Ability::Int => "INT",
            Ability::Wis => "WIS",
            Ability::Cha => "CHA",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ability::Str => "Strength",
            Ability::Dex => "Dexterity",
            Ability::Con => "Constitution",
            Ability::Int => "Intelligence",
            Ability::Wis => "Wisdom",
            Ability::Cha => "Charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Ability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ability::ALL
            .into_iter()
            .find(|a| a.abbreviation().eq_ignore_ascii_case(s) || a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown ability '{s}'"))
    }
}

/// Cap policy for resolved scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreCap {
    pub cap: i32,
    /// Lets an explicit override go past `cap`, up to [`ABSOLUTE_MAX_SCORE`].
    pub allow_override_above_cap: bool,
}

impl Default for ScoreCap {
    fn default() -> Self {
        Self {
            cap: DEFAULT_SCORE_CAP,
            allow_override_above_cap: false,
        }
    }
}

impl ScoreCap {
    pub fn new(cap: i32) -> Self {
        Self {
            cap,
            ..Self::default()
        }
    }

    pub fn for_ruleset(ruleset: &Ruleset) -> Self {
        Self::new(ruleset.score_cap)
    }

    pub fn allowing_override(mut self) -> Self {
        self.allow_override_above_cap = true;
        self
    }

    fn validate(&self) -> Result<(), RulesError> {
        if !(1..=ABSOLUTE_MAX_SCORE).contains(&self.cap) {
            return Err(RulesError::range("score cap", self.cap, 1, i64::from(ABSOLUTE_MAX_SCORE)));
        }
        Ok(())
    }

    fn override_ceiling(&self) -> i32 {
        if self.allow_override_above_cap {
            ABSOLUTE_MAX_SCORE
        } else {
            self.cap
        }
    }
}

/// One ability: a base value, tagged bonuses and an optional override.
///
/// Bonuses are keyed by source tag ("race", "background", an item name...).
/// Setting a tag again replaces its previous amount. Deserializes from either
/// a bare number or a `{ base, bonuses, override }` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScoreRepr")]
pub struct AbilityScore {
    pub base: i32,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub bonuses: IndexMap<String, i32>,
    #[serde(default, rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_value: Option<i32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreRepr {
    Base(i32),
    Full {
        base: i32,
        #[serde(default)]
        bonuses: IndexMap<String, i32>,
        #[serde(default, rename = "override")]
        override_value: Option<i32>,
    },
}

impl From<ScoreRepr> for AbilityScore {
    fn from(repr: ScoreRepr) -> Self {
        match repr {
            ScoreRepr::Base(base) => Self::new(base),
            ScoreRepr::Full {
                base,
                bonuses,
                override_value,
            } => Self {
                base,
                bonuses,
                override_value,
            },
        }
    }
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self::new(10)
    }
}

impl From<i32> for AbilityScore {
    fn from(base: i32) -> Self {
        Self::new(base)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedScore {
    pub score: i32,
    pub modifier: i32,
    /// The uncapped sum was pulled back into range.
    pub clamped: bool,
}

impl AbilityScore {
    pub fn new(base: i32) -> Self {
        Self {
            base,
            bonuses: IndexMap::new(),
            override_value: None,
        }
    }

    /// Returns the amount previously stored under `tag`, if any.
    pub fn set_bonus(&mut self, tag: impl Into<String>, amount: i32) -> Option<i32> {
        self.bonuses.insert(tag.into(), amount)
    }

    pub fn remove_bonus(&mut self, tag: &str) -> Option<i32> {
        self.bonuses.shift_remove(tag)
    }

    pub fn with_bonus(mut self, tag: impl Into<String>, amount: i32) -> Self {
        self.set_bonus(tag, amount);
        self
    }

    pub fn with_override(mut self, value: i32) -> Self {
        self.override_value = Some(value);
        self
    }

    pub fn bonus_total(&self) -> i32 {
        self.bonuses.values().fold(0, |acc, b| acc.saturating_add(*b))
    }

    /// Final score and modifier under `cap`.
    ///
    /// An override replaces base and bonuses entirely and must itself be in range.
    /// Otherwise the sum is clamped into `1..=cap`.
    pub fn resolve(&self, cap: ScoreCap) -> Result<ResolvedScore, RulesError> {
        cap.validate()?;

        if let Some(value) = self.override_value {
            let ceiling = cap.override_ceiling();
            if !(1..=ceiling).contains(&value) {
                return Err(RulesError::range("ability score override", value, 1, i64::from(ceiling)));
            }
            return Ok(ResolvedScore {
                score: value,
                modifier: ability_mod(value),
                clamped: false,
            });
        }

        let raw = self.base.saturating_add(self.bonus_total());
        let score = raw.clamp(1, cap.cap);
        let clamped = score != raw;
        if clamped {
            warn!(base = self.base, raw, cap = cap.cap, "ability score clamped");
        }
        Ok(ResolvedScore {
            score,
            modifier: ability_mod(score),
            clamped,
        })
    }
}

/// The six scores of a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(rename = "str", alias = "strength", default)]
    pub str_: AbilityScore,
    #[serde(alias = "dexterity", default)]
    pub dex: AbilityScore,
    #[serde(alias = "constitution", default)]
    pub con: AbilityScore,
    #[serde(rename = "int", alias = "intelligence", default)]
    pub int_: AbilityScore,
    #[serde(alias = "wisdom", default)]
    pub wis: AbilityScore,
    #[serde(alias = "charisma", default)]
    pub cha: AbilityScore,
}

impl AbilityScores {
    /// Bases in STR, DEX, CON, INT, WIS, CHA order.
    pub fn from_bases(bases: [i32; 6]) -> Self {
        let [str_, dex, con, int_, wis, cha] = bases.map(AbilityScore::new);
        Self {
            str_,
            dex,
            con,
            int_,
            wis,
            cha,
        }
    }

    pub fn get(&self, ability: Ability) -> &AbilityScore {
        match ability {
            Ability::Str => &self.str_,
            Ability::Dex => &self.dex,
            Ability::Con => &self.con,
            Ability::Int => &self.int_,
            Ability::Wis => &self.wis,
            Ability::Cha => &self.cha,
        }
    }

    pub fn get_mut(&mut self, ability: Ability) -> &mut AbilityScore {
        match ability {
            Ability::Str => &mut self.str_,
            Ability::Dex => &mut self.dex,
            Ability::Con => &mut self.con,
            Ability::Int => &mut self.int_,
            Ability::Wis => &mut self.wis,
            Ability::Cha => &mut self.cha,
        }
    }

    pub fn resolve(&self, ability: Ability, cap: ScoreCap) -> Result<ResolvedScore, RulesError> {
        self.get(ability).resolve(cap)
    }

    pub fn resolve_all(&self, cap: ScoreCap) -> Result<IndexMap<Ability, ResolvedScore>, RulesError> {
        Ability::ALL
            .into_iter()
            .map(|a| self.resolve(a, cap).map(|r| (a, r)))
            .collect()
    }
}

/// Point-buy cost of a full set of scores, checked against the budget.
pub fn point_buy_cost(generation: &AbilityGeneration, scores: &[i32]) -> Result<i32, RulesError> {
    let min = generation.point_buy_min;
    let max = generation.point_buy_max();
    let mut total = 0;
    for &score in scores {
        if !(min..=max).contains(&score) {
            return Err(RulesError::range("point-buy score", score, i64::from(min), i64::from(max)));
        }
        total += generation.point_buy_costs[(score - min) as usize];
    }
    if total > generation.point_buy_budget {
        return Err(RulesError::range(
            "point-buy total",
            total,
            0,
            i64::from(generation.point_buy_budget),
        ));
    }
    Ok(total)
}

/// Checks that `scores` is a permutation of the standard array.
pub fn is_standard_array(generation: &AbilityGeneration, scores: &[i32; 6]) -> bool {
    let mut given = *scores;
    let mut expected = generation.standard_array;
    given.sort_unstable();
    expected.sort_unstable();
    given == expected
}

pub fn proficiency_bonus(total_level: u32) -> Result<i32, RulesError> {
    if !(1..=20).contains(&total_level) {
        return Err(RulesError::range("character level", total_level, 1, 20));
    }
    Ok(2 + (total_level as i32 - 1) / 4)
}

pub fn save_dc(proficiency_bonus: i32, ability_modifier: i32) -> i32 {
    8 + proficiency_bonus + ability_modifier
}

pub fn spell_attack_bonus(proficiency_bonus: i32, ability_modifier: i32) -> i32 {
    proficiency_bonus + ability_modifier
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillProficiency {
    #[default]
    None,
    Proficient,
    Expertise,
}

impl SkillProficiency {
    pub fn bonus(self, proficiency_bonus: i32) -> i32 {
        match self {
            SkillProficiency::None => 0,
            SkillProficiency::Proficient => proficiency_bonus,
            SkillProficiency::Expertise => proficiency_bonus * 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    pub fn ability(self) -> Ability {
        use Skill::*;
        match self {
            Athletics => Ability::Str,
            Acrobatics | SleightOfHand | Stealth => Ability::Dex,
            Arcana | History | Investigation | Nature | Religion => Ability::Int,
            AnimalHandling | Insight | Medicine | Perception | Survival => Ability::Wis,
            Deception | Intimidation | Performance | Persuasion => Ability::Cha,
        }
    }
}

pub fn skill_modifier(ability_modifier: i32, proficiency: SkillProficiency, proficiency_bonus: i32) -> i32 {
    ability_modifier + proficiency.bonus(proficiency_bonus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_itself_must_be_sane() {
        let err = AbilityScore::new(10).resolve(ScoreCap::new(0)).unwrap_err();
        assert!(matches!(err, RulesError::Range { what: "score cap", .. }));
    }

    #[test]
    fn skills_map_to_their_ability() {
        assert_eq!(Skill::Athletics.ability(), Ability::Str);
        assert_eq!(Skill::SleightOfHand.ability(), Ability::Dex);
        assert_eq!(Skill::Perception.ability(), Ability::Wis);
    }
}
