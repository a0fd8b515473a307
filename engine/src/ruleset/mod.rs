//! The three supported rule systems and the questions every one of them answers.
//!
//! Variants are static data; [`get_ruleset`] dispatches on [`RulesetId`] with an
//! exhaustive match, so adding a variant is a compile error until it is wired in.

mod dnd2014;
mod dnd2024;
pub mod tables;
mod tov;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::abilities::{Ability, Skill};
use crate::error::RulesError;
use tables::SlotRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RulesetId {
    #[serde(rename = "dnd2014")]
    Dnd2014,
    #[serde(rename = "dnd2024")]
    Dnd2024,
    #[serde(rename = "tov")]
    TalesOfTheValiant,
}

impl RulesetId {
    pub const ALL: [RulesetId; 3] = [
        RulesetId::Dnd2014,
        RulesetId::Dnd2024,
        RulesetId::TalesOfTheValiant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RulesetId::Dnd2014 => "dnd2014",
            RulesetId::Dnd2024 => "dnd2024",
            RulesetId::TalesOfTheValiant => "tov",
        }
    }
}

impl fmt::Display for RulesetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RulesetId {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RulesetId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RulesError::UnsupportedVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasterType {
    None,
    Third,
    Half,
    Full,
    Pact,
}

impl CasterType {
    /// Single-class slots at `level`. Pact magic lives in its own pool, see
    /// [`Ruleset::pact_slots`].
    pub fn slots_at(self, level: u32) -> Result<SlotRow, RulesError> {
        let level = table_index("class level", level)?;
        Ok(match self {
            CasterType::Full => tables::FULL_CASTER[level],
            CasterType::Half => tables::HALF_CASTER[level],
            CasterType::Third => tables::THIRD_CASTER[level],
            CasterType::None | CasterType::Pact => [0; 9],
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubclassProgression {
    pub selection_level: u32,
    pub feature_levels: &'static [u32],
}

impl SubclassProgression {
    pub fn has_subclass_at(&self, level: u32) -> bool {
        level >= self.selection_level
    }

    pub fn gets_feature_at(&self, level: u32) -> bool {
        self.feature_levels.contains(&level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassDefinition {
    pub name: &'static str,
    pub hit_die: u32,
    pub primary_ability: Ability,
    pub saving_throws: [Ability; 2],
    pub caster_type: CasterType,
    pub spellcasting_ability: Option<Ability>,
    pub subclass_progression: SubclassProgression,
    pub subclasses: &'static [&'static str],
    /// Subclasses that turn an otherwise non-casting class into a third caster.
    pub third_caster_subclasses: &'static [&'static str],
}

impl ClassDefinition {
    pub fn caster_type_for(&self, subclass: Option<&str>) -> CasterType {
        match subclass {
            Some(sub) if self.grants_third_casting(sub) => CasterType::Third,
            _ => self.caster_type,
        }
    }

    /// Casting ability for this class, taking third-caster subclasses into account.
    pub fn spellcasting_ability_for(&self, subclass: Option<&str>) -> Option<Ability> {
        match subclass {
            Some(sub) if self.grants_third_casting(sub) => Some(Ability::Int),
            _ => self.spellcasting_ability,
        }
    }

    fn grants_third_casting(&self, subclass: &str) -> bool {
        self.third_caster_subclasses
            .iter()
            .any(|s| s.eq_ignore_ascii_case(subclass.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityBonusSource {
    Race,
    Background,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Terminology {
    pub species: &'static str,
    pub subspecies: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationStep {
    Concept,
    Race,
    Species,
    Lineage,
    Heritage,
    Class,
    AbilityScores,
    Alignment,
    Background,
    Equipment,
    Spells,
    Personality,
    Finishing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    StandardArray,
    PointBuy,
    Rolled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityGeneration {
    pub methods: &'static [GenerationMethod],
    pub standard_array: [i32; 6],
    pub point_buy_budget: i32,
    /// Cost of each score from `point_buy_min` upward.
    pub point_buy_costs: &'static [i32],
    pub point_buy_min: i32,
    pub roll_notation: &'static str,
}

impl AbilityGeneration {
    pub const fn point_buy_max(&self) -> i32 {
        self.point_buy_min + self.point_buy_costs.len() as i32 - 1
    }
}

pub(crate) const SHARED_GENERATION: AbilityGeneration = AbilityGeneration {
    methods: &[
        GenerationMethod::StandardArray,
        GenerationMethod::PointBuy,
        GenerationMethod::Rolled,
    ],
    standard_array: tables::STANDARD_ARRAY,
    point_buy_budget: tables::POINT_BUY_BUDGET,
    point_buy_costs: &tables::POINT_BUY_COSTS,
    point_buy_min: 8,
    roll_notation: "4d6dl1",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PactSlots {
    pub count: u8,
    pub slot_level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Small,
    Medium,
}

/// `amount` added to `choose` of `options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityIncrease {
    pub options: &'static [Ability],
    pub amount: i32,
    pub choose: usize,
}

impl AbilityIncrease {
    /// Every option is taken, so the player has nothing to pick.
    pub fn is_fixed(&self) -> bool {
        self.choose >= self.options.len()
    }
}

/// A race, species or lineage, depending on the variant's terminology.
#[derive(Debug, Serialize)]
pub struct SpeciesDefinition {
    pub name: &'static str,
    pub size: Size,
    pub speed: u32,
    /// Range in feet, 0 without darkvision.
    pub darkvision: u32,
    pub ability_increases: &'static [AbilityIncrease],
    pub subspecies: &'static [&'static str],
}

impl SpeciesDefinition {
    /// Increases that need no choice, as `(ability, amount)` pairs.
    pub fn fixed_increases(&self) -> Vec<(Ability, i32)> {
        self.ability_increases
            .iter()
            .filter(|inc| inc.is_fixed())
            .flat_map(|inc| inc.options.iter().map(move |&ability| (ability, inc.amount)))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct BackgroundDefinition {
    pub name: &'static str,
    pub skill_proficiencies: [Skill; 2],
    /// Abilities the background may raise; empty where the species grants increases.
    pub ability_score_options: &'static [Ability],
    pub origin_feat: Option<&'static str>,
    pub feature: Option<&'static str>,
}

/// Where a character grew up, picked independently of lineage.
#[derive(Debug, Serialize)]
pub struct HeritageDefinition {
    pub name: &'static str,
    pub feature: &'static str,
}

/// Everything the engine needs to know about one rule system.
#[derive(Debug, Serialize)]
pub struct Ruleset {
    pub id: RulesetId,
    pub name: &'static str,
    pub description: &'static str,
    pub terminology: Terminology,
    pub ability_bonus_source: AbilityBonusSource,
    pub creation_order: &'static [CreationStep],
    pub classes: &'static [ClassDefinition],
    pub species: &'static [SpeciesDefinition],
    /// Only variants whose subspecies step is a standalone heritage fill this.
    pub heritages: &'static [HeritageDefinition],
    pub backgrounds: &'static [BackgroundDefinition],
    pub generation: AbilityGeneration,
    pub asi_levels: &'static [u32],
    pub talent_levels: &'static [u32],
    pub has_origin_feats: bool,
    pub score_cap: i32,
}

pub fn get_ruleset(id: RulesetId) -> &'static Ruleset {
    match id {
        RulesetId::Dnd2014 => &dnd2014::RULESET,
        RulesetId::Dnd2024 => &dnd2024::RULESET,
        RulesetId::TalesOfTheValiant => &tov::RULESET,
    }
}

/// Looks a ruleset up by its textual id (`dnd2014`, `dnd2024`, `tov`).
pub fn find_ruleset(id: &str) -> Result<&'static Ruleset, RulesError> {
    let id: RulesetId = id.parse()?;
    Ok(get_ruleset(id))
}

pub fn all_rulesets() -> impl Iterator<Item = &'static Ruleset> {
    RulesetId::ALL.into_iter().map(get_ruleset)
}

impl Ruleset {
    pub fn class_names(&self) -> Vec<&'static str> {
        self.classes.iter().map(|c| c.name).collect()
    }

    /// Case-insensitive class lookup.
    pub fn class(&self, name: &str) -> Result<&'static ClassDefinition, RulesError> {
        let classes: &'static [ClassDefinition] = self.classes;
        classes
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| RulesError::UnsupportedClass {
                ruleset: self.id.to_string(),
                class: name.to_string(),
            })
    }

    pub fn subclasses(&self, class: &str) -> Result<&'static [&'static str], RulesError> {
        Ok(self.class(class)?.subclasses)
    }

    pub fn subclass_progression(&self, class: &str) -> Result<SubclassProgression, RulesError> {
        Ok(self.class(class)?.subclass_progression)
    }

    pub fn subclass_selection_level(&self, class: &str) -> Result<u32, RulesError> {
        Ok(self.class(class)?.subclass_progression.selection_level)
    }

    pub fn hit_die(&self, class: &str) -> Result<u32, RulesError> {
        Ok(self.class(class)?.hit_die)
    }

    pub fn caster_type(&self, class: &str, subclass: Option<&str>) -> Result<CasterType, RulesError> {
        Ok(self.class(class)?.caster_type_for(subclass))
    }

    /// Multiclass slot table row for an aggregated caster level.
    pub fn spell_slots(&self, caster_level: u32) -> Result<SlotRow, RulesError> {
        let level = table_index("caster level", caster_level)?;
        Ok(tables::FULL_CASTER[level])
    }

    /// Pact magic pool for the summed levels of pact casters; `None` at level 0.
    pub fn pact_slots(&self, pact_level: u32) -> Result<Option<PactSlots>, RulesError> {
        let level = table_index("pact caster level", pact_level)?;
        let (count, slot_level) = tables::PACT_MAGIC[level];
        Ok((count > 0).then_some(PactSlots { count, slot_level }))
    }

    /// Slots a single-class character of `class` has at `level`.
    pub fn class_spell_slots(
        &self,
        class: &str,
        subclass: Option<&str>,
        level: u32,
    ) -> Result<SlotRow, RulesError> {
        let caster = self.caster_type(class, subclass)?;
        debug!(ruleset = %self.id, class, ?caster, level, "single-class slot lookup");
        caster.slots_at(level)
    }

    pub fn species_names(&self) -> Vec<&'static str> {
        self.species.iter().map(|s| s.name).collect()
    }

    pub fn find_species(&self, name: &str) -> Result<&'static SpeciesDefinition, RulesError> {
        let species: &'static [SpeciesDefinition] = self.species;
        species
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| RulesError::UnsupportedSpecies {
                ruleset: self.id.to_string(),
                species: name.to_string(),
            })
    }

    pub fn heritage_names(&self) -> Vec<&'static str> {
        self.heritages.iter().map(|h| h.name).collect()
    }

    pub fn find_heritage(&self, name: &str) -> Result<&'static HeritageDefinition, RulesError> {
        let heritages: &'static [HeritageDefinition] = self.heritages;
        heritages
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| RulesError::UnsupportedSubspecies {
                ruleset: self.id.to_string(),
                subspecies: name.to_string(),
            })
    }

    /// Heritage variants accept any known heritage; elsewhere the subspecies
    /// must be listed under `species`.
    pub fn check_subspecies(&self, species: Option<&str>, subspecies: &str) -> Result<(), RulesError> {
        if !self.heritages.is_empty() {
            return self.find_heritage(subspecies).map(|_| ());
        }
        let listed = match species {
            Some(name) => self.find_species(name)?.subspecies,
            None => &[],
        };
        if listed.iter().any(|s| s.eq_ignore_ascii_case(subspecies.trim())) {
            Ok(())
        } else {
            Err(RulesError::UnsupportedSubspecies {
                ruleset: self.id.to_string(),
                subspecies: subspecies.to_string(),
            })
        }
    }

    pub fn background_names(&self) -> Vec<&'static str> {
        self.backgrounds.iter().map(|b| b.name).collect()
    }

    pub fn find_background(&self, name: &str) -> Result<&'static BackgroundDefinition, RulesError> {
        let backgrounds: &'static [BackgroundDefinition] = self.backgrounds;
        backgrounds
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| RulesError::UnsupportedBackground {
                ruleset: self.id.to_string(),
                background: name.to_string(),
            })
    }

    pub fn is_asi_level(&self, level: u32) -> bool {
        self.asi_levels.contains(&level)
    }
}

fn table_index(what: &'static str, level: u32) -> Result<usize, RulesError> {
    if level > 20 {
        return Err(RulesError::range(what, level, 0, 20));
    }
    Ok(level as usize)
}

/// Class constructor shared by the variant tables.
#[allow(clippy::too_many_arguments)]
pub(crate) const fn class(
    name: &'static str,
    hit_die: u32,
    primary_ability: Ability,
    saving_throws: [Ability; 2],
    caster_type: CasterType,
    spellcasting_ability: Option<Ability>,
    subclass_progression: SubclassProgression,
    subclasses: &'static [&'static str],
) -> ClassDefinition {
    ClassDefinition {
        name,
        hit_die,
        primary_ability,
        saving_throws,
        caster_type,
        spellcasting_ability,
        subclass_progression,
        subclasses,
        third_caster_subclasses: &[],
    }
}

impl ClassDefinition {
    pub(crate) const fn with_third_casters(self, subclasses: &'static [&'static str]) -> Self {
        ClassDefinition {
            third_caster_subclasses: subclasses,
            ..self
        }
    }
}

pub(crate) const fn progression(selection_level: u32, feature_levels: &'static [u32]) -> SubclassProgression {
    SubclassProgression {
        selection_level,
        feature_levels,
    }
}

pub(crate) const fn species(
    name: &'static str,
    size: Size,
    speed: u32,
    darkvision: u32,
    ability_increases: &'static [AbilityIncrease],
) -> SpeciesDefinition {
    SpeciesDefinition {
        name,
        size,
        speed,
        darkvision,
        ability_increases,
        subspecies: &[],
    }
}

impl SpeciesDefinition {
    pub(crate) const fn with_subspecies(self, subspecies: &'static [&'static str]) -> Self {
        SpeciesDefinition { subspecies, ..self }
    }
}

/// `amount` to each of `options`.
pub(crate) const fn increase(options: &'static [Ability], amount: i32) -> AbilityIncrease {
    AbilityIncrease {
        options,
        amount,
        choose: options.len(),
    }
}

pub(crate) const fn choice(options: &'static [Ability], amount: i32, choose: usize) -> AbilityIncrease {
    AbilityIncrease {
        options,
        amount,
        choose,
    }
}

/// Background with a narrative feature and no ability options.
pub(crate) const fn background(name: &'static str, skills: [Skill; 2], feature: &'static str) -> BackgroundDefinition {
    BackgroundDefinition {
        name,
        skill_proficiencies: skills,
        ability_score_options: &[],
        origin_feat: None,
        feature: Some(feature),
    }
}

/// Background that raises ability scores and grants an origin feat.
pub(crate) const fn origin_background(
    name: &'static str,
    skills: [Skill; 2],
    ability_score_options: &'static [Ability],
    origin_feat: &'static str,
) -> BackgroundDefinition {
    BackgroundDefinition {
        name,
        skill_proficiencies: skills,
        ability_score_options,
        origin_feat: Some(origin_feat),
        feature: None,
    }
}
