//! Calling-layer surface: the handful of entry points a UI or CLI needs, and a
//! one-shot character sheet built from a snapshot.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::abilities::{self, Ability, AbilityScore, AbilityScores, ResolvedScore, ScoreCap};
use crate::content::builtin_characters;
use crate::dice::{Dice, DiceExpression, RandomSource, RollResult};
use crate::error::{DiceError, Error, RulesError};
use crate::multiclass::{self, ClassLevelEntry, HitPointMethod, SpellSlots};
use crate::ruleset::{self, Ruleset, RulesetId};

pub fn parse(text: &str) -> Result<DiceExpression, DiceError> {
    crate::dice::parse(text)
}

pub fn roll<R: RandomSource + ?Sized>(expression: &DiceExpression, rng: &mut R) -> RollResult {
    crate::dice::roll(expression, rng)
}

pub fn get_ruleset(id: &str) -> Result<&'static Ruleset, RulesError> {
    ruleset::find_ruleset(id)
}

pub fn compute_ability_score(score: &AbilityScore, cap: ScoreCap) -> Result<ResolvedScore, RulesError> {
    score.resolve(cap)
}

pub fn compute_hit_points<R: RandomSource + ?Sized>(
    ruleset: &Ruleset,
    entries: &[ClassLevelEntry],
    con_modifier: i32,
    method: HitPointMethod,
    rng: &mut R,
) -> Result<i32, RulesError> {
    multiclass::hit_points(ruleset, entries, con_modifier, method, rng)
}

pub fn compute_caster_level(ruleset: &Ruleset, entries: &[ClassLevelEntry]) -> Result<u32, RulesError> {
    multiclass::caster_level(ruleset, entries)
}

pub fn compute_spell_slots(ruleset: &Ruleset, entries: &[ClassLevelEntry]) -> Result<SpellSlots, RulesError> {
    multiclass::spell_slots(ruleset, entries)
}

pub fn compute_save_dc(proficiency_bonus: i32, ability_modifier: i32) -> i32 {
    abilities::save_dc(proficiency_bonus, ability_modifier)
}

/// A character snapshot as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    /// Kept as text so an unknown id surfaces as an unsupported-ruleset error.
    pub ruleset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subspecies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub classes: Vec<ClassLevelEntry>,
    pub abilities: AbilityScores,
}

impl Character {
    pub fn from_yaml(text: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }
}

pub fn load_builtin(id: &str) -> Result<Character, Error> {
    let text = builtin_characters()
        .get(id)
        .copied()
        .ok_or_else(|| Error::UnknownBuiltin(id.to_string()))?;
    Character::from_yaml(text)
}

/// Policy knobs for [`build_sheet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SheetConfig {
    /// Overrides the snapshot's own ruleset id.
    pub ruleset: Option<String>,
    pub hit_points: HitPointMethod,
    /// Falls back to the ruleset's cap.
    pub score_cap: Option<ScoreCap>,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spellcasting {
    pub ability: Ability,
    pub save_dc: i32,
    pub attack_bonus: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterSummary {
    pub name: String,
    pub ruleset: RulesetId,
    pub ruleset_name: &'static str,
    pub species_term: &'static str,
    pub species: Option<String>,
    pub subspecies_term: &'static str,
    pub subspecies: Option<String>,
    pub background: Option<String>,
    pub classes: Vec<ClassLevelEntry>,
    pub total_level: u32,
    pub proficiency_bonus: i32,
    pub abilities: IndexMap<Ability, ResolvedScore>,
    pub max_hit_points: i32,
    pub hit_dice: BTreeMap<u32, u32>,
    pub spell_slots: SpellSlots,
    pub spellcasting: Option<Spellcasting>,
    pub pending_subclasses: Vec<String>,
    pub log: Vec<String>,
}

/// Seeds a [`Dice`] from the config and summarizes.
pub fn build_sheet(character: &Character, cfg: &SheetConfig) -> Result<CharacterSummary, Error> {
    let mut dice = Dice::from_seed(cfg.seed);
    summarize(character, cfg, &mut dice)
}

/// Runs the resolver and the aggregator once over a snapshot.
pub fn summarize<R: RandomSource + ?Sized>(
    character: &Character,
    cfg: &SheetConfig,
    rng: &mut R,
) -> Result<CharacterSummary, Error> {
    let mut log = Vec::new();
    let ruleset = get_ruleset(cfg.ruleset.as_deref().unwrap_or(&character.ruleset))?;
    let cap = cfg.score_cap.unwrap_or_else(|| ScoreCap::for_ruleset(ruleset));
    let entries = character.classes.as_slice();

    let abilities = character.abilities.resolve_all(cap)?;
    for (ability, resolved) in &abilities {
        let clamp_note = if resolved.clamped { " (clamped)" } else { "" };
        log.push(format!(
            "[ABIL][{}] {} ({:+}){}",
            ability, resolved.score, resolved.modifier, clamp_note
        ));
    }

    let total_level = multiclass::total_level(entries)?;
    let proficiency_bonus = abilities::proficiency_bonus(total_level)?;
    log.push(format!("[LVL] total {} → proficiency {:+}", total_level, proficiency_bonus));

    let con = character.abilities.resolve(Ability::Con, cap)?.modifier;
    let max_hit_points = multiclass::hit_points(ruleset, entries, con, cfg.hit_points, rng)?;
    let hit_dice = multiclass::hit_dice_pool(ruleset, entries)?;
    log.push(format!(
        "[HP] {:?} with CON {:+} → {} (hit dice {})",
        cfg.hit_points,
        con,
        max_hit_points,
        format_hit_dice(&hit_dice)
    ));

    let spell_slots = multiclass::spell_slots(ruleset, entries)?;
    if !spell_slots.is_empty() {
        log.push(format!(
            "[SLOTS] caster level {} → {}",
            spell_slots.caster_level,
            format_slots(&spell_slots)
        ));
    }

    let spellcasting = spellcasting_for(ruleset, entries)?
        .map(|ability| -> Result<Spellcasting, RulesError> {
            let modifier = character.abilities.resolve(ability, cap)?.modifier;
            Ok(Spellcasting {
                ability,
                save_dc: abilities::save_dc(proficiency_bonus, modifier),
                attack_bonus: abilities::spell_attack_bonus(proficiency_bonus, modifier),
            })
        })
        .transpose()?;
    if let Some(sc) = &spellcasting {
        log.push(format!(
            "[SPELL] {} save DC {}, attack {:+}",
            sc.ability, sc.save_dc, sc.attack_bonus
        ));
    }

    let pending_subclasses: Vec<String> = multiclass::pending_subclasses(ruleset, entries)?
        .into_iter()
        .map(str::to_string)
        .collect();
    for class in &pending_subclasses {
        log.push(format!("[SUB][{}] subclass choice pending", class));
    }

    check_origin(ruleset, character, &mut log)?;

    debug!(lines = log.len(), "sheet derivation log");
    info!(name = %character.name, ruleset = %ruleset.id, total_level, max_hit_points, "built character sheet");

    Ok(CharacterSummary {
        name: character.name.clone(),
        ruleset: ruleset.id,
        ruleset_name: ruleset.name,
        species_term: ruleset.terminology.species,
        species: character.species.clone(),
        subspecies_term: ruleset.terminology.subspecies,
        subspecies: character.subspecies.clone(),
        background: character.background.clone(),
        classes: character.classes.clone(),
        total_level,
        proficiency_bonus,
        abilities,
        max_hit_points,
        hit_dice,
        spell_slots,
        spellcasting,
        pending_subclasses,
        log,
    })
}

/// Species, subspecies and background must all exist in the active ruleset.
fn check_origin(ruleset: &Ruleset, character: &Character, log: &mut Vec<String>) -> Result<(), RulesError> {
    let terms = ruleset.terminology;
    if let Some(name) = &character.species {
        let species = ruleset.find_species(name)?;
        let increases: Vec<String> = species
            .fixed_increases()
            .iter()
            .map(|(ability, amount)| format!("{} {:+}", ability, amount))
            .collect();
        log.push(format!(
            "[ORIGIN] {} {}: {:?}, speed {}{}",
            terms.species,
            species.name,
            species.size,
            species.speed,
            if increases.is_empty() {
                String::new()
            } else {
                format!(", {}", increases.join(" "))
            }
        ));
    }
    if let Some(sub) = &character.subspecies {
        ruleset.check_subspecies(character.species.as_deref(), sub)?;
        log.push(format!("[ORIGIN] {} {}", terms.subspecies, sub));
    }
    if let Some(name) = &character.background {
        let background = ruleset.find_background(name)?;
        match background.origin_feat {
            Some(feat) => log.push(format!("[ORIGIN] Background {}, origin feat {}", background.name, feat)),
            None => log.push(format!("[ORIGIN] Background {}", background.name)),
        }
    }
    Ok(())
}

/// Casting ability of the first class in the list that casts at all.
fn spellcasting_for(ruleset: &Ruleset, entries: &[ClassLevelEntry]) -> Result<Option<Ability>, RulesError> {
    for entry in entries {
        let class = ruleset.class(&entry.class)?;
        if let Some(ability) = class.spellcasting_ability_for(entry.subclass.as_deref()) {
            return Ok(Some(ability));
        }
    }
    Ok(None)
}

fn format_hit_dice(pool: &BTreeMap<u32, u32>) -> String {
    pool.iter()
        .rev()
        .map(|(die, count)| format!("{}d{}", count, die))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn format_slots(slots: &SpellSlots) -> String {
    let mut parts: Vec<String> = slots
        .by_level()
        .into_iter()
        .map(|(level, count)| format!("{}:{}", ordinal(level), count))
        .collect();
    if let Some(pact) = slots.pact {
        parts.push(format!("pact {}×{}", pact.count, ordinal(pact.slot_level)));
    }
    parts.join(" ")
}

fn ordinal(n: u8) -> String {
    let suffix = match n {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

impl fmt::Display for CharacterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.ruleset_name)?;
        if let Some(species) = &self.species {
            writeln!(f, "{}: {}", self.species_term, species)?;
        }
        if let Some(sub) = &self.subspecies {
            writeln!(f, "{}: {}", self.subspecies_term, sub)?;
        }
        if let Some(background) = &self.background {
            writeln!(f, "Background: {}", background)?;
        }
        let classes: Vec<String> = self.classes.iter().map(ToString::to_string).collect();
        writeln!(f, "Classes: {}", classes.join(" / "))?;
        writeln!(f, "Level {}, proficiency {:+}", self.total_level, self.proficiency_bonus)?;
        let scores: Vec<String> = self
            .abilities
            .iter()
            .map(|(a, r)| format!("{} {} ({:+})", a, r.score, r.modifier))
            .collect();
        writeln!(f, "{}", scores.join("  "))?;
        writeln!(f, "HP {} (hit dice {})", self.max_hit_points, format_hit_dice(&self.hit_dice))?;
        if !self.spell_slots.is_empty() {
            writeln!(
                f,
                "Slots (caster level {}): {}",
                self.spell_slots.caster_level,
                format_slots(&self.spell_slots)
            )?;
        }
        if let Some(sc) = &self.spellcasting {
            writeln!(f, "Spellcasting {}: save DC {}, attack {:+}", sc.ability, sc.save_dc, sc.attack_bonus)?;
        }
        for class in &self.pending_subclasses {
            writeln!(f, "{} subclass not chosen yet", class)?;
        }
        Ok(())
    }
}
