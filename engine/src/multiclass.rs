//! Combining per-class levels into character-wide numbers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::{self, DiceExpression, DiceTerm, RandomSource};
use crate::error::RulesError;
use crate::ruleset::tables::SlotRow;
use crate::ruleset::{CasterType, PactSlots, Ruleset};

/// Levels taken in one class. The first entry of a character's list is the
/// class they started in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevelEntry {
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subclass: Option<String>,
    pub level: u32,
}

impl ClassLevelEntry {
    pub fn new(class: impl Into<String>, level: u32) -> Self {
        Self {
            class: class.into(),
            subclass: None,
            level,
        }
    }

    pub fn with_subclass(mut self, subclass: impl Into<String>) -> Self {
        self.subclass = Some(subclass.into());
        self
    }

    fn subclass(&self) -> Option<&str> {
        self.subclass.as_deref()
    }
}

impl fmt::Display for ClassLevelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subclass {
            Some(sub) => write!(f, "{} ({}) {}", self.class, sub, self.level),
            None => write!(f, "{} {}", self.class, self.level),
        }
    }
}

/// `Class:Level` or `Class:Subclass:Level`, e.g. `Fighter:Eldritch Knight:7`.
impl FromStr for ClassLevelEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let (class, subclass, level) = match parts.as_slice() {
            [class, level] => (*class, None, *level),
            [class, sub, level] => (*class, Some(*sub), *level),
            _ => return Err(format!("expected Class:Level or Class:Subclass:Level, got '{s}'")),
        };
        if class.is_empty() {
            return Err(format!("missing class name in '{s}'"));
        }
        let level: u32 = level
            .parse()
            .map_err(|_| format!("invalid level '{level}' in '{s}'"))?;
        let mut entry = ClassLevelEntry::new(class, level);
        if let Some(sub) = subclass.filter(|s| !s.is_empty()) {
            entry = entry.with_subclass(sub);
        }
        Ok(entry)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPointMethod {
    /// Fixed `die / 2 + 1` per level after the first.
    #[default]
    Average,
    /// Roll the hit die for every level after the first.
    Rolled,
    /// Full hit die every level.
    Maximum,
}

/// Summed class levels per casting progression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CasterLevels {
    pub full: u32,
    pub half: u32,
    pub third: u32,
    pub pact: u32,
}

impl CasterLevels {
    /// Levels are summed per progression before dividing, so two half-caster
    /// classes at odd levels still add up.
    pub fn caster_level(&self) -> u32 {
        self.full + self.half / 2 + self.third / 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpellSlots {
    pub caster_level: u32,
    /// Slots per spell level, 1st through 9th.
    pub slots: SlotRow,
    pub pact: Option<PactSlots>,
}

impl SpellSlots {
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|&s| s == 0) && self.pact.is_none()
    }

    /// `(spell level, count)` for every level that has slots.
    pub fn by_level(&self) -> Vec<(u8, u8)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 0)
            .map(|(i, &n)| (i as u8 + 1, n))
            .collect()
    }
}

/// Checks the list shape and returns the total level. Each entry and the sum
/// must fall in 1..=20.
fn validate(entries: &[ClassLevelEntry]) -> Result<u32, RulesError> {
    if entries.is_empty() {
        return Err(RulesError::EmptyClassList);
    }
    let mut total = 0u32;
    for entry in entries {
        if !(1..=20).contains(&entry.level) {
            return Err(RulesError::range("class level", entry.level, 1, 20));
        }
        total = total.saturating_add(entry.level);
    }
    if total > 20 {
        return Err(RulesError::range("character level", total, 1, 20));
    }
    Ok(total)
}

pub fn total_level(entries: &[ClassLevelEntry]) -> Result<u32, RulesError> {
    validate(entries)
}

pub fn caster_levels(ruleset: &Ruleset, entries: &[ClassLevelEntry]) -> Result<CasterLevels, RulesError> {
    validate(entries)?;
    let mut levels = CasterLevels::default();
    for entry in entries {
        let caster = ruleset.caster_type(&entry.class, entry.subclass())?;
        match caster {
            CasterType::Full => levels.full += entry.level,
            CasterType::Half => levels.half += entry.level,
            CasterType::Third => levels.third += entry.level,
            CasterType::Pact => levels.pact += entry.level,
            CasterType::None => {}
        }
    }
    debug!(?levels, "caster levels by progression");
    Ok(levels)
}

pub fn caster_level(ruleset: &Ruleset, entries: &[ClassLevelEntry]) -> Result<u32, RulesError> {
    Ok(caster_levels(ruleset, entries)?.caster_level())
}

/// A single class reads its own progression table; a multiclass character
/// reads the shared table at the combined caster level. Pact magic is always
/// a separate pool.
pub fn spell_slots(ruleset: &Ruleset, entries: &[ClassLevelEntry]) -> Result<SpellSlots, RulesError> {
    let levels = caster_levels(ruleset, entries)?;
    let caster_level = levels.caster_level();
    let slots = match entries {
        [only] => ruleset.class_spell_slots(&only.class, only.subclass(), only.level)?,
        _ => ruleset.spell_slots(caster_level)?,
    };
    let pact = ruleset.pact_slots(levels.pact)?;
    debug!(caster_level, single_class = entries.len() == 1, ?slots, ?pact, "spell slots");
    Ok(SpellSlots {
        caster_level,
        slots,
        pact,
    })
}

/// Maximum hit points. The first level of the first class is always the full
/// hit die; every other level follows `method`. CON applies per level and the
/// result never drops below 1.
pub fn hit_points<R: RandomSource + ?Sized>(
    ruleset: &Ruleset,
    entries: &[ClassLevelEntry],
    con_modifier: i32,
    method: HitPointMethod,
    rng: &mut R,
) -> Result<i32, RulesError> {
    validate(entries)?;
    let mut total = 0i32;
    for (i, entry) in entries.iter().enumerate() {
        let hit_die = ruleset.hit_die(&entry.class)?;
        for level in 1..=entry.level {
            let gained = if i == 0 && level == 1 {
                hit_die as i32
            } else {
                match method {
                    HitPointMethod::Average => (hit_die / 2 + 1) as i32,
                    HitPointMethod::Maximum => hit_die as i32,
                    HitPointMethod::Rolled => {
                        let expression = DiceExpression::from(DiceTerm::new(1, hit_die));
                        dice::roll(&expression, &mut *rng).total as i32
                    }
                }
            };
            total += gained + con_modifier;
        }
        debug!(class = %entry.class, hit_die, running_total = total, "hit points");
    }
    Ok(total.max(1))
}

/// Hit dice available for resting, keyed by die size.
pub fn hit_dice_pool(ruleset: &Ruleset, entries: &[ClassLevelEntry]) -> Result<BTreeMap<u32, u32>, RulesError> {
    validate(entries)?;
    let mut pool = BTreeMap::new();
    for entry in entries {
        *pool.entry(ruleset.hit_die(&entry.class)?).or_insert(0) += entry.level;
    }
    Ok(pool)
}

/// Whether this class has reached its subclass level.
pub fn subclass_available(ruleset: &Ruleset, entry: &ClassLevelEntry) -> Result<bool, RulesError> {
    Ok(ruleset
        .subclass_progression(&entry.class)?
        .has_subclass_at(entry.level))
}

/// Classes that are past their subclass level but have none recorded.
pub fn pending_subclasses<'a>(
    ruleset: &Ruleset,
    entries: &'a [ClassLevelEntry],
) -> Result<Vec<&'a str>, RulesError> {
    let mut pending = Vec::new();
    for entry in entries {
        let has_options = !ruleset.subclasses(&entry.class)?.is_empty();
        if entry.subclass.is_none() && has_options && subclass_available(ruleset, entry)? {
            pending.push(entry.class.as_str());
        }
    }
    Ok(pending)
}
