use super::{
    background, class, progression, species, tables, AbilityBonusSource, BackgroundDefinition,
    CasterType, ClassDefinition, CreationStep, HeritageDefinition, Ruleset, RulesetId, Size,
    SpeciesDefinition, SubclassProgression, Terminology, SHARED_GENERATION,
};
use crate::abilities::Ability::{Cha, Con, Dex, Int, Str, Wis};
use crate::abilities::Skill::*;

const AT_THREE: SubclassProgression = progression(3, &[3, 6, 10, 14]);

// No Cleric or Mechanist subclasses are recorded yet; they answer with an empty list.
static CLASSES: [ClassDefinition; 13] = [
    class("Barbarian", 12, Str, [Str, Con], CasterType::None, None, AT_THREE, &["Path of Wild Fury"]),
    class("Bard", 8, Cha, [Dex, Cha], CasterType::Full, Some(Cha), AT_THREE, &["College of Victory"]),
    class("Cleric", 8, Wis, [Wis, Cha], CasterType::Full, Some(Wis), AT_THREE, &[]),
    class("Druid", 8, Wis, [Int, Wis], CasterType::Full, Some(Wis), AT_THREE, &["Ring of the Leaf", "Ring of the Shifter"]),
    class("Fighter", 10, Str, [Str, Con], CasterType::None, None, AT_THREE, &["Spell Blade", "Weapon Master"])
        .with_third_casters(&["Spell Blade"]),
    class("Mechanist", 8, Int, [Con, Int], CasterType::Half, Some(Int), progression(3, &[3, 5, 9, 15]), &[]),
    class("Monk", 8, Dex, [Str, Dex], CasterType::None, None, AT_THREE, &["Way of the Iron Fist"]),
    class("Paladin", 10, Str, [Wis, Cha], CasterType::Half, Some(Cha), AT_THREE, &["Oath of Justice"]),
    class("Ranger", 10, Dex, [Str, Dex], CasterType::Half, Some(Wis), AT_THREE, &["Pack Master"]),
    class("Rogue", 8, Dex, [Dex, Int], CasterType::None, None, AT_THREE, &["Shadow Dancer"]),
    class("Sorcerer", 6, Cha, [Con, Cha], CasterType::Full, Some(Cha), AT_THREE, &["Storm Soul"]),
    class("Warlock", 8, Cha, [Wis, Cha], CasterType::Pact, Some(Cha), AT_THREE, &["The Cosmic Machine"]),
    class("Wizard", 6, Int, [Int, Wis], CasterType::Full, Some(Int), AT_THREE, &["School of War Magic"]),
];

static LINEAGES: [SpeciesDefinition; 8] = [
    species("Beastkin", Size::Medium, 30, 0, &[]),
    species("Dwarf", Size::Medium, 25, 60, &[]),
    species("Elf", Size::Medium, 30, 60, &[]),
    species("Human", Size::Medium, 30, 0, &[]),
    species("Kobold", Size::Small, 30, 60, &[]),
    species("Orc", Size::Medium, 30, 60, &[]),
    species("Smallfolk", Size::Small, 25, 0, &[]),
    species("Syderean", Size::Medium, 30, 60, &[]),
];

static HERITAGES: [HeritageDefinition; 8] = [
    HeritageDefinition { name: "Cottage", feature: "Rural Hospitality" },
    HeritageDefinition { name: "Diaspora", feature: "Cultural Chameleon" },
    HeritageDefinition { name: "Grove", feature: "Forest Wisdom" },
    HeritageDefinition { name: "Nomadic", feature: "Pathfinder" },
    HeritageDefinition { name: "Slum", feature: "Street Smart" },
    HeritageDefinition { name: "Stone", feature: "Underground Guide" },
    HeritageDefinition { name: "Supplicant", feature: "Temple Shelter" },
    HeritageDefinition { name: "Wildlands", feature: "Wild Instincts" },
];

static BACKGROUNDS: [BackgroundDefinition; 10] = [
    background("Acolyte", [Insight, Religion], "Shelter of the Faithful"),
    background("Artisan", [Investigation, Persuasion], "Guild Connections"),
    background("Charlatan", [Deception, SleightOfHand], "False Identity"),
    background("Criminal", [Deception, Stealth], "Criminal Contact"),
    background("Entertainer", [Acrobatics, Performance], "By Popular Demand"),
    background("Farmer", [AnimalHandling, Nature], "Rustic Hospitality"),
    background("Noble", [History, Persuasion], "Position of Privilege"),
    background("Sage", [Arcana, History], "Researcher"),
    background("Sailor", [Athletics, Perception], "Ship's Passage"),
    background("Soldier", [Athletics, Intimidation], "Military Rank"),
];

pub(super) static RULESET: Ruleset = Ruleset {
    id: RulesetId::TalesOfTheValiant,
    name: "Tales of the Valiant",
    description: "Tales of the Valiant RPG by Kobold Press (5e compatible)",
    terminology: Terminology {
        species: "Lineage",
        subspecies: "Heritage",
    },
    ability_bonus_source: AbilityBonusSource::None,
    creation_order: &[
        CreationStep::Concept,
        CreationStep::Class,
        CreationStep::AbilityScores,
        CreationStep::Lineage,
        CreationStep::Heritage,
        CreationStep::Background,
        CreationStep::Equipment,
        CreationStep::Spells,
        CreationStep::Personality,
        CreationStep::Finishing,
    ],
    classes: &CLASSES,
    species: &LINEAGES,
    heritages: &HERITAGES,
    backgrounds: &BACKGROUNDS,
    generation: SHARED_GENERATION,
    asi_levels: tables::ASI_LEVELS,
    talent_levels: tables::ASI_LEVELS,
    has_origin_feats: false,
    score_cap: 20,
};
