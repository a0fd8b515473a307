use super::dnd2014::{
    ARCANE_TRICKSTER, BARBARIAN_PATHS, BARD_COLLEGES, CLERIC_DOMAINS, DRUID_CIRCLES,
    ELDRITCH_KNIGHT, FIGHTER_ARCHETYPES, MONK_TRADITIONS, PALADIN_OATHS, RANGER_CONCLAVES,
    ROGUE_ARCHETYPES, SORCERER_ORIGINS, WARLOCK_PATRONS, WIZARD_SCHOOLS,
};
use super::{
    class, origin_background, progression, species, tables, AbilityBonusSource, BackgroundDefinition,
    CasterType, ClassDefinition, CreationStep, Ruleset, RulesetId, Size, SpeciesDefinition,
    SubclassProgression, Terminology, SHARED_GENERATION,
};
use crate::abilities::Ability::{Cha, Con, Dex, Int, Str, Wis};
use crate::abilities::Skill::*;

// Every class picks its subclass at 3 and gains features on the same levels.
const AT_THREE: SubclassProgression = progression(3, &[3, 6, 10, 14]);

static CLASSES: [ClassDefinition; 12] = [
    class("Barbarian", 12, Str, [Str, Con], CasterType::None, None, AT_THREE, BARBARIAN_PATHS),
    class("Bard", 8, Cha, [Dex, Cha], CasterType::Full, Some(Cha), AT_THREE, BARD_COLLEGES),
    class("Cleric", 8, Wis, [Wis, Cha], CasterType::Full, Some(Wis), AT_THREE, CLERIC_DOMAINS),
    class("Druid", 8, Wis, [Int, Wis], CasterType::Full, Some(Wis), AT_THREE, DRUID_CIRCLES),
    class("Fighter", 10, Str, [Str, Con], CasterType::None, None, AT_THREE, FIGHTER_ARCHETYPES)
        .with_third_casters(ELDRITCH_KNIGHT),
    class("Monk", 8, Dex, [Str, Dex], CasterType::None, None, AT_THREE, MONK_TRADITIONS),
    class("Paladin", 10, Str, [Wis, Cha], CasterType::Half, Some(Cha), AT_THREE, PALADIN_OATHS),
    class("Ranger", 10, Dex, [Str, Dex], CasterType::Half, Some(Wis), AT_THREE, RANGER_CONCLAVES),
    class("Rogue", 8, Dex, [Dex, Int], CasterType::None, None, AT_THREE, ROGUE_ARCHETYPES)
        .with_third_casters(ARCANE_TRICKSTER),
    class("Sorcerer", 6, Cha, [Con, Cha], CasterType::Full, Some(Cha), AT_THREE, SORCERER_ORIGINS),
    class("Warlock", 8, Cha, [Wis, Cha], CasterType::Pact, Some(Cha), AT_THREE, WARLOCK_PATRONS),
    class("Wizard", 6, Int, [Int, Wis], CasterType::Full, Some(Int), AT_THREE, WIZARD_SCHOOLS),
];

// Ability increases moved to backgrounds.
static SPECIES: [SpeciesDefinition; 11] = [
    species("Human", Size::Medium, 30, 0, &[]),
    species("Elf", Size::Medium, 30, 60, &[]).with_subspecies(&["High Elf", "Wood Elf", "Drow"]),
    species("Dwarf", Size::Medium, 30, 60, &[]),
    species("Halfling", Size::Small, 30, 0, &[]),
    species("Gnome", Size::Small, 30, 60, &[]),
    species("Half-Orc", Size::Medium, 30, 60, &[]),
    species("Tiefling", Size::Medium, 30, 60, &[]),
    species("Dragonborn", Size::Medium, 30, 0, &[]),
    species("Orc", Size::Medium, 30, 60, &[]),
    species("Goliath", Size::Medium, 35, 0, &[]),
    species("Aasimar", Size::Medium, 30, 60, &[]),
];

static BACKGROUNDS: [BackgroundDefinition; 16] = [
    origin_background("Acolyte", [Insight, Religion], &[Int, Wis, Cha], "Magic Initiate (Cleric)"),
    origin_background("Artisan", [Investigation, Persuasion], &[Str, Dex, Int], "Crafter"),
    origin_background("Charlatan", [Deception, SleightOfHand], &[Dex, Con, Cha], "Skilled"),
    origin_background("Criminal", [SleightOfHand, Stealth], &[Dex, Con, Int], "Alert"),
    origin_background("Entertainer", [Acrobatics, Performance], &[Str, Dex, Cha], "Musician"),
    origin_background("Farmer", [AnimalHandling, Nature], &[Str, Con, Wis], "Tough"),
    origin_background("Guard", [Athletics, Perception], &[Str, Int, Wis], "Alert"),
    origin_background("Guide", [Stealth, Survival], &[Dex, Con, Wis], "Magic Initiate (Druid)"),
    origin_background("Hermit", [Medicine, Religion], &[Con, Wis, Cha], "Healer"),
    origin_background("Merchant", [AnimalHandling, Persuasion], &[Con, Int, Cha], "Lucky"),
    origin_background("Noble", [History, Persuasion], &[Str, Int, Cha], "Skilled"),
    origin_background("Sage", [Arcana, History], &[Con, Int, Wis], "Magic Initiate (Wizard)"),
    origin_background("Sailor", [Acrobatics, Perception], &[Str, Dex, Wis], "Tavern Brawler"),
    origin_background("Scribe", [Investigation, Perception], &[Dex, Int, Wis], "Skilled"),
    origin_background("Soldier", [Athletics, Intimidation], &[Str, Dex, Con], "Savage Attacker"),
    origin_background("Wayfarer", [Insight, Stealth], &[Dex, Wis, Cha], "Lucky"),
];

pub(super) static RULESET: Ruleset = Ruleset {
    id: RulesetId::Dnd2024,
    name: "D&D 5e (2024)",
    description: "Dungeons & Dragons 5th Edition 2024 Player's Handbook",
    terminology: Terminology {
        species: "Species",
        subspecies: "Subspecies",
    },
    ability_bonus_source: AbilityBonusSource::Background,
    creation_order: &[
        CreationStep::Class,
        CreationStep::Background,
        CreationStep::Equipment,
        CreationStep::Species,
        CreationStep::AbilityScores,
        CreationStep::Alignment,
        CreationStep::Spells,
        CreationStep::Personality,
        CreationStep::Finishing,
    ],
    classes: &CLASSES,
    species: &SPECIES,
    heritages: &[],
    backgrounds: &BACKGROUNDS,
    generation: SHARED_GENERATION,
    asi_levels: tables::ASI_LEVELS,
    talent_levels: &[],
    has_origin_feats: true,
    score_cap: 20,
};
