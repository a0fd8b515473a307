use super::{
    background, choice, class, increase, progression, species, tables, AbilityBonusSource,
    AbilityIncrease, BackgroundDefinition, CasterType, ClassDefinition, CreationStep, Ruleset, RulesetId, Size,
    SpeciesDefinition, Terminology, SHARED_GENERATION,
};
use crate::abilities::Ability::{self, Cha, Con, Dex, Int, Str, Wis};
use crate::abilities::Skill::*;

pub(super) const BARBARIAN_PATHS: &[&str] = &[
    "Path of the Berserker",
    "Path of the Totem Warrior",
    "Path of Wild Magic",
];
pub(super) const BARD_COLLEGES: &[&str] = &["College of Lore", "College of Valor", "College of Swords"];
pub(super) const CLERIC_DOMAINS: &[&str] = &["Life Domain", "Light Domain", "War Domain"];
pub(super) const DRUID_CIRCLES: &[&str] = &["Circle of the Land", "Circle of the Moon", "Circle of Spores"];
pub(super) const FIGHTER_ARCHETYPES: &[&str] = &["Champion", "Battle Master", "Eldritch Knight"];
pub(super) const MONK_TRADITIONS: &[&str] = &[
    "Way of the Open Hand",
    "Way of Shadow",
    "Way of the Four Elements",
];
pub(super) const PALADIN_OATHS: &[&str] = &["Oath of Devotion", "Oath of the Ancients", "Oath of Vengeance"];
pub(super) const RANGER_CONCLAVES: &[&str] = &["Hunter", "Beast Master", "Gloom Stalker"];
pub(super) const ROGUE_ARCHETYPES: &[&str] = &["Thief", "Assassin", "Arcane Trickster"];
pub(super) const SORCERER_ORIGINS: &[&str] = &["Draconic Bloodline", "Wild Magic", "Shadow Magic"];
pub(super) const WARLOCK_PATRONS: &[&str] = &["The Fiend", "The Great Old One", "The Celestial"];
pub(super) const WIZARD_SCHOOLS: &[&str] = &[
    "School of Evocation",
    "School of Abjuration",
    "School of Divination",
];

pub(super) const ELDRITCH_KNIGHT: &[&str] = &["Eldritch Knight"];
pub(super) const ARCANE_TRICKSTER: &[&str] = &["Arcane Trickster"];

// Subclass choice lands anywhere from level 1 to 3 depending on the class.
static CLASSES: [ClassDefinition; 12] = [
    class("Barbarian", 12, Str, [Str, Con], CasterType::None, None, progression(3, &[3, 6, 10, 14]), BARBARIAN_PATHS),
    class("Bard", 8, Cha, [Dex, Cha], CasterType::Full, Some(Cha), progression(3, &[3, 6, 14]), BARD_COLLEGES),
    class("Cleric", 8, Wis, [Wis, Cha], CasterType::Full, Some(Wis), progression(1, &[1, 2, 6, 8, 17]), CLERIC_DOMAINS),
    class("Druid", 8, Wis, [Int, Wis], CasterType::Full, Some(Wis), progression(2, &[2, 6, 10, 14]), DRUID_CIRCLES),
    class("Fighter", 10, Str, [Str, Con], CasterType::None, None, progression(3, &[3, 7, 10, 15, 18]), FIGHTER_ARCHETYPES)
        .with_third_casters(ELDRITCH_KNIGHT),
    class("Monk", 8, Dex, [Str, Dex], CasterType::None, None, progression(3, &[3, 6, 11, 17]), MONK_TRADITIONS),
    class("Paladin", 10, Str, [Wis, Cha], CasterType::Half, Some(Cha), progression(3, &[3, 7, 15, 20]), PALADIN_OATHS),
    class("Ranger", 10, Dex, [Str, Dex], CasterType::Half, Some(Wis), progression(3, &[3, 7, 11, 15]), RANGER_CONCLAVES),
    class("Rogue", 8, Dex, [Dex, Int], CasterType::None, None, progression(3, &[3, 9, 13, 17]), ROGUE_ARCHETYPES)
        .with_third_casters(ARCANE_TRICKSTER),
    class("Sorcerer", 6, Cha, [Con, Cha], CasterType::Full, Some(Cha), progression(1, &[1, 6, 14, 18]), SORCERER_ORIGINS),
    class("Warlock", 8, Cha, [Wis, Cha], CasterType::Pact, Some(Cha), progression(1, &[1, 6, 10, 14]), WARLOCK_PATRONS),
    class("Wizard", 6, Int, [Int, Wis], CasterType::Full, Some(Int), progression(2, &[2, 6, 10, 14]), WIZARD_SCHOOLS),
];

const ALL_ABILITIES: &[Ability] = &[Str, Dex, Con, Int, Wis, Cha];
const PLUS_ONE_TO_ALL: AbilityIncrease = increase(ALL_ABILITIES, 1);
const PLUS_ONE_TO_TWO: AbilityIncrease = choice(ALL_ABILITIES, 1, 2);
const HALF_ELF_CHOICE: AbilityIncrease = choice(&[Str, Dex, Con, Int, Wis], 1, 2);
const STR_2: AbilityIncrease = increase(&[Str], 2);
const DEX_2: AbilityIncrease = increase(&[Dex], 2);
const CON_1: AbilityIncrease = increase(&[Con], 1);
const CON_2: AbilityIncrease = increase(&[Con], 2);
const INT_1: AbilityIncrease = increase(&[Int], 1);
const INT_2: AbilityIncrease = increase(&[Int], 2);
const WIS_1: AbilityIncrease = increase(&[Wis], 1);
const CHA_1: AbilityIncrease = increase(&[Cha], 1);
const CHA_2: AbilityIncrease = increase(&[Cha], 2);

// Subraces are also listed as races of their own, carrying the combined increases.
static RACES: [SpeciesDefinition; 15] = [
    species("Human", Size::Medium, 30, 0, &[PLUS_ONE_TO_ALL]),
    species("Variant Human", Size::Medium, 30, 0, &[PLUS_ONE_TO_TWO]),
    species("Elf", Size::Medium, 30, 60, &[DEX_2]).with_subspecies(&["High Elf", "Wood Elf", "Dark Elf"]),
    species("High Elf", Size::Medium, 30, 60, &[DEX_2, INT_1]),
    species("Wood Elf", Size::Medium, 35, 60, &[DEX_2, WIS_1]),
    species("Dwarf", Size::Medium, 25, 60, &[CON_2]).with_subspecies(&["Hill Dwarf", "Mountain Dwarf"]),
    species("Hill Dwarf", Size::Medium, 25, 60, &[CON_2, WIS_1]),
    species("Mountain Dwarf", Size::Medium, 25, 60, &[CON_2, STR_2]),
    species("Halfling", Size::Small, 25, 0, &[DEX_2]).with_subspecies(&["Lightfoot Halfling", "Stout Halfling"]),
    species("Lightfoot Halfling", Size::Small, 25, 0, &[DEX_2, CHA_1]),
    species("Dragonborn", Size::Medium, 30, 0, &[STR_2, CHA_1]),
    species("Gnome", Size::Small, 25, 60, &[INT_2]).with_subspecies(&["Forest Gnome", "Rock Gnome"]),
    species("Half-Elf", Size::Medium, 30, 60, &[CHA_2, HALF_ELF_CHOICE]),
    species("Half-Orc", Size::Medium, 30, 60, &[STR_2, CON_1]),
    species("Tiefling", Size::Medium, 30, 60, &[CHA_2, INT_1]),
];

static BACKGROUNDS: [BackgroundDefinition; 13] = [
    background("Acolyte", [Insight, Religion], "Shelter of the Faithful"),
    background("Charlatan", [Deception, SleightOfHand], "False Identity"),
    background("Criminal", [Deception, Stealth], "Criminal Contact"),
    background("Entertainer", [Acrobatics, Performance], "By Popular Demand"),
    background("Folk Hero", [AnimalHandling, Survival], "Rustic Hospitality"),
    background("Guild Artisan", [Insight, Persuasion], "Guild Membership"),
    background("Hermit", [Medicine, Religion], "Discovery"),
    background("Noble", [History, Persuasion], "Position of Privilege"),
    background("Outlander", [Athletics, Survival], "Wanderer"),
    background("Sage", [Arcana, History], "Researcher"),
    background("Sailor", [Athletics, Perception], "Ship's Passage"),
    background("Soldier", [Athletics, Intimidation], "Military Rank"),
    background("Urchin", [SleightOfHand, Stealth], "City Secrets"),
];

pub(super) static RULESET: Ruleset = Ruleset {
    id: RulesetId::Dnd2014,
    name: "D&D 5e (2014)",
    description: "Dungeons & Dragons 5th Edition 2014 Player's Handbook",
    terminology: Terminology {
        species: "Race",
        subspecies: "Subrace",
    },
    ability_bonus_source: AbilityBonusSource::Race,
    creation_order: &[
        CreationStep::Race,
        CreationStep::Class,
        CreationStep::AbilityScores,
        CreationStep::Alignment,
        CreationStep::Background,
        CreationStep::Equipment,
        CreationStep::Spells,
        CreationStep::Personality,
        CreationStep::Finishing,
    ],
    classes: &CLASSES,
    species: &RACES,
    heritages: &[],
    backgrounds: &BACKGROUNDS,
    generation: SHARED_GENERATION,
    asi_levels: tables::ASI_LEVELS,
    talent_levels: &[],
    has_origin_feats: false,
    score_cap: 20,
};
