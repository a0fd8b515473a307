use charsheet_engine::abilities::{
    is_standard_array, point_buy_cost, proficiency_bonus, save_dc, skill_modifier, spell_attack_bonus, Skill,
    SkillProficiency,
};
use charsheet_engine::{get_ruleset, Ability, AbilityScore, AbilityScores, RulesError, RulesetId, ScoreCap};

#[test]
fn bonuses_sum_and_replace_by_tag() {
    let mut score = AbilityScore::new(15).with_bonus("race", 1);
    assert_eq!(score.set_bonus("asi_4", 2), None);
    assert_eq!(score.set_bonus("race", 2), Some(1));
    assert_eq!(score.bonus_total(), 4);

    let resolved = score.resolve(ScoreCap::default()).unwrap();
    assert_eq!(resolved.score, 19);
    assert_eq!(resolved.modifier, 4);
    assert!(!resolved.clamped);

    assert_eq!(score.remove_bonus("asi_4"), Some(2));
    assert_eq!(score.resolve(ScoreCap::default()).unwrap().score, 17);
}

#[test]
fn sums_are_clamped_into_range() {
    let high = AbilityScore::new(18).with_bonus("belt", 4).with_bonus("race", 2);
    let resolved = high.resolve(ScoreCap::new(20)).unwrap();
    assert_eq!(resolved.score, 20);
    assert!(resolved.clamped);

    let low = AbilityScore::new(3).with_bonus("curse", -6);
    let resolved = low.resolve(ScoreCap::default()).unwrap();
    assert_eq!(resolved.score, 1);
    assert_eq!(resolved.modifier, -5);
    assert!(resolved.clamped);
}

#[test]
fn cap_is_a_parameter() {
    let score = AbilityScore::new(20).with_bonus("epic boon", 4);
    assert_eq!(score.resolve(ScoreCap::new(24)).unwrap().score, 24);
    assert_eq!(score.resolve(ScoreCap::new(30)).unwrap().score, 24);
    assert!(matches!(
        score.resolve(ScoreCap::new(0)),
        Err(RulesError::Range { what: "score cap", .. })
    ));
    assert!(matches!(
        score.resolve(ScoreCap::new(31)),
        Err(RulesError::Range { what: "score cap", .. })
    ));
}

#[test]
fn override_replaces_base_and_bonuses() {
    let score = AbilityScore::new(8).with_bonus("race", 2).with_override(19);
    let resolved = score.resolve(ScoreCap::default()).unwrap();
    assert_eq!(resolved.score, 19);
    assert_eq!(resolved.modifier, 4);
    assert!(!resolved.clamped);
}

#[test]
fn override_above_cap_needs_permission() {
    let giant = AbilityScore::new(10).with_override(25);
    assert_eq!(
        giant.resolve(ScoreCap::default()).unwrap_err(),
        RulesError::Range {
            what: "ability score override",
            value: 25,
            min: 1,
            max: 20,
        }
    );
    let resolved = giant.resolve(ScoreCap::default().allowing_override()).unwrap();
    assert_eq!(resolved.score, 25);
    assert_eq!(resolved.modifier, 7);

    let absurd = AbilityScore::new(10).with_override(31);
    assert!(absurd.resolve(ScoreCap::default().allowing_override()).is_err());
    let zero = AbilityScore::new(10).with_override(0);
    assert!(zero.resolve(ScoreCap::default().allowing_override()).is_err());
}

#[test]
fn six_scores_resolve_in_order() {
    let mut scores = AbilityScores::from_bases([15, 14, 13, 12, 10, 8]);
    scores.get_mut(Ability::Cha).set_bonus("background", 2);
    let all = scores.resolve_all(ScoreCap::default()).unwrap();
    let order: Vec<Ability> = all.keys().copied().collect();
    assert_eq!(order, Ability::ALL.to_vec());
    assert_eq!(all[&Ability::Str].modifier, 2);
    assert_eq!(all[&Ability::Cha].score, 10);
}

#[test]
fn scores_deserialize_from_numbers_or_maps() {
    let yaml = r#"
str: 15
dex: { base: 14, bonuses: { race: 2 } }
con: { base: 12, override: 19 }
int: 10
wis: 10
cha: 8
"#;
    let scores: AbilityScores = serde_yaml::from_str(yaml).unwrap();
    let cap = ScoreCap::default();
    assert_eq!(scores.resolve(Ability::Str, cap).unwrap().score, 15);
    assert_eq!(scores.resolve(Ability::Dex, cap).unwrap().score, 16);
    assert_eq!(scores.resolve(Ability::Con, cap).unwrap().score, 19);
}

#[test]
fn ability_names_parse() {
    assert_eq!("str".parse::<Ability>().unwrap(), Ability::Str);
    assert_eq!("Wisdom".parse::<Ability>().unwrap(), Ability::Wis);
    assert!("luck".parse::<Ability>().is_err());
}

#[test]
fn point_buy_costs() {
    let generation = &get_ruleset(RulesetId::Dnd2014).generation;
    assert_eq!(point_buy_cost(generation, &[15, 15, 15, 8, 8, 8]).unwrap(), 27);
    assert_eq!(point_buy_cost(generation, &[8; 6]).unwrap(), 0);
    assert_eq!(point_buy_cost(generation, &[15, 14, 13, 12, 10, 8]).unwrap(), 27);
    assert!(matches!(
        point_buy_cost(generation, &[16, 8, 8, 8, 8, 8]),
        Err(RulesError::Range { what: "point-buy score", .. })
    ));
    assert!(matches!(
        point_buy_cost(generation, &[15, 15, 15, 15, 8, 8]),
        Err(RulesError::Range { what: "point-buy total", .. })
    ));
}

#[test]
fn standard_array_in_any_order() {
    let generation = &get_ruleset(RulesetId::TalesOfTheValiant).generation;
    assert!(is_standard_array(generation, &[8, 10, 12, 13, 14, 15]));
    assert!(!is_standard_array(generation, &[15, 15, 13, 12, 10, 8]));
}

#[test]
fn proficiency_by_total_level() {
    let expected = [(1, 2), (4, 2), (5, 3), (8, 3), (9, 4), (13, 5), (17, 6), (20, 6)];
    for (level, bonus) in expected {
        assert_eq!(proficiency_bonus(level).unwrap(), bonus, "level {level}");
    }
    assert!(proficiency_bonus(0).is_err());
    assert_eq!(
        proficiency_bonus(25).unwrap_err(),
        RulesError::Range {
            what: "character level",
            value: 25,
            min: 1,
            max: 20,
        }
    );
}

#[test]
fn save_dc_and_attack_bonus() {
    assert_eq!(save_dc(2, 3), 13);
    assert_eq!(save_dc(6, 5), 19);
    assert_eq!(save_dc(2, -1), 9);
    assert_eq!(spell_attack_bonus(4, 3), 7);
}

#[test]
fn skills_use_their_ability() {
    assert_eq!(Skill::Stealth.ability(), Ability::Dex);
    assert_eq!(Skill::AnimalHandling.ability(), Ability::Wis);
    assert_eq!(Skill::Athletics.ability(), Ability::Str);
    assert_eq!(skill_modifier(3, SkillProficiency::None, 2), 3);
    assert_eq!(skill_modifier(3, SkillProficiency::Proficient, 2), 5);
    assert_eq!(skill_modifier(3, SkillProficiency::Expertise, 2), 7);
}
