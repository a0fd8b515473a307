use charsheet_engine::dice::{damage, parse, roll, roll_ability_scores, roll_text, Dice, RandomSource};

#[test]
fn compound_total_sums_signed_terms() {
    let mut dice = Dice::from_scripted(vec![3, 5, 2]);
    let res = roll_text("2d6 + 1d4 + 5", &mut dice).unwrap();
    assert_eq!(res.total, 15);
    assert_eq!(res.terms[0].raw_values(), vec![3, 5]);
    assert_eq!(res.terms[0].subtotal, 8);
    assert_eq!(res.terms[1].raw_values(), vec![2]);
    assert_eq!(res.terms[2].subtotal, 5);
}

#[test]
fn subtraction_and_leading_minus() {
    let mut dice = Dice::from_scripted(vec![4, 6]);
    let res = roll_text("-1d4 + 1d6 - 2", &mut dice).unwrap();
    assert_eq!(res.total, -4 + 6 - 2);
    assert_eq!(res.terms[0].signed_subtotal(), -4);
}

#[test]
fn drop_lowest_keeps_three() {
    let mut dice = Dice::from_scripted(vec![6, 1, 4, 5]);
    let res = roll_text("4d6dl1", &mut dice).unwrap();
    assert_eq!(res.total, 15);
    assert_eq!(res.terms[0].kept_values(), vec![6, 4, 5]);
    insta::assert_snapshot!(res.to_string(), @"[6, ~~1~~, 4, 5] = 15");
}

#[test]
fn equal_faces_keep_the_first_rolled() {
    let mut dice = Dice::from_scripted(vec![4, 4, 2]);
    let res = roll_text("3d6kh1", &mut dice).unwrap();
    let kept: Vec<bool> = res.terms[0].rolls.iter().map(|r| r.kept).collect();
    assert_eq!(kept, vec![true, false, false]);

    let mut dice = Dice::from_scripted(vec![3, 1, 1]);
    let res = roll_text("3d6dh2", &mut dice).unwrap();
    let kept: Vec<bool> = res.terms[0].rolls.iter().map(|r| r.kept).collect();
    assert_eq!(kept, vec![false, true, false]);
    assert_eq!(res.total, 1);
}

#[test]
fn advantage_natural_twenty() {
    let mut dice = Dice::from_scripted(vec![20, 7]);
    let res = roll_text("adv+5", &mut dice).unwrap();
    assert_eq!(res.total, 25);
    assert!(res.natural_20);
    assert!(!res.natural_1);
    insta::assert_snapshot!(res.to_string(), @"[20, ~~7~~] + 5 = 25 (NAT 20!)");
}

#[test]
fn advantage_only_counts_the_kept_die() {
    let mut dice = Dice::from_scripted(vec![7, 20]);
    let res = roll_text("adv", &mut dice).unwrap();
    assert_eq!(res.total, 20);
    assert!(res.natural_20);

    // the 20 was discarded under disadvantage
    let mut dice = Dice::from_scripted(vec![20, 7]);
    let res = roll_text("dis", &mut dice).unwrap();
    assert_eq!(res.total, 7);
    assert!(!res.natural_20);
    assert!(!res.natural_1);
}

#[test]
fn disadvantage_natural_one() {
    let mut dice = Dice::from_scripted(vec![1, 15]);
    let res = roll_text("dis", &mut dice).unwrap();
    assert!(res.natural_1);
    insta::assert_snapshot!(res.to_string(), @"[1, ~~15~~] = 1 (NAT 1)");
}

#[test]
fn no_critical_flags_outside_single_d20() {
    let mut dice = Dice::from_scripted(vec![20, 20]);
    let res = roll_text("2d20", &mut dice).unwrap();
    assert!(!res.natural_20);

    let mut dice = Dice::from_scripted(vec![20, 6]);
    let res = roll_text("1d20+1d6", &mut dice).unwrap();
    assert!(!res.natural_20);

    let mut dice = Dice::from_scripted(vec![12]);
    let res = roll_text("1d12", &mut dice).unwrap();
    assert!(!res.natural_20 && !res.natural_1);
}

#[test]
fn critical_damage_doubles_dice_not_flat() {
    let mut dice = Dice::from_scripted(vec![3, 4]);
    let res = damage("1d8+3", true, &mut dice).unwrap();
    assert_eq!(res.expression.to_string(), "2d8+3");
    assert_eq!(res.total, 10);

    let mut dice = Dice::from_scripted(vec![3]);
    let res = damage("1d8+3", false, &mut dice).unwrap();
    assert_eq!(res.total, 6);
}

#[test]
fn ability_score_rolls_stay_in_range() {
    let mut dice = Dice::from_seed(2025);
    for _ in 0..50 {
        for score in roll_ability_scores(&mut dice) {
            assert!((3..=18).contains(&score));
        }
    }
}

#[test]
fn seeded_rolls_repeat() {
    let expr = parse("8d6+2d10kh1").unwrap();
    let a = roll(&expr, &mut Dice::from_seed(99));
    let b = roll(&expr, &mut Dice::from_seed(99));
    assert_eq!(a, b);
}

#[test]
fn one_draw_per_die() {
    struct Counting(u32);
    impl RandomSource for Counting {
        fn roll_die(&mut self, _sides: u32) -> u32 {
            self.0 += 1;
            1
        }
    }
    let expr = parse("4d6dl1 + 2d8").unwrap();
    let mut rng = Counting(0);
    roll(&expr, &mut rng);
    assert_eq!(rng.0, 6);
}

#[test]
fn works_through_a_trait_object() {
    let mut dice = Dice::from_scripted(vec![5]);
    let rng: &mut dyn RandomSource = &mut dice;
    let res = roll_text("1d6+1", rng).unwrap();
    assert_eq!(res.total, 6);
}
