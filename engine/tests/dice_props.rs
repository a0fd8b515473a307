use charsheet_engine::dice::{parse, roll, Dice, Modifier, Term};
use charsheet_engine::DiceError;
use proptest::prelude::*;

/// A dice term in notation form, with a keep/drop amount that fits the count.
fn dice_term() -> impl Strategy<Value = String> {
    (1u32..=12, prop::sample::select(vec![2u32, 4, 6, 8, 10, 12, 20, 100]))
        .prop_flat_map(|(count, sides)| {
            let modifier = prop_oneof![
                Just(String::new()),
                (prop::sample::select(vec!["kh", "kl", "dh", "dl"]), 1..=count)
                    .prop_map(|(kind, y)| format!("{kind}{y}")),
            ];
            modifier.prop_map(move |m| format!("{count}d{sides}{m}"))
        })
}

fn term() -> impl Strategy<Value = String> {
    prop_oneof![3 => dice_term(), 1 => (0u32..=50).prop_map(|n| n.to_string())]
}

fn expression() -> impl Strategy<Value = String> {
    (
        prop::option::of(Just("-")),
        prop::collection::vec((prop::sample::select(vec!["+", "-"]), term()), 0..4),
        term(),
    )
        .prop_map(|(lead, rest, first)| {
            let mut out = String::from(lead.unwrap_or(""));
            out.push_str(&first);
            for (op, t) in rest {
                out.push_str(op);
                out.push_str(&t);
            }
            out
        })
}

proptest! {
    #[test]
    fn valid_notation_always_parses(text in expression()) {
        prop_assert!(parse(&text).is_ok(), "{text} failed to parse");
    }

    #[test]
    fn canonical_form_reparses_to_the_same_expression(text in expression()) {
        let expr = parse(&text).unwrap();
        prop_assert_eq!(parse(&expr.to_string()).unwrap(), expr);
    }

    #[test]
    fn faces_and_kept_counts_respect_the_term(text in expression(), seed in any::<u64>()) {
        let expr = parse(&text).unwrap();
        let res = roll(&expr, &mut Dice::from_seed(seed));
        for term in &res.terms {
            if let Term::Dice(dice) = term.term {
                prop_assert_eq!(term.rolls.len() as u32, dice.count);
                prop_assert!(term.rolls.iter().all(|r| (1..=dice.sides).contains(&r.value)));
                let kept = term.rolls.iter().filter(|r| r.kept).count() as u32;
                prop_assert_eq!(kept, dice.kept_count());
                let sum: i64 = term.kept_values().iter().map(|v| i64::from(*v)).sum();
                prop_assert_eq!(sum, term.subtotal);
            }
        }
        let (lo, hi) = expr.bounds();
        prop_assert!(lo <= res.total && res.total <= hi);
        prop_assert_eq!(res.total, res.terms.iter().map(|t| t.signed_subtotal()).sum::<i64>());
    }

    #[test]
    fn kept_dice_dominate_discarded_ones(count in 2u32..=10, y in 1u32..=9, seed in any::<u64>(), high in any::<bool>()) {
        let y = y.min(count);
        let text = format!("{count}d6{}{y}", if high { "kh" } else { "kl" });
        let res = roll(&parse(&text).unwrap(), &mut Dice::from_seed(seed));
        let kept = res.terms[0].kept_values();
        let dropped: Vec<u32> = res.terms[0].rolls.iter().filter(|r| !r.kept).map(|r| r.value).collect();
        for k in &kept {
            for d in &dropped {
                if high { prop_assert!(k >= d); } else { prop_assert!(k <= d); }
            }
        }
    }

    #[test]
    fn keep_amount_beyond_count_is_rejected(count in 1u32..=20, extra in 1u32..=5) {
        let y = count + extra;
        let err = parse(&format!("{count}d6kh{y}")).unwrap_err();
        prop_assert_eq!(err, DiceError::InvalidModifier { modifier: Modifier::KeepHigh(y), count });
    }

    #[test]
    fn same_seed_same_result(text in expression(), seed in any::<u64>()) {
        let expr = parse(&text).unwrap();
        prop_assert_eq!(roll(&expr, &mut Dice::from_seed(seed)), roll(&expr, &mut Dice::from_seed(seed)));
    }
}
