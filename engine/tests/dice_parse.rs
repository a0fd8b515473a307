use charsheet_engine::dice::{
    is_valid_notation, parse, DiceExpression, DiceTerm, Modifier, Sign, SignedTerm, Term,
};
use charsheet_engine::DiceError;

fn plus(term: Term) -> SignedTerm {
    SignedTerm {
        sign: Sign::Plus,
        term,
    }
}

#[test]
fn parses_compound_expression() {
    let expr = parse("2d6 + 1d4 + 5").unwrap();
    assert_eq!(
        expr.terms,
        vec![
            plus(Term::Dice(DiceTerm::new(2, 6))),
            plus(Term::Dice(DiceTerm::new(1, 4))),
            plus(Term::Flat(5)),
        ]
    );
}

#[test]
fn count_defaults_to_one() {
    assert_eq!(parse("d20").unwrap(), parse("1d20").unwrap());
    assert_eq!(parse("D8").unwrap(), parse("1d8").unwrap());
}

#[test]
fn keep_drop_default_to_one() {
    let expr = parse("2d20kh").unwrap();
    assert_eq!(
        expr.dice_terms().next().unwrap().modifier,
        Some(Modifier::KeepHigh(1))
    );
    let expr = parse("4d6dl").unwrap();
    assert_eq!(
        expr.dice_terms().next().unwrap().modifier,
        Some(Modifier::DropLow(1))
    );
}

#[test]
fn shorthands_expand_to_their_notation() {
    assert_eq!(parse("adv").unwrap(), parse("2d20kh1").unwrap());
    assert_eq!(parse("ADVANTAGE").unwrap(), parse("2d20kh1").unwrap());
    assert_eq!(parse("dis").unwrap(), parse("2d20kl1").unwrap());
    assert_eq!(parse("stats").unwrap(), parse("4d6dl1").unwrap());
    assert_eq!(parse("adv+5").unwrap(), parse("2d20kh1+5").unwrap());
}

#[test]
fn leading_and_trailing_signs() {
    let expr = parse("-1d4+3").unwrap();
    assert_eq!(expr.terms[0].sign, Sign::Minus);
    assert_eq!(expr.to_string(), "-1d4+3");

    let expr = parse("1d8 - 1").unwrap();
    assert_eq!(expr.terms[1].sign, Sign::Minus);
    assert_eq!(expr.terms[1].term, Term::Flat(1));
}

#[test]
fn flat_only_expression_is_fine() {
    let expr = parse("7").unwrap();
    assert!(!expr.has_dice());
    assert_eq!(expr.bounds(), (7, 7));
}

#[test]
fn display_is_canonical() {
    assert_eq!(parse(" 2D20KH1 + 5 ").unwrap().to_string(), "2d20kh1+5");
    assert_eq!(parse("d6+d6").unwrap().to_string(), "1d6+1d6");
    let roundtrip: DiceExpression = "4d6dl1".parse().unwrap();
    assert_eq!(roundtrip.to_string(), "4d6dl1");
}

#[test]
fn syntax_errors() {
    for bad in ["", "   ", "2d", "d", "1d20+", "+", "2x6", "1d6 kh1", "0d6", "1d0", "3d6xx", "2d6++1", "1d20 5"] {
        assert!(
            matches!(parse(bad), Err(DiceError::Syntax { .. })),
            "expected syntax error for {bad:?}, got {:?}",
            parse(bad)
        );
    }
}

#[test]
fn keep_more_than_rolled_is_invalid() {
    assert_eq!(
        parse("2d20kh3"),
        Err(DiceError::InvalidModifier {
            modifier: Modifier::KeepHigh(3),
            count: 2,
        })
    );
    assert!(matches!(parse("4d6dl0"), Err(DiceError::InvalidModifier { .. })));
    assert!(matches!(parse("3d6dh4"), Err(DiceError::InvalidModifier { .. })));
}

#[test]
fn oversized_keep_amount_is_an_invalid_modifier() {
    assert_eq!(
        parse("2d6kh99999999999999999999"),
        Err(DiceError::InvalidModifier {
            modifier: Modifier::KeepHigh(u32::MAX),
            count: 2,
        })
    );
    assert!(matches!(
        parse("4d6dl18446744073709551616"),
        Err(DiceError::InvalidModifier { .. })
    ));
}

#[test]
fn dropping_everything_is_allowed() {
    let expr = parse("2d6dl2").unwrap();
    assert_eq!(expr.dice_terms().next().unwrap().kept_count(), 0);
    assert_eq!(expr.bounds(), (0, 0));
}

#[test]
fn limits_are_enforced() {
    assert!(matches!(
        parse("101d6"),
        Err(DiceError::LimitExceeded { what: "dice count", .. })
    ));
    assert!(matches!(
        parse("1d1001"),
        Err(DiceError::LimitExceeded { what: "die size", .. })
    ));
    assert!(matches!(
        parse("1d20+10001"),
        Err(DiceError::LimitExceeded { what: "flat value", .. })
    ));
    assert!(parse("100d1000+10000").is_ok());
}

#[test]
fn validity_helper() {
    assert!(is_valid_notation("1d20+5"));
    assert!(is_valid_notation("stats"));
    assert!(!is_valid_notation("fireball"));
}

#[test]
fn error_messages_read_well() {
    let err = parse("2d20kh3").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid modifier kh3 on 2 dice (must be between 1 and 2)");
    let err = parse("1d20+").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"syntax error at offset 5 in '1d20+': expected a term");
}
