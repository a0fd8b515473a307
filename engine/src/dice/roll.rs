use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{parse, DiceExpression, DiceTerm, RandomSource, Sign, Term};
use crate::error::DiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRoll {
    pub value: u32,
    pub kept: bool,
}

/// One term after rolling. `rolls` is empty for flat terms and in roll order otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermResult {
    pub sign: Sign,
    pub term: Term,
    pub rolls: Vec<DieRoll>,
    pub subtotal: i64,
}

impl TermResult {
    pub fn signed_subtotal(&self) -> i64 {
        self.sign.apply(self.subtotal)
    }

    pub fn raw_values(&self) -> Vec<u32> {
        self.rolls.iter().map(|r| r.value).collect()
    }

    pub fn kept_values(&self) -> Vec<u32> {
        self.rolls.iter().filter(|r| r.kept).map(|r| r.value).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub expression: DiceExpression,
    pub terms: Vec<TermResult>,
    pub total: i64,
    pub natural_20: bool,
    pub natural_1: bool,
}

impl RollResult {
    /// The single surviving d20 when the expression is a plain d20 roll
    /// (`1d20`, `adv`, `dis`, with any flat bonus).
    pub fn kept_d20(&self) -> Option<u32> {
        critical_die(&self.terms)
    }

    pub fn meets(&self, dc: i64) -> bool {
        self.total >= dc
    }
}

/// Renders kept dice plainly and discarded dice struck through:
/// `[20, ~~7~~] + 5 = 25 (NAT 20!)`.
impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            match (i, term.sign) {
                (0, Sign::Plus) => {}
                (0, Sign::Minus) => write!(f, "-")?,
                (_, Sign::Plus) => write!(f, " + ")?,
                (_, Sign::Minus) => write!(f, " - ")?,
            }
            match term.term {
                Term::Flat(value) => write!(f, "{}", value)?,
                Term::Dice(_) => {
                    let faces: Vec<String> = term
                        .rolls
                        .iter()
                        .map(|r| {
                            if r.kept {
                                r.value.to_string()
                            } else {
                                format!("~~{}~~", r.value)
                            }
                        })
                        .collect();
                    write!(f, "[{}]", faces.join(", "))?;
                }
            }
        }
        write!(f, " = {}", self.total)?;
        if self.natural_20 {
            write!(f, " (NAT 20!)")?;
        } else if self.natural_1 {
            write!(f, " (NAT 1)")?;
        }
        Ok(())
    }
}

/// Rolls every term left to right, drawing `count` faces per dice term in order.
pub fn roll<R: RandomSource + ?Sized>(expression: &DiceExpression, rng: &mut R) -> RollResult {
    let terms: Vec<TermResult> = expression
        .terms
        .iter()
        .map(|signed| match signed.term {
            Term::Flat(value) => TermResult {
                sign: signed.sign,
                term: signed.term,
                rolls: Vec::new(),
                subtotal: i64::from(value),
            },
            Term::Dice(dice) => roll_dice(signed.sign, dice, &mut *rng),
        })
        .collect();

    let total = terms.iter().map(TermResult::signed_subtotal).sum();
    let kept_d20 = critical_die(&terms);
    debug!(expression = %expression, total, ?kept_d20, "rolled");

    RollResult {
        expression: expression.clone(),
        terms,
        total,
        natural_20: kept_d20 == Some(20),
        natural_1: kept_d20 == Some(1),
    }
}

pub fn roll_text<R: RandomSource + ?Sized>(text: &str, rng: &mut R) -> Result<RollResult, DiceError> {
    let expression = parse(text)?;
    Ok(roll(&expression, rng))
}

/// Damage roll; a critical hit doubles the dice but not the flat bonus.
pub fn damage<R: RandomSource + ?Sized>(
    text: &str,
    critical: bool,
    rng: &mut R,
) -> Result<RollResult, DiceError> {
    let expression = parse(text)?;
    let expression = if critical {
        expression.with_doubled_dice()
    } else {
        expression
    };
    Ok(roll(&expression, rng))
}

/// Six ability scores, each the sum of the best three of 4d6.
pub fn roll_ability_scores<R: RandomSource + ?Sized>(rng: &mut R) -> [i32; 6] {
    let stats = DiceExpression::from(
        DiceTerm::new(4, 6).with_modifier(super::Modifier::DropLow(1)),
    );
    let mut scores = [0; 6];
    for score in &mut scores {
        *score = roll(&stats, rng).total as i32;
    }
    debug!(?scores, "rolled ability scores");
    scores
}

fn roll_dice<R: RandomSource + ?Sized>(sign: Sign, dice: DiceTerm, rng: &mut R) -> TermResult {
    let values: Vec<u32> = (0..dice.count).map(|_| rng.roll_die(dice.sides)).collect();
    let kept = retained(&values, dice);
    let rolls: Vec<DieRoll> = values
        .iter()
        .zip(kept)
        .map(|(&value, kept)| DieRoll { value, kept })
        .collect();
    let subtotal = rolls
        .iter()
        .filter(|r| r.kept)
        .map(|r| i64::from(r.value))
        .sum();
    TermResult {
        sign,
        term: Term::Dice(dice),
        rolls,
        subtotal,
    }
}

/// Marks which dice survive the term's modifier. Among equal faces the one
/// rolled first is retained.
fn retained(values: &[u32], dice: DiceTerm) -> Vec<bool> {
    let Some(modifier) = dice.modifier else {
        return vec![true; values.len()];
    };
    let (keep, highest) = modifier.retention(dice.count);

    let mut order: Vec<usize> = (0..values.len()).collect();
    if highest {
        order.sort_by(|&a, &b| values[b].cmp(&values[a]));
    } else {
        order.sort_by_key(|&i| values[i]);
    }

    let mut mask = vec![false; values.len()];
    for &i in order.iter().take(keep as usize) {
        mask[i] = true;
    }
    mask
}

/// A natural 20 or 1 only counts when the expression holds exactly one dice
/// term, it is an added d20, and a single die of it survives.
fn critical_die(terms: &[TermResult]) -> Option<u32> {
    let mut dice_terms = terms.iter().filter(|t| matches!(t.term, Term::Dice(_)));
    let only = dice_terms.next()?;
    if dice_terms.next().is_some() || only.sign != Sign::Plus {
        return None;
    }
    match only.term {
        Term::Dice(dice) if dice.sides == 20 => {}
        _ => return None,
    }
    let mut kept = only.rolls.iter().filter(|r| r.kept);
    let die = kept.next()?;
    if kept.next().is_some() {
        return None;
    }
    Some(die.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Modifier;

    #[test]
    fn ties_keep_the_earliest_die() {
        let term = DiceTerm::new(4, 6).with_modifier(Modifier::KeepHigh(2));
        assert_eq!(retained(&[5, 6, 5, 5], term), vec![true, true, false, false]);

        let term = DiceTerm::new(4, 6).with_modifier(Modifier::KeepLow(1));
        assert_eq!(retained(&[3, 2, 2, 4], term), vec![false, true, false, false]);
    }

    #[test]
    fn drop_high_discards_the_later_tie() {
        let term = DiceTerm::new(3, 6).with_modifier(Modifier::DropHigh(1));
        assert_eq!(retained(&[6, 2, 6], term), vec![true, true, false]);
    }
}
