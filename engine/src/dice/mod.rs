//! Dice notation: grammar, parser and executor.
//!
//! ```text
//! expression := [sign] term (('+'|'-') term)*
//! term       := shorthand | [count] 'd' sides [modifier] | integer
//! modifier   := ('kh'|'kl'|'dh'|'dl') [Y]
//! shorthand  := 'adv' | 'dis' | 'stats'
//! ```

mod parse;
mod roll;
mod source;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiceError;

pub use parse::{
    is_valid_notation, parse, MAX_DICE_COUNT, MAX_DICE_SIDES, MAX_FLAT_VALUE,
};
pub use roll::{damage, roll, roll_ability_scores, roll_text, DieRoll, RollResult, TermResult};
pub use source::{Dice, RandomSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn apply(self, value: i64) -> i64 {
        match self {
            Sign::Plus => value,
            Sign::Minus => -value,
        }
    }

    fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// Post-roll rule selecting which dice count toward a term's subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    KeepHigh(u32),
    KeepLow(u32),
    DropHigh(u32),
    DropLow(u32),
}

impl Modifier {
    pub fn amount(self) -> u32 {
        match self {
            Modifier::KeepHigh(n)
            | Modifier::KeepLow(n)
            | Modifier::DropHigh(n)
            | Modifier::DropLow(n) => n,
        }
    }

    /// Number of dice that survive out of `count`, and whether they are the highest ones.
    ///
    /// Dropping the Y highest is the same as keeping the `count - Y` lowest.
    pub(crate) fn retention(self, count: u32) -> (u32, bool) {
        match self {
            Modifier::KeepHigh(n) => (n.min(count), true),
            Modifier::KeepLow(n) => (n.min(count), false),
            Modifier::DropHigh(n) => (count.saturating_sub(n), false),
            Modifier::DropLow(n) => (count.saturating_sub(n), true),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Modifier::KeepHigh(_) => "kh",
            Modifier::KeepLow(_) => "kl",
            Modifier::DropHigh(_) => "dh",
            Modifier::DropLow(_) => "dl",
        };
        write!(f, "{}{}", token, self.amount())
    }
}

/// `count` dice with `sides` faces, optionally filtered by a keep/drop modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceTerm {
    pub count: u32,
    pub sides: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Modifier>,
}

impl DiceTerm {
    pub fn new(count: u32, sides: u32) -> Self {
        Self {
            count,
            sides,
            modifier: None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// How many of the rolled dice are summed.
    pub fn kept_count(&self) -> u32 {
        self.modifier
            .map_or(self.count, |m| m.retention(self.count).0)
    }
}

impl fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if let Some(modifier) = self.modifier {
            write!(f, "{}", modifier)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Flat(u32),
    Dice(DiceTerm),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Flat(value) => write!(f, "{}", value),
            Term::Dice(dice) => write!(f, "{}", dice),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedTerm {
    pub sign: Sign,
    pub term: Term,
}

/// A parsed dice expression. Shorthands are already expanded, so `adv` and
/// `2d20kh1` produce equal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpression {
    pub terms: Vec<SignedTerm>,
}

impl DiceExpression {
    pub fn dice_terms(&self) -> impl Iterator<Item = &DiceTerm> {
        self.terms.iter().filter_map(|t| match &t.term {
            Term::Dice(dice) => Some(dice),
            Term::Flat(_) => None,
        })
    }

    pub fn has_dice(&self) -> bool {
        self.dice_terms().next().is_some()
    }

    /// Appends a flat term; zero leaves the expression untouched.
    pub fn with_flat(mut self, modifier: i32) -> Self {
        if modifier != 0 {
            let sign = if modifier < 0 { Sign::Minus } else { Sign::Plus };
            self.terms.push(SignedTerm {
                sign,
                term: Term::Flat(modifier.unsigned_abs()),
            });
        }
        self
    }

    /// Critical-hit damage: every dice count doubles, flat terms stay as they are.
    pub fn with_doubled_dice(&self) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|t| match t.term {
                Term::Dice(dice) => SignedTerm {
                    sign: t.sign,
                    term: Term::Dice(DiceTerm {
                        count: dice.count.saturating_mul(2),
                        ..dice
                    }),
                },
                Term::Flat(_) => *t,
            })
            .collect();
        Self { terms }
    }

    /// Smallest and largest totals this expression can produce.
    pub fn bounds(&self) -> (i64, i64) {
        self.terms.iter().fold((0, 0), |(lo, hi), t| {
            let (term_lo, term_hi) = match t.term {
                Term::Flat(value) => (i64::from(value), i64::from(value)),
                Term::Dice(dice) => {
                    let kept = i64::from(dice.kept_count());
                    (kept, kept * i64::from(dice.sides))
                }
            };
            match t.sign {
                Sign::Plus => (lo + term_lo, hi + term_hi),
                Sign::Minus => (lo - term_hi, hi - term_lo),
            }
        })
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.terms.iter().enumerate() {
            if i > 0 || t.sign == Sign::Minus {
                write!(f, "{}", t.sign.symbol())?;
            }
            write!(f, "{}", t.term)?;
        }
        Ok(())
    }
}

impl FromStr for DiceExpression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl From<DiceTerm> for DiceExpression {
    fn from(dice: DiceTerm) -> Self {
        Self {
            terms: vec![SignedTerm {
                sign: Sign::Plus,
                term: Term::Dice(dice),
            }],
        }
    }
}
