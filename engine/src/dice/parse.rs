use tracing::trace;

use super::{DiceExpression, DiceTerm, Modifier, Sign, SignedTerm, Term};
use crate::error::DiceError;

pub const MAX_DICE_COUNT: u32 = 100;
pub const MAX_DICE_SIDES: u32 = 1000;
pub const MAX_FLAT_VALUE: u32 = 10_000;

/// Parses dice notation such as `4d6dl1`, `2d20kh1+5`, `d8-1` or `adv`.
///
/// Input is case-insensitive and whitespace between terms is ignored. Parsing
/// consumes no randomness.
pub fn parse(text: &str) -> Result<DiceExpression, DiceError> {
    let normalized = text.trim().to_ascii_lowercase();
    let mut parser = Parser {
        input: &normalized,
        pos: 0,
    };
    let terms = parser.expression()?;
    let expression = DiceExpression { terms };
    trace!(input = text, parsed = %expression, "parsed dice notation");
    Ok(expression)
}

pub fn is_valid_notation(text: &str) -> bool {
    parse(text).is_ok()
}

fn shorthand(word: &str) -> Option<DiceTerm> {
    match word {
        "adv" | "advantage" => Some(DiceTerm::new(2, 20).with_modifier(Modifier::KeepHigh(1))),
        "dis" | "disadvantage" => Some(DiceTerm::new(2, 20).with_modifier(Modifier::KeepLow(1))),
        "stats" => Some(DiceTerm::new(4, 6).with_modifier(Modifier::DropLow(1))),
        _ => None,
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn expression(&mut self) -> Result<Vec<SignedTerm>, DiceError> {
        self.skip_ws();
        if self.at_end() {
            return Err(self.syntax_at(0, "empty expression"));
        }

        let mut sign = match self.peek() {
            Some(b'+') => {
                self.pos += 1;
                Sign::Plus
            }
            Some(b'-') => {
                self.pos += 1;
                Sign::Minus
            }
            _ => Sign::Plus,
        };

        let mut terms = Vec::new();
        loop {
            self.skip_ws();
            let term = self.term()?;
            terms.push(SignedTerm { sign, term });
            self.skip_ws();
            sign = match self.peek() {
                None => break,
                Some(b'+') => Sign::Plus,
                Some(b'-') => Sign::Minus,
                Some(_) => {
                    let found = self.current_char();
                    return Err(self.syntax(format!("expected '+' or '-', found '{found}'")));
                }
            };
            self.pos += 1;
        }
        Ok(terms)
    }

    fn term(&mut self) -> Result<Term, DiceError> {
        let start = self.pos;
        match self.peek() {
            None => Err(self.syntax("expected a term")),
            Some(b) if b.is_ascii_digit() => {
                let value = self.number()?;
                if self.peek() == Some(b'd') {
                    self.pos += 1;
                    return self.dice(start, value).map(Term::Dice);
                }
                if value > u64::from(MAX_FLAT_VALUE) {
                    return Err(DiceError::LimitExceeded {
                        what: "flat value",
                        value,
                        max: u64::from(MAX_FLAT_VALUE),
                    });
                }
                Ok(Term::Flat(value as u32))
            }
            Some(b'd') if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.pos += 1;
                self.dice(start, 1).map(Term::Dice)
            }
            Some(b) if b.is_ascii_alphabetic() => {
                let word = self.word();
                if word == "d" {
                    return Err(self.syntax("missing die size after 'd'"));
                }
                shorthand(word)
                    .map(Term::Dice)
                    .ok_or_else(|| self.syntax_at(start, format!("unknown token '{word}'")))
            }
            Some(_) => {
                let found = self.current_char();
                Err(self.syntax(format!("unexpected character '{found}'")))
            }
        }
    }

    /// Everything after the `d`: sides and an optional keep/drop modifier.
    fn dice(&mut self, start: usize, count: u64) -> Result<DiceTerm, DiceError> {
        if count == 0 {
            return Err(self.syntax_at(start, "dice count must be at least 1"));
        }
        if count > u64::from(MAX_DICE_COUNT) {
            return Err(DiceError::LimitExceeded {
                what: "dice count",
                value: count,
                max: u64::from(MAX_DICE_COUNT),
            });
        }
        let count = count as u32;

        if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
            return Err(self.syntax("missing die size after 'd'"));
        }
        let sides_at = self.pos;
        let sides = self.number()?;
        if sides == 0 {
            return Err(self.syntax_at(sides_at, "a die needs at least one side"));
        }
        if sides > u64::from(MAX_DICE_SIDES) {
            return Err(DiceError::LimitExceeded {
                what: "die size",
                value: sides,
                max: u64::from(MAX_DICE_SIDES),
            });
        }
        let mut term = DiceTerm::new(count, sides as u32);

        if self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            let modifier_at = self.pos;
            let word = self.word();
            let make: fn(u32) -> Modifier = match word {
                "kh" => Modifier::KeepHigh,
                "kl" => Modifier::KeepLow,
                "dh" => Modifier::DropHigh,
                "dl" => Modifier::DropLow,
                _ => {
                    return Err(self.syntax_at(modifier_at, format!("unknown modifier '{word}'")));
                }
            };
            let amount = if self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.saturating_number()
            } else {
                1
            };
            let modifier = make(u32::try_from(amount).unwrap_or(u32::MAX));
            if amount == 0 || amount > u64::from(count) {
                return Err(DiceError::InvalidModifier { modifier, count });
            }
            term.modifier = Some(modifier);
        }
        Ok(term)
    }

    fn number(&mut self) -> Result<u64, DiceError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| self.syntax_at(start, "number is too large"))
    }

    /// Like [`Self::number`], but pins oversized values at `u64::MAX` so the
    /// caller can report them against its own bound.
    fn saturating_number(&mut self) -> u64 {
        let mut value = 0u64;
        while let Some(digit) = self.peek().filter(u8::is_ascii_digit) {
            value = value.saturating_mul(10).saturating_add(u64::from(digit - b'0'));
            self.pos += 1;
        }
        value
    }

    fn word(&mut self) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        &input[start..self.pos]
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + ahead).copied()
    }

    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or(' ')
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn syntax(&self, reason: impl Into<String>) -> DiceError {
        self.syntax_at(self.pos, reason)
    }

    fn syntax_at(&self, offset: usize, reason: impl Into<String>) -> DiceError {
        DiceError::Syntax {
            input: self.input.to_string(),
            offset,
            reason: reason.into(),
        }
    }
}
