use crate::attribute::AttributeSet;
use crate::dice::DiceRoll;
use crate::error::Error;
use crate::parser;
use crate::parser::Parsed;
use itertools::Itertools;

/// Ordered run of dice rolls sharing one attribute context, read only
/// once grouping is done
#[derive(Debug, Clone, Default)]
pub struct RollingExpression {
    dice_rolls: Vec<DiceRoll>,
}

impl RollingExpression {
    pub fn dice_rolls(&self) -> &[DiceRoll] {
        &self.dice_rolls
    }

    pub fn is_empty(&self) -> bool {
        self.dice_rolls.is_empty()
    }
}

impl std::fmt::Display for RollingExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dice_rolls.iter().format(" "))
    }
}

/// Partitions a token batch into rolling expressions. Attributes apply
/// to the run of rolls that follows them; an attribute showing up after
/// a completed run closes that expression and opens a fresh one.
/// Malformed tokens are collected and never abort the scan.
pub(crate) fn group_tokens(tokens: &[String]) -> (Vec<RollingExpression>, Vec<Error>) {
    let mut expressions = Vec::new();
    let mut errors = Vec::new();
    let mut current = RollingExpression::default();
    let mut attribs = AttributeSet::new();
    for token in tokens {
        match parser::parse_token(token, attribs) {
            Ok(Parsed::Attribute(attrib)) => {
                if !current.dice_rolls.is_empty() {
                    expressions.push(std::mem::take(&mut current));
                    attribs = AttributeSet::new();
                }
                attribs.insert(attrib);
            }
            Ok(Parsed::Roll(roll)) => current.dice_rolls.push(roll),
            Err(error) => errors.push(error),
        }
    }
    expressions.push(current);
    (expressions, errors)
}
