use crate::attribute::Attribute;
use crate::attribute::AttributeSet;
use crate::error::Error;
use crate::error::Result;

pub(crate) mod limits {
    /// Max allowed value for amount, sides and modifier, keeps run
    /// times and sums bounded
    pub(crate) const MAX_ROLL_VALUE: u64 = 99999;

    /// Tail of every out of bounds diagnostic
    pub(crate) const BIG_NUMBER_MSG: &str = "This is a dice roller, not a Pi calculator";
}

use limits::BIG_NUMBER_MSG;
use limits::MAX_ROLL_VALUE;

/// One dice rolling expression such as `2d8+1`, validated at
/// construction and immutable afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    /// Amount of dice to roll
    pub amount: u64,
    /// Number of faces on each dice
    pub sides: u64,
    /// Flat value added to the rolled sum
    pub modifier: i64,
    /// Active rule modifiers
    pub attribs: AttributeSet,
}

impl DiceRoll {
    pub fn new(amount: u64, sides: u64, modifier: i64, attribs: AttributeSet) -> Result<Self> {
        let roll = DiceRoll {
            amount,
            sides,
            modifier,
            attribs,
        };
        roll.validate()?;
        Ok(roll)
    }

    /// Bounds check, re-run before any random draw
    pub fn validate(&self) -> Result<()> {
        if self.amount == 0 {
            return Err(self.invalid(format!("need at least 1 dice, got {}", self.amount)));
        }
        if self.amount > MAX_ROLL_VALUE {
            return Err(self.invalid(format!(
                "exceeded max allowed dice amount `{MAX_ROLL_VALUE}`. {BIG_NUMBER_MSG}"
            )));
        }
        if self.sides < 2 {
            return Err(self.invalid(format!("need at least 2 sides, got {}", self.sides)));
        }
        if self.sides > MAX_ROLL_VALUE {
            return Err(self.invalid(format!(
                "exceeded max allowed dice sides `{MAX_ROLL_VALUE}`. {BIG_NUMBER_MSG}"
            )));
        }
        if self.modifier.unsigned_abs() > MAX_ROLL_VALUE {
            return Err(self.invalid(format!(
                "exceeded max allowed modifier `{MAX_ROLL_VALUE}`. {BIG_NUMBER_MSG}"
            )));
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> Error {
        Error::Invalid(format!("invalid dice roll `{self}`: {reason}"))
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.attribs.has(Attribute::Minus) {
            write!(f, "-")?;
        }
        write!(f, "{}d{}", self.amount, self.sides)?;
        if self.modifier != 0 {
            if self.modifier > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", self.modifier)?;
        }
        Ok(())
    }
}
