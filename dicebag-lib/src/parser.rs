use crate::attribute;
use crate::attribute::Attribute;
use crate::attribute::AttributeSet;
use crate::dice::limits::BIG_NUMBER_MSG;
use crate::dice::limits::MAX_ROLL_VALUE;
use crate::dice::DiceRoll;
use crate::error::Error;
use crate::error::Result;
use pest::Parser as _;
use pest_derive::Parser;

/// Pest parser for dice tokens
#[derive(Parser)]
#[grammar = "rollarg.pest"]
pub(crate) struct Parser;

/// What a single token can parse into
#[derive(Debug)]
pub(crate) enum Parsed {
    Attribute(Attribute),
    Roll(DiceRoll),
}

/// Numeric sub-tokens longer than this would exceed the allowed
/// maximum, reject them before integer parsing
const MAX_VALUE_DIGITS: usize = 5;

/// Parses one token into an attribute or a dice roll. Dice rolls start
/// from the given attribute set, plus their own leading sign.
pub(crate) fn parse_token(token: &str, attribs: AttributeSet) -> Result<Parsed> {
    if let Some(attrib) = attribute::from_keyword(token) {
        return Ok(Parsed::Attribute(attrib));
    }
    parse_dice_token(token, attribs).map(Parsed::Roll)
}

fn parse_dice_token(token: &str, attribs: AttributeSet) -> Result<DiceRoll> {
    let Ok(mut pairs) = Parser::parse(Rule::rollarg, token) else {
        return Err(Error::Parse(format!("invalid roll arg: `{token}`")));
    };
    let mut attribs = attribs;
    let mut amount = 1u64;
    let mut sides = 0u64;
    let mut modifier = 0i64;
    for pair in pairs.next().unwrap().into_inner() {
        match pair.as_rule() {
            Rule::sign => {
                if pair.as_str() == "-" {
                    attribs.insert(Attribute::Minus);
                }
            }
            Rule::amount => amount = parse_value(pair.as_str())?,
            Rule::sides => sides = parse_value(pair.as_str())?,
            Rule::modifier => {
                let mut inner = pair.into_inner();
                let negative = inner.next().unwrap().as_str() == "-";
                let value = parse_value(inner.next().unwrap().as_str())? as i64;
                modifier = if negative { -value } else { value };
            }
            Rule::EOI => (),
            _ => unreachable!("{:?}", pair),
        }
    }
    DiceRoll::new(amount, sides, modifier, attribs)
}

/// Parses one numeric sub-token, guarded by the digit length bound
fn parse_value(digits: &str) -> Result<u64> {
    if digits.len() > MAX_VALUE_DIGITS {
        return Err(Error::Parse(format!(
            "invalid value `{digits}`: max allowed value is {MAX_ROLL_VALUE}. {BIG_NUMBER_MSG}"
        )));
    }
    // at most 5 digits by now, cannot overflow
    Ok(digits.parse::<u64>().unwrap())
}
