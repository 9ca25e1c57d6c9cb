use crate::attribute::Attribute;
use crate::dice::DiceRoll;
use crate::error::Error;
use crate::error::Result;
use crate::expression::RollingExpression;
use crate::roll::result::DiceRollResult;
use crate::roll::result::RollingExpressionResult;
use crate::roll::Source;

/// Executes dice rolls under their attributes
pub(crate) struct Evaluator;

impl Evaluator {
    /// Performs one dice roll. `carried_crit` is true when the previous
    /// expression in the batch scored a critical hit; it doubles the
    /// dice of damage rolls only. Validation runs before any draw.
    pub(crate) fn eval<S: Source>(
        roll: &DiceRoll,
        carried_crit: bool,
        source: &mut S,
    ) -> Result<DiceRollResult> {
        roll.validate()?;
        let attribs = roll.attribs;
        let crit = attribs.has(Attribute::Crit) || (carried_crit && attribs.has(Attribute::Dmg));
        let amount = if crit { roll.amount * 2 } else { roll.amount };

        let mut result = DiceRollResult::new(*roll);
        for _ in 0..amount {
            let first = source.throw(roll.sides) as i64;
            let face = if attribs.has(Attribute::Advantage) {
                let second = source.throw(roll.sides) as i64;
                result.adv_dis_dropped.push(first.min(second));
                first.max(second)
            } else if attribs.has(Attribute::Disadvantage) {
                let second = source.throw(roll.sides) as i64;
                result.adv_dis_dropped.push(first.max(second));
                first.min(second)
            } else {
                first
            };
            result.faces.push(face);
            result.sum += face;
        }

        if attribs.has(Attribute::DropHigh) {
            drop_face(&mut result.faces, &mut result.sum, &mut result.high_dropped, true);
        }
        if attribs.has(Attribute::DropLow) {
            drop_face(&mut result.faces, &mut result.sum, &mut result.low_dropped, false);
        }

        result.sum += roll.modifier;
        if attribs.has(Attribute::Half) {
            result.sum = halve(result.sum);
        }
        // a performed roll is always worth at least 1
        if result.sum <= 0 {
            result.sum = 1;
        }
        if attribs.has(Attribute::Minus) {
            result.sum = -result.sum;
        }
        Ok(result)
    }

    /// Performs every roll of one expression in order, collecting
    /// errors without aborting the rest
    pub(crate) fn eval_expression<S: Source>(
        expression: &RollingExpression,
        carried_crit: bool,
        source: &mut S,
    ) -> (RollingExpressionResult, Vec<Error>) {
        let mut result = RollingExpressionResult::new();
        let mut errors = Vec::new();
        for roll in expression.dice_rolls() {
            match Self::eval(roll, carried_crit, source) {
                Ok(roll_result) => result.results.push(roll_result),
                Err(error) => errors.push(error),
            }
        }
        (result, errors)
    }
}

/// Removes one occurrence of the extreme face, never the only face
fn drop_face(faces: &mut Vec<i64>, sum: &mut i64, dropped: &mut Vec<i64>, high: bool) {
    if faces.len() < 2 {
        return;
    }
    let extreme = if high {
        faces.iter().copied().max()
    } else {
        faces.iter().copied().min()
    };
    if let Some(extreme) = extreme {
        if let Some(index) = faces.iter().position(|&face| face == extreme) {
            faces.remove(index);
            *sum -= extreme;
            dropped.push(extreme);
        }
    }
}

/// Halved magnitude rounded down but never below 1, sign preserved
pub(crate) fn halve(sum: i64) -> i64 {
    let halved = (sum.abs() / 2).max(1);
    if sum < 0 {
        -halved
    } else {
        halved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeSet;
    use crate::tests::MockIter;

    fn roll_with(amount: u64, sides: u64, modifier: i64, attribs: &[Attribute]) -> DiceRoll {
        let mut set = AttributeSet::new();
        for attrib in attribs {
            set.insert(*attrib);
        }
        DiceRoll::new(amount, sides, modifier, set).unwrap()
    }

    fn eval(roll: &DiceRoll, carried_crit: bool, faces: Vec<u64>) -> DiceRollResult {
        let mut iter = faces.into_iter();
        Evaluator::eval(roll, carried_crit, &mut MockIter { iter: &mut iter }).unwrap()
    }

    #[test]
    fn plain_roll() {
        let result = eval(&roll_with(4, 4, 1, &[]), false, vec![2, 3, 1, 4]);
        assert_eq!(vec![2, 3, 1, 4], result.faces);
        assert_eq!(11, result.sum);
    }

    #[test]
    fn floor_beats_negative_modifiers() {
        let result = eval(&roll_with(1, 6, -99999, &[]), false, vec![6]);
        assert_eq!(1, result.sum);
    }

    #[test]
    fn minus_roll_is_at_most_minus_one() {
        let result = eval(&roll_with(1, 6, -10, &[Attribute::Minus]), false, vec![3]);
        assert_eq!(-1, result.sum);

        let result = eval(&roll_with(2, 6, 0, &[Attribute::Minus]), false, vec![3, 4]);
        assert_eq!(-7, result.sum);
    }

    #[test]
    fn halve_rounds_down_to_one() {
        assert_eq!(2, halve(4));
        assert_eq!(1, halve(3));
        assert_eq!(2, halve(5));
        assert_eq!(1, halve(1));
        assert_eq!(-2, halve(-4));
        assert_eq!(-1, halve(-1));
    }

    #[test]
    fn half_applies_after_the_modifier() {
        let result = eval(&roll_with(2, 6, 1, &[Attribute::Half]), false, vec![3, 4]);
        assert_eq!(4, result.sum);
    }

    #[test]
    fn advantage_keeps_the_high_face() {
        let result = eval(&roll_with(1, 20, 0, &[Attribute::Advantage]), false, vec![5, 18]);
        assert_eq!(vec![18], result.faces);
        assert_eq!(vec![5], result.adv_dis_dropped);
        assert_eq!(18, result.sum);
    }

    #[test]
    fn disadvantage_keeps_the_low_face() {
        let result =
            eval(&roll_with(1, 20, 0, &[Attribute::Disadvantage]), false, vec![5, 18]);
        assert_eq!(vec![5], result.faces);
        assert_eq!(vec![18], result.adv_dis_dropped);
        assert_eq!(5, result.sum);
    }

    #[test]
    fn crit_doubles_the_dice() {
        let result = eval(&roll_with(2, 6, 0, &[Attribute::Crit]), false, vec![1, 2, 3, 4]);
        assert_eq!(4, result.faces.len());
        assert_eq!(10, result.sum);
    }

    #[test]
    fn carried_crit_only_doubles_damage_rolls() {
        let result = eval(&roll_with(2, 6, 0, &[Attribute::Dmg]), true, vec![1, 2, 3, 4]);
        assert_eq!(4, result.faces.len());

        let result = eval(&roll_with(2, 6, 0, &[]), true, vec![1, 2]);
        assert_eq!(2, result.faces.len());
    }

    #[test]
    fn drop_high_and_low_remove_one_face_each() {
        let result = eval(
            &roll_with(4, 6, 0, &[Attribute::DropHigh, Attribute::DropLow]),
            false,
            vec![3, 6, 1, 5],
        );
        assert_eq!(vec![3, 5], result.faces);
        assert_eq!(vec![6], result.high_dropped);
        assert_eq!(vec![1], result.low_dropped);
        assert_eq!(8, result.sum);
    }

    #[test]
    fn drop_spares_a_single_face() {
        let result = eval(&roll_with(1, 6, 0, &[Attribute::DropHigh]), false, vec![4]);
        assert_eq!(vec![4], result.faces);
        assert!(result.high_dropped.is_empty());
        assert_eq!(4, result.sum);
    }

    #[test]
    fn drop_high_removes_one_occurrence_on_ties() {
        let result = eval(
            &roll_with(3, 6, 0, &[Attribute::DropHigh]),
            false,
            vec![6, 2, 6],
        );
        assert_eq!(vec![2, 6], result.faces);
        assert_eq!(vec![6], result.high_dropped);
        assert_eq!(8, result.sum);
    }

    #[test]
    fn invalid_roll_draws_nothing() {
        let roll = DiceRoll {
            amount: 123456,
            sides: 10,
            modifier: 0,
            attribs: AttributeSet::new(),
        };
        let mut iter = Vec::new().into_iter();
        let result = Evaluator::eval(&roll, false, &mut MockIter { iter: &mut iter });
        // an empty mock panics on any draw, reaching here proves none happened
        assert!(result.is_err());
    }
}
