use crate::dice::DiceRoll;
use crate::error::Error;
use crate::evaluator::Evaluator;
use crate::expression;
use crate::expression::RollingExpression;
use crate::roll::result;
use crate::roll::result::DiceRollResult;
use crate::roll::result::RollingExpressionResult;
use crate::roll::Source;
use rand::Rng;

/// Default random dice roller
pub struct RandomSource<'a, T: Rng> {
    pub generator: &'a mut T,
}

impl<T: Rng> Source for RandomSource<'_, T> {
    fn throw(&mut self, sides: u64) -> u64 {
        self.generator.gen_range(1..1 + sides)
    }
}

/// Holds one batch of roll args
#[derive(Clone, Debug)]
pub struct Roller(Vec<String>);

impl Roller {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Roller(args.into_iter().map(Into::into).collect())
    }

    /// Group the roll args into rolling expressions without rolling
    /// anything
    pub fn parse(&self) -> (Vec<RollingExpression>, Vec<Error>) {
        expression::group_tokens(&self.0)
    }

    /// Roll the whole batch using the default Rng source
    pub fn perform(&self) -> (Vec<RollingExpressionResult>, Vec<Error>) {
        self.perform_with(&mut rand::thread_rng())
    }

    /// Roll the whole batch using the provided Rng source
    pub fn perform_with<R: Rng>(&self, generator: &mut R) -> (Vec<RollingExpressionResult>, Vec<Error>) {
        self.perform_with_source(&mut RandomSource { generator })
    }

    /// Roll the whole batch using the provided source. A critical hit
    /// carries over to the damage rolls of the next expression.
    pub fn perform_with_source<S: Source>(
        &self,
        source: &mut S,
    ) -> (Vec<RollingExpressionResult>, Vec<Error>) {
        let (expressions, mut errors) = self.parse();
        let mut results = Vec::with_capacity(expressions.len());
        let mut carried_crit = false;
        for expression in &expressions {
            let (result, mut eval_errors) =
                Evaluator::eval_expression(expression, carried_crit, source);
            carried_crit = result.scored_crit_hit();
            errors.append(&mut eval_errors);
            results.push(result);
        }
        (results, errors)
    }

    /// Roll the whole batch and keep only the grand total
    pub fn perform_and_sum(&self) -> i64 {
        let (results, _) = self.perform();
        result::results_sum(&results)
    }

    /// The roll args held by this batch
    pub fn as_args(&self) -> &[String] {
        &self.0
    }
}

/// Performs already built dice rolls, outside of any expression
/// context, using the default Rng source
pub fn perform_rolls(rolls: &[DiceRoll]) -> (Vec<DiceRollResult>, Vec<Error>) {
    let generator = &mut rand::thread_rng();
    perform_rolls_with_source(rolls, &mut RandomSource { generator })
}

/// Performs already built dice rolls with the provided source. Invalid
/// rolls turn into errors without stopping the rest.
pub fn perform_rolls_with_source<S: Source>(
    rolls: &[DiceRoll],
    source: &mut S,
) -> (Vec<DiceRollResult>, Vec<Error>) {
    let mut results = Vec::new();
    let mut errors = Vec::new();
    for roll in rolls {
        match Evaluator::eval(roll, false, source) {
            Ok(result) => results.push(result),
            Err(error) => errors.push(error),
        }
    }
    (results, errors)
}
