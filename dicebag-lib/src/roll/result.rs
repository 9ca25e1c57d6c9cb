use crate::attribute::Attribute;
use crate::dice::DiceRoll;
use crate::evaluator;
use itertools::Itertools;

/// Outcome of performing one dice roll, never mutated after the
/// evaluator returns it
#[derive(Debug, Clone)]
pub struct DiceRollResult {
    /// The performed roll
    pub roll: DiceRoll,
    /// Kept dice faces
    pub faces: Vec<i64>,
    /// Final value after modifier, halving, floor and sign
    pub sum: i64,
    /// Faces discarded by advantage or disadvantage selection
    pub adv_dis_dropped: Vec<i64>,
    /// Face discarded by drophigh
    pub high_dropped: Vec<i64>,
    /// Face discarded by droplow
    pub low_dropped: Vec<i64>,
}

impl DiceRollResult {
    pub(crate) fn new(roll: DiceRoll) -> Self {
        DiceRollResult {
            roll,
            faces: Vec::new(),
            sum: 0,
            adv_dis_dropped: Vec::new(),
            high_dropped: Vec::new(),
            low_dropped: Vec::new(),
        }
    }

    /// A natural 20 on a bare d20, the only crit scoring roll
    pub fn has_scored_crit_hit(&self) -> bool {
        self.roll.amount == 1 && self.roll.sides == 20 && self.faces == [20]
    }
}

impl std::fmt::Display for DiceRollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Result of {}: [{}] Sum: {}",
            self.roll,
            self.faces.iter().format(" "),
            self.sum
        )?;
        if !self.adv_dis_dropped.is_empty() {
            write!(f, " Dropped: [{}]", self.adv_dis_dropped.iter().format(" "))?;
        }
        if !self.high_dropped.is_empty() {
            write!(f, " Dropped high: [{}]", self.high_dropped.iter().format(" "))?;
        }
        if !self.low_dropped.is_empty() {
            write!(f, " Dropped low: [{}]", self.low_dropped.iter().format(" "))?;
        }
        // spell rolls advertise the damage taken on a successful save,
        // unless the roll was the saved half already
        if self.roll.attribs.has(Attribute::Spell) && !self.roll.attribs.has(Attribute::Half) {
            write!(f, " Save: {}", evaluator::halve(self.sum))?;
        }
        Ok(())
    }
}

/// Results of performing one rolling expression
#[derive(Debug, Clone, Default)]
pub struct RollingExpressionResult {
    pub results: Vec<DiceRollResult>,
}

impl RollingExpressionResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Plain sum of the contained roll sums, no extra floor
    pub fn sum(&self) -> i64 {
        self.results.iter().map(|result| result.sum).sum()
    }

    /// True when any contained roll scored a critical hit
    pub fn scored_crit_hit(&self) -> bool {
        self.results.iter().any(DiceRollResult::has_scored_crit_hit)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl std::fmt::Display for RollingExpressionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Roll result:")?;
        for result in &self.results {
            writeln!(f, "{result}")?;
        }
        write!(f, "Roll results sum: {}", self.sum())
    }
}

/// Grand total of a result batch. Floored to 1 when at least one dice
/// roll was actually performed, 0 otherwise.
pub fn results_sum(results: &[RollingExpressionResult]) -> i64 {
    if results.iter().all(RollingExpressionResult::is_empty) {
        return 0;
    }
    let total: i64 = results.iter().map(RollingExpressionResult::sum).sum();
    total.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeSet;

    fn result_for(amount: u64, sides: u64, faces: &[i64]) -> DiceRollResult {
        let roll = DiceRoll::new(amount, sides, 0, AttributeSet::new()).unwrap();
        let mut result = DiceRollResult::new(roll);
        result.faces = faces.to_vec();
        result.sum = faces.iter().sum();
        result
    }

    #[test]
    fn crit_detection() {
        assert!(result_for(1, 20, &[20]).has_scored_crit_hit());

        assert!(!result_for(1, 20, &[19]).has_scored_crit_hit());
        assert!(!result_for(2, 20, &[20, 20]).has_scored_crit_hit());
        assert!(!result_for(1, 12, &[12]).has_scored_crit_hit());
    }

    #[test]
    fn expression_crit_detection() {
        let mut expression = RollingExpressionResult::new();
        expression.results.push(result_for(2, 6, &[3, 4]));
        assert!(!expression.scored_crit_hit());

        expression.results.push(result_for(1, 20, &[20]));
        assert!(expression.scored_crit_hit());
    }

    #[test]
    fn expression_sum_has_no_floor() {
        let mut expression = RollingExpressionResult::new();
        let mut minus = result_for(1, 6, &[3]);
        minus.sum = -1;
        expression.results.push(minus);
        assert_eq!(-1, expression.sum());
    }

    #[test]
    fn batch_sum_floors_only_when_rolls_happened() {
        assert_eq!(0, results_sum(&[]));
        assert_eq!(0, results_sum(&[RollingExpressionResult::new()]));

        let mut expression = RollingExpressionResult::new();
        let mut minus = result_for(1, 6, &[3]);
        minus.sum = -1;
        expression.results.push(minus);
        assert_eq!(1, results_sum(&[expression]));

        let mut expression = RollingExpressionResult::new();
        expression.results.push(result_for(2, 6, &[3, 4]));
        assert_eq!(7, results_sum(&[expression]));
    }

    #[test]
    fn result_string() {
        let roll = DiceRoll::new(2, 8, 1, AttributeSet::new()).unwrap();
        let mut result = DiceRollResult::new(roll);
        result.faces = vec![3, 7];
        result.sum = 11;
        assert_eq!("Result of 2d8+1: [3 7] Sum: 11", result.to_string());
    }

    #[test]
    fn spell_result_advertises_the_save() {
        let attribs = AttributeSet::new().with(Attribute::Spell);
        let roll = DiceRoll::new(8, 8, 0, attribs).unwrap();
        let mut result = DiceRollResult::new(roll);
        result.faces = vec![5, 5, 5, 5, 5, 5, 5, 5];
        result.sum = 40;
        assert!(result.to_string().ends_with("Save: 20"));

        let halved = attribs.with(Attribute::Half);
        let roll = DiceRoll::new(8, 8, 0, halved).unwrap();
        let mut result = DiceRollResult::new(roll);
        result.faces = vec![5; 8];
        result.sum = 20;
        assert!(!result.to_string().contains("Save:"));
    }

    #[test]
    fn expression_string() {
        let mut expression = RollingExpressionResult::new();
        let roll = DiceRoll::new(2, 8, 1, AttributeSet::new()).unwrap();
        let mut result = DiceRollResult::new(roll);
        result.faces = vec![3, 7];
        result.sum = 11;
        expression.results.push(result);
        assert_eq!(
            "Roll result:\nResult of 2d8+1: [3 7] Sum: 11\nRoll results sum: 11",
            expression.to_string()
        );
    }
}
