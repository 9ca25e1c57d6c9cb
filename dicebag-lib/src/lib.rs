pub mod attribute;
pub mod dice;
pub mod error;
mod evaluator;
pub mod expression;
mod parser;
pub mod roll;
pub mod roller;
