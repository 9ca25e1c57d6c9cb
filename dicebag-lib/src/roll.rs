pub mod result;

/// Interface for rolling dices
pub trait Source {
    /// One uniform draw in `[1, sides]`
    fn throw(&mut self, sides: u64) -> u64;
}
