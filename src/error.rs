use thiserror::Error;

use crate::Value;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumProbabilityError {
    /// any of the number of dice, the sum or the number of sides is below 1
    #[error(
        "invalid argument: number of dice ({dice}), sum ({sum}) and number of sides ({sides}) must all be at least 1"
    )]
    InvalidArgument { dice: Value, sum: Value, sides: Value },

    /// the largest reachable sum `dice * sides` does not fit into a [`Value`]
    #[error("sum overflow: {dice} dice with {sides} sides each exceed the largest representable sum")]
    SumOverflow { dice: Value, sides: Value },
}
