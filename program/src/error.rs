// Interval Raffle Program - Errors
use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Errors that may be returned by the raffle
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RaffleError {
    /// Paid amount is below the entrance fee
    #[error("Not enough lamports to enter the raffle")]
    InsufficientFee,

    /// Entries are closed while a draw is pending
    #[error("Raffle is not open")]
    RaffleNotOpen,

    /// A draw was requested before the raffle was eligible
    #[error("Upkeep not needed: balance={balance}, players={players}, phase={phase}")]
    UpkeepNotNeeded {
        balance: u64,
        players: u64,
        phase: u8,
    },

    /// Randomness delivered for a request this raffle is not waiting on
    #[error("Unrecognized randomness request")]
    UnrecognizedRequest,

    /// The prize could not be transferred to the winner
    #[error("Prize transfer failed")]
    PayoutFailed,

    #[error("No players in the pool")]
    EmptyPool,

    /// Randomness delivery carried no words
    #[error("Randomness delivery is empty")]
    MissingRandomness,

    #[error("Arithmetic overflow")]
    Overflow,

    /// Raffle configuration rejected at construction
    #[error("Invalid raffle configuration")]
    InvalidConfig,

    /// Only the registered coordinator may deliver randomness
    #[error("Only the coordinator can fulfill randomness requests")]
    OnlyCoordinatorCanFulfill,

    /// The raffle account has no room for another entry
    #[error("Raffle account is full")]
    RaffleFull,

    #[error("Raffle already initialized")]
    AlreadyInitialized,

    #[error("Raffle not initialized")]
    NotInitialized,

    /// The randomness oracle refused the request
    #[error("Randomness oracle unavailable")]
    OracleUnavailable,
}

impl RaffleError {
    /// Stable custom error code reported through `ProgramError::Custom`
    pub fn code(&self) -> u32 {
        match self {
            RaffleError::InsufficientFee => 0,
            RaffleError::RaffleNotOpen => 1,
            RaffleError::UpkeepNotNeeded { .. } => 2,
            RaffleError::UnrecognizedRequest => 3,
            RaffleError::PayoutFailed => 4,
            RaffleError::EmptyPool => 5,
            RaffleError::MissingRandomness => 6,
            RaffleError::Overflow => 7,
            RaffleError::InvalidConfig => 8,
            RaffleError::OnlyCoordinatorCanFulfill => 9,
            RaffleError::RaffleFull => 10,
            RaffleError::AlreadyInitialized => 11,
            RaffleError::NotInitialized => 12,
            RaffleError::OracleUnavailable => 13,
        }
    }
}

impl From<RaffleError> for ProgramError {
    fn from(e: RaffleError) -> Self {
        ProgramError::Custom(e.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_custom_program_error() {
        assert_eq!(
            ProgramError::from(RaffleError::UnrecognizedRequest),
            ProgramError::Custom(3)
        );
        let upkeep = RaffleError::UpkeepNotNeeded {
            balance: 0,
            players: 0,
            phase: 0,
        };
        assert_eq!(ProgramError::from(upkeep), ProgramError::Custom(2));
    }

    #[test]
    fn upkeep_error_reports_state_tuple() {
        let err = RaffleError::UpkeepNotNeeded {
            balance: 3,
            players: 3,
            phase: 1,
        };
        assert_eq!(
            err.to_string(),
            "Upkeep not needed: balance=3, players=3, phase=1"
        );
    }
}
