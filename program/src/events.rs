// Interval Raffle Program - Events
use solana_program::{msg, pubkey::Pubkey};

use crate::oracle::RequestId;

/// Observable raffle events, written to the program log as they happen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RaffleEvent {
    RaffleEntered { player: Pubkey, amount: u64 },
    DrawRequested { request_id: RequestId },
    WinnerPicked { winner: Pubkey },
    PrizeTransferred { winner: Pubkey, amount: u64 },
}

impl RaffleEvent {
    pub fn emit(&self) {
        match self {
            RaffleEvent::RaffleEntered { player, amount } => {
                msg!("RaffleEntered: player={}, amount={}", player, amount)
            }
            RaffleEvent::DrawRequested { request_id } => {
                msg!("DrawRequested: request_id={}", request_id)
            }
            RaffleEvent::WinnerPicked { winner } => msg!("WinnerPicked: winner={}", winner),
            RaffleEvent::PrizeTransferred { winner, amount } => {
                msg!("PrizeTransferred: winner={}, amount={}", winner, amount)
            }
        }
    }
}
