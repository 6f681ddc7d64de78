// Interval Raffle Program - Round state machine
//
// Open --perform upkeep--> Drawing --randomness delivered + paid--> Open
use solana_program::{clock::UnixTimestamp, msg, pubkey::Pubkey};

use crate::{
    error::RaffleError,
    events::RaffleEvent,
    oracle::{RandomnessOracle, RequestId},
    payout::PayoutExecutor,
    state::{Raffle, RafflePhase},
};

/// Outcome of a settled round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub winner: Pubkey,
    pub winner_index: usize,
    pub prize: u64,
}

impl Raffle {
    /// Add `player` to the current round.
    pub fn enter(&mut self, player: Pubkey, amount: u64) -> Result<RaffleEvent, RaffleError> {
        if self.phase != RafflePhase::Open {
            msg!("Raffle is not open for entries");
            return Err(RaffleError::RaffleNotOpen);
        }
        self.pool.add_participant(player, amount)?;

        let event = RaffleEvent::RaffleEntered { player, amount };
        event.emit();
        Ok(event)
    }

    /// Whether a draw may be requested at `now`. Advisory only.
    pub fn check_eligibility(&self, now: UnixTimestamp) -> bool {
        let time_passed = now.saturating_sub(self.last_round_start) >= self.interval;
        let is_open = self.phase == RafflePhase::Open;
        let has_balance = self.pool.pooled_balance() > 0;
        let has_players = !self.pool.is_empty();
        time_passed && is_open && has_balance && has_players
    }

    /// Close entries and ask the oracle for randomness.
    pub fn request_draw<O>(
        &mut self,
        now: UnixTimestamp,
        oracle: &mut O,
    ) -> Result<RequestId, RaffleError>
    where
        O: RandomnessOracle + ?Sized,
    {
        if !self.check_eligibility(now) {
            let err = RaffleError::UpkeepNotNeeded {
                balance: self.pool.pooled_balance(),
                players: self.pool.len() as u64,
                phase: self.phase.into(),
            };
            msg!("{}", err);
            return Err(err);
        }

        let request_id = oracle.submit_request(&self.draw_params)?;
        self.phase = RafflePhase::Drawing;
        self.pending_request_id = Some(request_id);

        RaffleEvent::DrawRequested { request_id }.emit();
        Ok(request_id)
    }

    /// Settle the round with the oracle's answer to `request_id`.
    ///
    /// Nothing changes unless the id matches the pending request. If the
    /// payout fails the drawn winner stays recorded and the round remains in
    /// `Drawing`.
    pub fn deliver_randomness<P>(
        &mut self,
        request_id: RequestId,
        random_words: &[u64],
        now: UnixTimestamp,
        payout: &mut P,
    ) -> Result<RoundResult, RaffleError>
    where
        P: PayoutExecutor + ?Sized,
    {
        if self.phase != RafflePhase::Drawing || self.pending_request_id != Some(request_id) {
            msg!(
                "Unrecognized request {}, pending {:?}",
                request_id,
                self.pending_request_id
            );
            return Err(RaffleError::UnrecognizedRequest);
        }
        let random_word = *random_words.first().ok_or(RaffleError::MissingRandomness)?;

        let (winner_index, winner) = self.pool.select_winner(random_word)?;
        self.recent_winner = Some(winner);
        RaffleEvent::WinnerPicked { winner }.emit();

        let prize = self.pool.pooled_balance();
        if let Err(err) = payout.transfer(&winner, prize) {
            msg!("Payout of {} lamports to {} failed: {}", prize, winner, err);
            return Err(RaffleError::PayoutFailed);
        }

        self.pool.reset();
        self.phase = RafflePhase::Open;
        self.last_round_start = now;
        self.pending_request_id = None;

        RaffleEvent::PrizeTransferred {
            winner,
            amount: prize,
        }
        .emit();
        Ok(RoundResult {
            winner,
            winner_index,
            prize,
        })
    }
}
