// Interval Raffle Program - Entrant pool
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, pubkey::Pubkey};

use crate::error::RaffleError;

/// Entrants of the current round and the lamports they paid in
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RafflePool {
    pub(crate) entrance_fee: u64,
    /// Entry order, one element per entry
    pub(crate) players: Vec<Pubkey>,
    pub(crate) pooled_balance: u64,
}

impl RafflePool {
    /// Serialized size with no players: fee + vec length prefix + balance
    pub const BASE_LEN: usize = 8 + 4 + 8;
    pub const PLAYER_LEN: usize = 32;

    pub fn new(entrance_fee: u64) -> Self {
        Self {
            entrance_fee,
            players: Vec::new(),
            pooled_balance: 0,
        }
    }

    pub fn add_participant(&mut self, player: Pubkey, fee: u64) -> Result<(), RaffleError> {
        if fee < self.entrance_fee {
            msg!(
                "Entry fee too low: paid {} lamports, need {} lamports",
                fee,
                self.entrance_fee
            );
            return Err(RaffleError::InsufficientFee);
        }
        let pooled_balance = self
            .pooled_balance
            .checked_add(fee)
            .ok_or(RaffleError::Overflow)?;

        self.players.push(player);
        self.pooled_balance = pooled_balance;
        Ok(())
    }

    /// Winner index is `random_value mod players`.
    pub fn select_winner(&self, random_value: u64) -> Result<(usize, Pubkey), RaffleError> {
        if self.players.is_empty() {
            return Err(RaffleError::EmptyPool);
        }
        let index = (random_value % self.players.len() as u64) as usize;
        Ok((index, self.players[index]))
    }

    pub fn reset(&mut self) {
        self.players.clear();
        self.pooled_balance = 0;
    }

    pub fn entrance_fee(&self) -> u64 {
        self.entrance_fee
    }

    pub fn players(&self) -> &[Pubkey] {
        &self.players
    }

    pub fn pooled_balance(&self) -> u64 {
        self.pooled_balance
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_grow_players_and_balance() {
        let mut pool = RafflePool::new(5);
        let player = Pubkey::new_unique();

        for n in 1..=4u64 {
            pool.add_participant(player, 5).unwrap();
            assert_eq!(pool.len() as u64, n);
            assert_eq!(pool.pooled_balance(), n * 5);
        }
        // repeat entries are kept as separate slots
        assert!(pool.players().iter().all(|p| *p == player));
    }

    #[test]
    fn low_fee_leaves_pool_untouched() {
        let mut pool = RafflePool::new(5);
        pool.add_participant(Pubkey::new_unique(), 5).unwrap();
        let before = pool.clone();

        assert_eq!(
            pool.add_participant(Pubkey::new_unique(), 4),
            Err(RaffleError::InsufficientFee)
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn overpayment_is_pooled() {
        let mut pool = RafflePool::new(5);
        pool.add_participant(Pubkey::new_unique(), 8).unwrap();
        assert_eq!(pool.pooled_balance(), 8);
    }

    #[test]
    fn balance_overflow_is_rejected() {
        let mut pool = RafflePool::new(1);
        pool.add_participant(Pubkey::new_unique(), u64::MAX).unwrap();
        let before = pool.clone();
        assert_eq!(
            pool.add_participant(Pubkey::new_unique(), 1),
            Err(RaffleError::Overflow)
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn winner_is_random_value_mod_len() {
        let mut pool = RafflePool::new(1);
        let players: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        for player in &players {
            pool.add_participant(*player, 1).unwrap();
        }

        assert_eq!(pool.select_winner(7).unwrap(), (1, players[1]));
        assert_eq!(pool.select_winner(9).unwrap(), (0, players[0]));
        assert_eq!(pool.select_winner(u64::MAX).unwrap().0, (u64::MAX % 3) as usize);
        // same inputs, same winner
        assert_eq!(pool.select_winner(7), pool.select_winner(7));
    }

    #[test]
    fn empty_pool_has_no_winner() {
        let pool = RafflePool::new(1);
        assert_eq!(pool.select_winner(7), Err(RaffleError::EmptyPool));
    }

    #[test]
    fn reset_clears_round() {
        let mut pool = RafflePool::new(2);
        pool.add_participant(Pubkey::new_unique(), 2).unwrap();
        pool.reset();
        assert!(pool.is_empty());
        assert_eq!(pool.pooled_balance(), 0);
        assert_eq!(pool.entrance_fee(), 2);
        assert_eq!(pool.try_to_vec().unwrap().len(), RafflePool::BASE_LEN);
    }
}
