// Randomness oracle integration for the interval raffle
use arrayref::array_ref;
use solana_program::{msg, pubkey::Pubkey};

use crate::{config::DrawParams, error::RaffleError};

/// Identifier correlating a randomness request with its later delivery
pub type RequestId = u64;

/// External randomness source.
///
/// Submitting is fire-and-forget: the words arrive later through
/// [`crate::raffle::Raffle::deliver_randomness`] keyed by the returned id.
pub trait RandomnessOracle {
    fn submit_request(&mut self, params: &DrawParams) -> Result<RequestId, RaffleError>;
}

/// On-chain oracle adapter.
///
/// Assigns sequential request ids and publishes each request in the program
/// log, where the off-chain coordinator picks it up and answers with a
/// `FulfillRandomness` instruction.
pub struct CoordinatorOracle {
    raffle: Pubkey,
    coordinator: Pubkey,
    next_request_id: RequestId,
}

impl CoordinatorOracle {
    pub fn new(raffle: Pubkey, coordinator: Pubkey, next_request_id: RequestId) -> Self {
        Self {
            raffle,
            coordinator,
            next_request_id,
        }
    }

    /// Sequence value to persist once the request is stored
    pub fn next_request_id(&self) -> RequestId {
        self.next_request_id
    }
}

impl RandomnessOracle for CoordinatorOracle {
    fn submit_request(&mut self, params: &DrawParams) -> Result<RequestId, RaffleError> {
        let request_id = self.next_request_id;
        self.next_request_id = request_id
            .checked_add(1)
            .ok_or(RaffleError::OracleUnavailable)?;

        msg!(
            "Randomness requested: raffle={}, coordinator={}, request_id={}",
            self.raffle,
            self.coordinator,
            request_id
        );
        msg!(
            "Draw params: subscription={}, confirmations={}, callback_gas_limit={}, words={}",
            params.subscription_id,
            params.request_confirmations,
            params.callback_gas_limit,
            params.num_words
        );
        Ok(request_id)
    }
}

/// Reduce a 32-byte VRF output to a word: first eight bytes, little endian
pub fn random_word(vrf_result: &[u8; 32]) -> u64 {
    u64::from_le_bytes(*array_ref![vrf_result, 0, 8])
}

pub fn random_words(vrf_results: &[[u8; 32]]) -> Vec<u64> {
    vrf_results.iter().map(random_word).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_comes_from_leading_bytes() {
        let mut result = [0xffu8; 32];
        result[..8].copy_from_slice(&7u64.to_le_bytes());
        assert_eq!(random_word(&result), 7);
        assert_eq!(random_words(&[result, [0u8; 32]]), vec![7, 0]);
    }

    #[test]
    fn coordinator_issues_sequential_ids() {
        let mut oracle = CoordinatorOracle::new(Pubkey::new_unique(), Pubkey::new_unique(), 1);
        let params = DrawParams::default();

        assert_eq!(oracle.submit_request(&params), Ok(1));
        assert_eq!(oracle.submit_request(&params), Ok(2));
        assert_eq!(oracle.next_request_id(), 3);
    }

    #[test]
    fn exhausted_sequence_is_refused() {
        let mut oracle =
            CoordinatorOracle::new(Pubkey::new_unique(), Pubkey::new_unique(), u64::MAX);
        assert_eq!(
            oracle.submit_request(&DrawParams::default()),
            Err(RaffleError::OracleUnavailable)
        );
        assert_eq!(oracle.next_request_id(), u64::MAX);
    }
}
