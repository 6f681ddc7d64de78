// Interval Raffle Program - Configuration
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{clock::UnixTimestamp, msg};

use crate::error::RaffleError;

/// Confirmations the oracle waits for before answering
pub const REQUEST_CONFIRMATIONS: u16 = 3;
/// One word decides one round
pub const NUM_WORDS: u32 = 1;
pub const DEFAULT_CALLBACK_GAS_LIMIT: u32 = 500_000;

/// Parameters attached to every randomness request
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawParams {
    /// Gas lane / key hash identifying the oracle proving key
    pub key_hash: [u8; 32],
    /// Oracle subscription funding the requests
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
}

impl DrawParams {
    pub const LEN: usize = 32 + 8 + 2 + 4 + 4;

    pub fn new(key_hash: [u8; 32], subscription_id: u64, callback_gas_limit: u32) -> Self {
        Self {
            key_hash,
            subscription_id,
            request_confirmations: REQUEST_CONFIRMATIONS,
            callback_gas_limit,
            num_words: NUM_WORDS,
        }
    }
}

impl Default for DrawParams {
    fn default() -> Self {
        Self::new([0u8; 32], 0, DEFAULT_CALLBACK_GAS_LIMIT)
    }
}

/// Settings fixed for the lifetime of a raffle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaffleConfig {
    /// Minimum lamports per entry
    pub entrance_fee: u64,
    /// Seconds a round stays open before a draw may be requested
    pub interval: UnixTimestamp,
    pub draw_params: DrawParams,
}

impl RaffleConfig {
    pub fn new(entrance_fee: u64, interval: UnixTimestamp) -> Self {
        Self {
            entrance_fee,
            interval,
            draw_params: DrawParams::default(),
        }
    }

    pub fn with_draw_params(mut self, draw_params: DrawParams) -> Self {
        self.draw_params = draw_params;
        self
    }

    pub fn validate(&self) -> Result<(), RaffleError> {
        if self.entrance_fee == 0 {
            msg!("Entrance fee must be greater than zero");
            return Err(RaffleError::InvalidConfig);
        }
        if self.interval < 0 {
            msg!("Interval cannot be negative");
            return Err(RaffleError::InvalidConfig);
        }
        if self.draw_params.num_words == 0 {
            msg!("At least one random word must be requested");
            return Err(RaffleError::InvalidConfig);
        }
        Ok(())
    }
}
