// Interval Raffle Program - State
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    clock::UnixTimestamp,
    program_error::ProgramError,
    program_pack::{IsInitialized, Sealed},
    pubkey::Pubkey,
};

use crate::{
    config::{DrawParams, RaffleConfig},
    error::RaffleError,
    oracle::RequestId,
    pool::RafflePool,
};

/// Phase of the current round
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RafflePhase {
    /// Accepting entries
    Open,
    /// Waiting for randomness, entries rejected
    Drawing,
}

impl TryFrom<u8> for RafflePhase {
    type Error = &'static str;

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        match val {
            0 => Ok(RafflePhase::Open),
            1 => Ok(RafflePhase::Drawing),
            _ => Err("Invalid raffle phase"),
        }
    }
}

impl From<RafflePhase> for u8 {
    fn from(phase: RafflePhase) -> Self {
        match phase {
            RafflePhase::Open => 0,
            RafflePhase::Drawing => 1,
        }
    }
}

/// Raffle account data
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Raffle {
    pub(crate) is_initialized: bool,
    /// Only signer allowed to deliver randomness
    pub(crate) coordinator: Pubkey,
    /// Minimum round length in seconds
    pub(crate) interval: UnixTimestamp,
    pub(crate) draw_params: DrawParams,
    pub(crate) phase: RafflePhase,
    pub(crate) pool: RafflePool,
    pub(crate) last_round_start: UnixTimestamp,
    /// Informational only
    pub(crate) recent_winner: Option<Pubkey>,
    /// Set exactly while `phase == Drawing`
    pub(crate) pending_request_id: Option<RequestId>,
    pub(crate) next_request_id: RequestId,
}

impl Sealed for Raffle {}

impl IsInitialized for Raffle {
    fn is_initialized(&self) -> bool {
        self.is_initialized
    }
}

impl Raffle {
    /// Serialized size with an empty pool
    pub const BASE_LEN: usize = 1
        + 32
        + 8
        + DrawParams::LEN
        + 1
        + RafflePool::BASE_LEN
        + 8
        + (1 + 32)
        + (1 + 8)
        + 8;

    /// Start the first round at `now`.
    pub fn new(
        config: RaffleConfig,
        coordinator: Pubkey,
        now: UnixTimestamp,
    ) -> Result<Self, RaffleError> {
        config.validate()?;
        Ok(Self {
            is_initialized: true,
            coordinator,
            interval: config.interval,
            draw_params: config.draw_params,
            phase: RafflePhase::Open,
            pool: RafflePool::new(config.entrance_fee),
            last_round_start: now,
            recent_winner: None,
            pending_request_id: None,
            next_request_id: 1,
        })
    }

    /// Account size able to hold `max_players` entries
    pub fn space(max_players: usize) -> usize {
        Self::BASE_LEN + max_players * RafflePool::PLAYER_LEN
    }

    /// Upper bound on the bytes the current state occupies
    pub fn packed_len(&self) -> usize {
        Self::space(self.pool.len())
    }

    /// Read from the start of account data; trailing capacity is ignored.
    pub fn load(data: &[u8]) -> Result<Self, ProgramError> {
        Self::deserialize(&mut &data[..]).map_err(|_| ProgramError::InvalidAccountData)
    }

    pub fn store(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        if self.packed_len() > dst.len() {
            return Err(ProgramError::AccountDataTooSmall);
        }
        self.serialize(&mut &mut dst[..])
            .map_err(|_| ProgramError::AccountDataTooSmall)
    }

    pub fn entrance_fee(&self) -> u64 {
        self.pool.entrance_fee()
    }

    pub fn interval(&self) -> UnixTimestamp {
        self.interval
    }

    pub fn phase(&self) -> RafflePhase {
        self.phase
    }

    pub fn coordinator(&self) -> &Pubkey {
        &self.coordinator
    }

    pub fn player(&self, index: usize) -> Option<&Pubkey> {
        self.pool.players().get(index)
    }

    pub fn players(&self) -> &[Pubkey] {
        self.pool.players()
    }

    pub fn number_of_players(&self) -> usize {
        self.pool.len()
    }

    pub fn pooled_balance(&self) -> u64 {
        self.pool.pooled_balance()
    }

    pub fn last_round_start(&self) -> UnixTimestamp {
        self.last_round_start
    }

    pub fn recent_winner(&self) -> Option<&Pubkey> {
        self.recent_winner.as_ref()
    }

    pub fn pending_request_id(&self) -> Option<RequestId> {
        self.pending_request_id
    }

    pub fn next_request_id(&self) -> RequestId {
        self.next_request_id
    }

    pub(crate) fn set_next_request_id(&mut self, next_request_id: RequestId) {
        self.next_request_id = next_request_id;
    }

    pub fn draw_params(&self) -> &DrawParams {
        &self.draw_params
    }

    pub fn num_words(&self) -> u32 {
        self.draw_params.num_words
    }

    pub fn request_confirmations(&self) -> u16 {
        self.draw_params.request_confirmations
    }
}
