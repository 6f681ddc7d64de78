// Interval Raffle Program - Instructions
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    clock::UnixTimestamp,
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

use crate::oracle::RequestId;

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq)]
pub enum RaffleInstruction {
    /// Initialize a raffle and open its first round
    ///
    /// Accounts expected:
    /// 0. `[signer, writable]` The payer that created the raffle account
    /// 1. `[writable]` The raffle account, program-owned and uninitialized
    /// 2. `[]` The coordinator allowed to deliver randomness
    Initialize {
        /// Minimum lamports per entry
        entrance_fee: u64,
        /// Seconds between round start and draw eligibility
        interval: UnixTimestamp,
        key_hash: [u8; 32],
        subscription_id: u64,
        callback_gas_limit: u32,
    },

    /// Enter the current round
    ///
    /// Accounts expected:
    /// 0. `[signer, writable]` The player paying the fee
    /// 1. `[writable]` The raffle account
    /// 2. `[]` The system program
    Enter {
        /// Lamports paid, at least the entrance fee
        amount: u64,
    },

    /// Report whether a draw may be requested, as return data `[0|1]`
    ///
    /// Accounts expected:
    /// 0. `[]` The raffle account
    CheckUpkeep,

    /// Close entries and request randomness
    ///
    /// Accounts expected:
    /// 0. `[writable]` The raffle account
    PerformUpkeep,

    /// Deliver randomness for the pending request and pay the winner
    ///
    /// Accounts expected:
    /// 0. `[signer]` The coordinator
    /// 1. `[writable]` The raffle account
    /// 2.. `[writable]` Entrant accounts, must include the winner
    FulfillRandomness {
        request_id: RequestId,
        /// Raw VRF outputs, one per requested word
        randomness: Vec<[u8; 32]>,
    },
}

impl RaffleInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        Self::try_from_slice(input).map_err(|_| ProgramError::InvalidInstructionData)
    }

    pub fn pack(&self) -> Result<Vec<u8>, ProgramError> {
        self.try_to_vec()
            .map_err(|_| ProgramError::InvalidInstructionData)
    }
}

/// Create initialize instruction
#[allow(clippy::too_many_arguments)]
pub fn initialize(
    program_id: &Pubkey,
    payer: &Pubkey,
    raffle_account: &Pubkey,
    coordinator: &Pubkey,
    entrance_fee: u64,
    interval: UnixTimestamp,
    key_hash: [u8; 32],
    subscription_id: u64,
    callback_gas_limit: u32,
) -> Result<Instruction, ProgramError> {
    let data = RaffleInstruction::Initialize {
        entrance_fee,
        interval,
        key_hash,
        subscription_id,
        callback_gas_limit,
    }
    .pack()?;

    let accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(*raffle_account, false),
        AccountMeta::new_readonly(*coordinator, false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Create enter instruction
pub fn enter(
    program_id: &Pubkey,
    player: &Pubkey,
    raffle_account: &Pubkey,
    amount: u64,
) -> Result<Instruction, ProgramError> {
    let data = RaffleInstruction::Enter { amount }.pack()?;

    let accounts = vec![
        AccountMeta::new(*player, true),
        AccountMeta::new(*raffle_account, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

/// Create check_upkeep instruction
pub fn check_upkeep(
    program_id: &Pubkey,
    raffle_account: &Pubkey,
) -> Result<Instruction, ProgramError> {
    let data = RaffleInstruction::CheckUpkeep.pack()?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new_readonly(*raffle_account, false)],
        data,
    })
}

/// Create perform_upkeep instruction
pub fn perform_upkeep(
    program_id: &Pubkey,
    raffle_account: &Pubkey,
) -> Result<Instruction, ProgramError> {
    let data = RaffleInstruction::PerformUpkeep.pack()?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::new(*raffle_account, false)],
        data,
    })
}

/// Create fulfill_randomness instruction
pub fn fulfill_randomness(
    program_id: &Pubkey,
    coordinator: &Pubkey,
    raffle_account: &Pubkey,
    entrants: &[Pubkey],
    request_id: RequestId,
    randomness: Vec<[u8; 32]>,
) -> Result<Instruction, ProgramError> {
    let data = RaffleInstruction::FulfillRandomness {
        request_id,
        randomness,
    }
    .pack()?;

    let mut accounts = vec![
        AccountMeta::new_readonly(*coordinator, true),
        AccountMeta::new(*raffle_account, false),
    ];
    // The coordinator may itself be an entrant; it still needs a writable slot
    for entrant in entrants {
        if !accounts[2..].iter().any(|meta| meta.pubkey == *entrant) {
            accounts.push(AccountMeta::new(*entrant, false));
        }
    }

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}
