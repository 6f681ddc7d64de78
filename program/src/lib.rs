// Interval Raffle
// A repeating raffle: fixed entry fee, draw after an interval, winner takes the pool.

// Core modules
pub mod config;
pub mod error;
pub mod events;
pub mod pool;
pub mod raffle;
pub mod state;

// Collaborator interfaces and their on-chain adapters
pub mod oracle;
pub mod payout;

// Program surface
pub mod entrypoint;
pub mod instruction;
pub mod processor;

use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, pubkey::Pubkey};

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    processor::Processor::process(program_id, accounts, instruction_data)
}
