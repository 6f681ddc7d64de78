// Interval Raffle Program - Instruction Processor
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::{Clock, UnixTimestamp},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, set_return_data},
    program_error::ProgramError,
    program_pack::IsInitialized,
    pubkey::Pubkey,
    rent::Rent,
    system_instruction, system_program,
    sysvar::Sysvar,
};

use crate::{
    config::{DrawParams, RaffleConfig},
    error::RaffleError,
    instruction::RaffleInstruction,
    oracle::{self, CoordinatorOracle, RequestId},
    payout::LamportPayout,
    pool::RafflePool,
    state::{Raffle, RafflePhase},
};

/// Program state handler.
pub struct Processor;

impl Processor {
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = RaffleInstruction::unpack(instruction_data)?;

        match instruction {
            RaffleInstruction::Initialize {
                entrance_fee,
                interval,
                key_hash,
                subscription_id,
                callback_gas_limit,
            } => {
                msg!("Instruction: Initialize");
                let config = RaffleConfig::new(entrance_fee, interval).with_draw_params(
                    DrawParams::new(key_hash, subscription_id, callback_gas_limit),
                );
                Self::process_initialize(program_id, accounts, config)
            }
            RaffleInstruction::Enter { amount } => {
                msg!("Instruction: Enter");
                Self::process_enter(program_id, accounts, amount)
            }
            RaffleInstruction::CheckUpkeep => {
                msg!("Instruction: Check Upkeep");
                Self::process_check_upkeep(program_id, accounts)
            }
            RaffleInstruction::PerformUpkeep => {
                msg!("Instruction: Perform Upkeep");
                Self::process_perform_upkeep(program_id, accounts)
            }
            RaffleInstruction::FulfillRandomness {
                request_id,
                randomness,
            } => {
                msg!("Instruction: Fulfill Randomness");
                Self::process_fulfill_randomness(program_id, accounts, request_id, &randomness)
            }
        }
    }

    fn process_initialize(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        config: RaffleConfig,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let payer_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;
        let coordinator_info = next_account_info(account_info_iter)?;

        if !payer_info.is_signer {
            msg!("Payer must sign the transaction");
            return Err(ProgramError::MissingRequiredSignature);
        }

        if raffle_info.owner != program_id {
            msg!("Raffle account must be owned by this program");
            return Err(ProgramError::IncorrectProgramId);
        }

        if let Ok(existing) = Raffle::load(&raffle_info.data.borrow()) {
            if existing.is_initialized() {
                msg!("Raffle account is already initialized");
                return Err(RaffleError::AlreadyInitialized.into());
            }
        }

        let rent = Rent::get()?;
        if !rent.is_exempt(raffle_info.lamports(), raffle_info.data_len()) {
            msg!("Raffle account must be rent exempt");
            return Err(ProgramError::AccountNotRentExempt);
        }

        let now = Clock::get()?.unix_timestamp;
        let raffle = Raffle::new(config, *coordinator_info.key, now)?;
        raffle.store(&mut raffle_info.data.borrow_mut())?;

        msg!(
            "Raffle initialized: EntranceFee={}, Interval={}s, Coordinator={}, Capacity={} entries",
            raffle.entrance_fee(),
            raffle.interval(),
            coordinator_info.key,
            raffle_info.data_len().saturating_sub(Raffle::BASE_LEN) / RafflePool::PLAYER_LEN
        );
        Ok(())
    }

    fn process_enter(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let player_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        if !player_info.is_signer {
            msg!("Player must sign the transaction");
            return Err(ProgramError::MissingRequiredSignature);
        }
        if *system_program_info.key != system_program::id() {
            return Err(ProgramError::IncorrectProgramId);
        }

        let mut raffle = Self::load_raffle(program_id, raffle_info)?;
        let entries = raffle.number_of_players();
        if raffle.phase() == RafflePhase::Open
            && Raffle::space(entries + 1) > raffle_info.data_len()
        {
            msg!("Raffle account holds at most {} entries", entries);
            return Err(RaffleError::RaffleFull.into());
        }
        raffle.enter(*player_info.key, amount)?;

        invoke(
            &system_instruction::transfer(player_info.key, raffle_info.key, amount),
            &[
                player_info.clone(),
                raffle_info.clone(),
                system_program_info.clone(),
            ],
        )?;

        raffle.store(&mut raffle_info.data.borrow_mut())?;
        msg!(
            "Pool now holds {} lamports from {} entries",
            raffle.pooled_balance(),
            raffle.number_of_players()
        );
        Ok(())
    }

    fn process_check_upkeep(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let raffle_info = next_account_info(account_info_iter)?;

        let raffle = Self::load_raffle(program_id, raffle_info)?;
        let upkeep_needed = raffle.check_eligibility(Self::now()?);

        set_return_data(&[upkeep_needed as u8]);
        msg!("Upkeep needed: {}", upkeep_needed);
        Ok(())
    }

    /// Anyone may trigger the draw once the raffle is eligible
    fn process_perform_upkeep(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let raffle_info = next_account_info(account_info_iter)?;

        let mut raffle = Self::load_raffle(program_id, raffle_info)?;
        let mut oracle = CoordinatorOracle::new(
            *raffle_info.key,
            *raffle.coordinator(),
            raffle.next_request_id(),
        );

        raffle.request_draw(Self::now()?, &mut oracle)?;
        raffle.set_next_request_id(oracle.next_request_id());
        raffle.store(&mut raffle_info.data.borrow_mut())?;
        Ok(())
    }

    /// A failed payout aborts the instruction, so the runtime rolls back every write
    fn process_fulfill_randomness(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        request_id: RequestId,
        randomness: &[[u8; 32]],
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let coordinator_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;
        let entrant_infos = account_info_iter.as_slice();

        let mut raffle = Self::load_raffle(program_id, raffle_info)?;

        if !coordinator_info.is_signer || coordinator_info.key != raffle.coordinator() {
            msg!(
                "Randomness must be delivered by coordinator {}",
                raffle.coordinator()
            );
            return Err(RaffleError::OnlyCoordinatorCanFulfill.into());
        }

        let random_words = oracle::random_words(randomness);
        let reserve = Rent::get()?.minimum_balance(raffle_info.data_len());
        let mut payout = LamportPayout::new(raffle_info, entrant_infos, reserve);

        let result =
            raffle.deliver_randomness(request_id, &random_words, Self::now()?, &mut payout)?;
        raffle.store(&mut raffle_info.data.borrow_mut())?;

        msg!(
            "Round settled: winner={} (entry #{}), prize={} lamports",
            result.winner,
            result.winner_index,
            result.prize
        );
        Ok(())
    }

    fn load_raffle(program_id: &Pubkey, raffle_info: &AccountInfo) -> Result<Raffle, ProgramError> {
        if raffle_info.owner != program_id {
            msg!("Raffle account must be owned by this program");
            return Err(ProgramError::IncorrectProgramId);
        }
        let raffle = Raffle::load(&raffle_info.data.borrow())?;
        if !raffle.is_initialized() {
            msg!("Raffle account is not initialized");
            return Err(RaffleError::NotInitialized.into());
        }
        Ok(raffle)
    }

    fn now() -> Result<UnixTimestamp, ProgramError> {
        Ok(Clock::get()?.unix_timestamp)
    }
}
