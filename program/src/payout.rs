// Interval Raffle Program - Prize payout
use solana_program::{account_info::AccountInfo, msg, pubkey::Pubkey};
use thiserror::Error;

/// Reasons a prize transfer can be refused
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayoutError {
    #[error("Recipient account was not provided")]
    RecipientNotProvided,

    #[error("Recipient account is not writable")]
    RecipientNotWritable,

    /// Paying out would dip the raffle account below its reserve
    #[error("Insufficient lamports in the prize account")]
    InsufficientFunds,

    #[error("Arithmetic overflow")]
    Overflow,

    /// Recipient refused the transfer
    #[error("Transfer rejected by recipient")]
    Rejected,
}

/// Moves the pooled balance to the winner. The result must be known before
/// the call returns.
pub trait PayoutExecutor {
    fn transfer(&mut self, recipient: &Pubkey, amount: u64) -> Result<(), PayoutError>;
}

/// Pays out of a program-owned account by moving lamports directly.
///
/// The winner has to be one of `recipients`; the coordinator passes the
/// entrants' accounts along with the randomness.
pub struct LamportPayout<'a, 'b> {
    source: &'b AccountInfo<'a>,
    recipients: &'b [AccountInfo<'a>],
    /// Lamports that must stay in `source`, typically its rent-exempt minimum
    reserve: u64,
}

impl<'a, 'b> LamportPayout<'a, 'b> {
    pub fn new(
        source: &'b AccountInfo<'a>,
        recipients: &'b [AccountInfo<'a>],
        reserve: u64,
    ) -> Self {
        Self {
            source,
            recipients,
            reserve,
        }
    }
}

impl PayoutExecutor for LamportPayout<'_, '_> {
    fn transfer(&mut self, recipient: &Pubkey, amount: u64) -> Result<(), PayoutError> {
        let recipient_info = self
            .recipients
            .iter()
            .find(|info| info.key == recipient)
            .ok_or(PayoutError::RecipientNotProvided)?;
        if !recipient_info.is_writable {
            return Err(PayoutError::RecipientNotWritable);
        }
        if recipient_info.key == self.source.key {
            return Err(PayoutError::Rejected);
        }

        let remaining = self
            .source
            .lamports()
            .checked_sub(amount)
            .filter(|remaining| *remaining >= self.reserve)
            .ok_or(PayoutError::InsufficientFunds)?;
        let credited = recipient_info
            .lamports()
            .checked_add(amount)
            .ok_or(PayoutError::Overflow)?;

        **self.source.lamports.borrow_mut() = remaining;
        **recipient_info.lamports.borrow_mut() = credited;

        msg!("Transferred {} lamports to {}", amount, recipient);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account<'a>(
        key: &'a Pubkey,
        owner: &'a Pubkey,
        lamports: &'a mut u64,
        data: &'a mut [u8],
        is_writable: bool,
    ) -> AccountInfo<'a> {
        AccountInfo::new(key, false, is_writable, lamports, data, owner, false, 0)
    }

    #[test]
    fn moves_lamports_to_listed_recipient() {
        let program_id = Pubkey::new_unique();
        let system = Pubkey::default();
        let (raffle_key, winner_key) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut raffle_lamports, mut winner_lamports) = (1_300u64, 50u64);
        let (mut raffle_data, mut winner_data) = ([0u8; 4], [0u8; 0]);

        let raffle = account(
            &raffle_key,
            &program_id,
            &mut raffle_lamports,
            &mut raffle_data,
            true,
        );
        let recipients = [account(
            &winner_key,
            &system,
            &mut winner_lamports,
            &mut winner_data,
            true,
        )];

        let mut payout = LamportPayout::new(&raffle, &recipients, 1_000);
        payout.transfer(&winner_key, 300).unwrap();

        assert_eq!(raffle.lamports(), 1_000);
        assert_eq!(recipients[0].lamports(), 350);
    }

    #[test]
    fn refuses_to_touch_reserve() {
        let program_id = Pubkey::new_unique();
        let system = Pubkey::default();
        let (raffle_key, winner_key) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut raffle_lamports, mut winner_lamports) = (1_200u64, 0u64);
        let (mut raffle_data, mut winner_data) = ([0u8; 4], [0u8; 0]);

        let raffle = account(
            &raffle_key,
            &program_id,
            &mut raffle_lamports,
            &mut raffle_data,
            true,
        );
        let recipients = [account(
            &winner_key,
            &system,
            &mut winner_lamports,
            &mut winner_data,
            true,
        )];

        let mut payout = LamportPayout::new(&raffle, &recipients, 1_000);
        assert_eq!(
            payout.transfer(&winner_key, 300),
            Err(PayoutError::InsufficientFunds)
        );
        assert_eq!(raffle.lamports(), 1_200);
        assert_eq!(recipients[0].lamports(), 0);
    }

    #[test]
    fn missing_or_readonly_recipient_fails() {
        let program_id = Pubkey::new_unique();
        let system = Pubkey::default();
        let (raffle_key, other_key) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut raffle_lamports, mut other_lamports) = (5_000u64, 0u64);
        let (mut raffle_data, mut other_data) = ([0u8; 4], [0u8; 0]);

        let raffle = account(
            &raffle_key,
            &program_id,
            &mut raffle_lamports,
            &mut raffle_data,
            true,
        );
        let recipients = [account(
            &other_key,
            &system,
            &mut other_lamports,
            &mut other_data,
            false,
        )];

        let mut payout = LamportPayout::new(&raffle, &recipients, 0);
        assert_eq!(
            payout.transfer(&Pubkey::new_unique(), 10),
            Err(PayoutError::RecipientNotProvided)
        );
        assert_eq!(
            payout.transfer(&other_key, 10),
            Err(PayoutError::RecipientNotWritable)
        );
        assert_eq!(raffle.lamports(), 5_000);
    }
}
