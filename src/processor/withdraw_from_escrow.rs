//! Allows the sale owner to withdraw the sale proceeds
use bonfida_utils::{BorshSize, InstructionsAccount};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    rent::Rent,
    sysvar::Sysvar,
};

use crate::error::IcoError;
use crate::escrow;
use crate::utils::{check_account_key, check_escrow, check_signer, load_sale_state};

#[derive(BorshDeserialize, BorshSerialize, BorshSize)]
/// The required parameters for the `withdraw_from_escrow` instruction
pub struct Params {
    /// Lamports to withdraw
    pub amount: u64,
}

#[derive(InstructionsAccount)]
/// The required accounts for the `withdraw_from_escrow` instruction
pub struct Accounts<'a, T> {
    /// The sale state account
    pub sale_state: &'a T,

    /// The sale owner
    #[cons(writable, signer)]
    pub owner: &'a T,

    /// The escrow account
    #[cons(writable)]
    pub escrow: &'a T,
}

impl<'a, 'b: 'a> Accounts<'a, AccountInfo<'b>> {
    pub fn parse(accounts: &'a [AccountInfo<'b>]) -> Result<Self, ProgramError> {
        let accounts_iter = &mut accounts.iter();
        let accounts = Accounts {
            sale_state: next_account_info(accounts_iter)?,
            owner: next_account_info(accounts_iter)?,
            escrow: next_account_info(accounts_iter)?,
        };

        // Check signer
        check_signer(accounts.owner, IcoError::SignerRequired)?;

        Ok(accounts)
    }
}

pub fn process_withdraw_from_escrow(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    params: Params,
) -> ProgramResult {
    let accounts = Accounts::parse(accounts)?;
    let Params { amount } = params;

    if amount == 0 {
        msg!("Cannot withdraw zero lamports");
        return Err(IcoError::InvalidInstruction.into());
    }

    let state = load_sale_state(program_id, accounts.sale_state)?;
    check_escrow(program_id, accounts.escrow, &state)?;
    check_account_key(accounts.owner, &state.owner, IcoError::InvalidAccountOwner)?;

    let rent = Rent::get()?;
    escrow::assert_can_pay(accounts.escrow, &rent, amount, IcoError::InsufficientFunds)?;

    msg!("Withdrawing {} lamports from escrow", amount);
    escrow::debit(accounts.escrow, accounts.owner, amount)?;

    Ok(())
}
