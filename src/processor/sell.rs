//! Sell units back to the escrow
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

use crate::cpi::Cpi;
use crate::curve::quote_sell;
use crate::error::IcoError;
use crate::escrow;
use crate::utils::{
    check_account_key, check_escrow, check_signer, check_token_account, load_sale_state,
};

#[derive(BorshDeserialize, BorshSerialize, BorshSize)]
/// The required parameters for the `sell` instruction
pub struct Params {
    /// Units burnt from the seller
    pub units_in: u64,
}

#[derive(InstructionsAccount)]
/// The required accounts for the `sell` instruction
pub struct Accounts<'a, T> {
    /// The sale state account
    #[cons(writable)]
    pub sale_state: &'a T,

    /// The seller
    #[cons(writable, signer)]
    pub seller: &'a T,

    /// The escrow account
    #[cons(writable)]
    pub escrow: &'a T,

    /// The mint of the units sold
    #[cons(writable)]
    pub mint: &'a T,

    /// The token account the units are burnt from
    #[cons(writable)]
    pub seller_token: &'a T,

    /// The SPL token program account
    pub spl_token_program: &'a T,
}

impl<'a, 'b: 'a> Accounts<'a, AccountInfo<'b>> {
    pub fn parse(accounts: &'a [AccountInfo<'b>]) -> Result<Self, ProgramError> {
        let accounts_iter = &mut accounts.iter();
        let accounts = Accounts {
            sale_state: next_account_info(accounts_iter)?,
            seller: next_account_info(accounts_iter)?,
            escrow: next_account_info(accounts_iter)?,
            mint: next_account_info(accounts_iter)?,
            seller_token: next_account_info(accounts_iter)?,
            spl_token_program: next_account_info(accounts_iter)?,
        };

        // Check keys
        check_account_key(
            accounts.spl_token_program,
            &spl_token::ID,
            IcoError::WrongSplTokenProgramId,
        )?;

        // Check signer
        check_signer(accounts.seller, IcoError::SignerRequired)?;

        Ok(accounts)
    }
}

pub fn process_sell(program_id: &Pubkey, accounts: &[AccountInfo], params: Params) -> ProgramResult {
    let accounts = Accounts::parse(accounts)?;
    let Params { units_in } = params;

    if units_in == 0 {
        msg!("Cannot sell zero units");
        return Err(IcoError::InvalidInstruction.into());
    }

    let mut state = load_sale_state(program_id, accounts.sale_state)?;
    check_escrow(program_id, accounts.escrow, &state)?;
    check_account_key(accounts.mint, &state.mint, IcoError::InvalidTokenMint)?;

    let token_account = check_token_account(accounts.seller_token, &state.mint)?;
    if &token_account.owner != accounts.seller.key {
        return Err(IcoError::InvalidAccountOwner.into());
    }
    if token_account.amount < units_in {
        msg!(
            "The seller holds {} units, cannot sell {}",
            token_account.amount,
            units_in
        );
        return Err(IcoError::InsufficientFunds.into());
    }

    let quote = quote_sell(
        state.units_sold,
        state.base_price,
        state.scaling_factor,
        units_in,
    )?;

    let rent = Rent::get()?;
    escrow::assert_can_pay(accounts.escrow, &rent, quote.lamports, IcoError::EscrowMismatch)?;

    state.record_burn(units_in)?;

    msg!(
        "Selling {} units at {} lamports per unit",
        units_in,
        quote.unit_price
    );

    Cpi::burn(
        accounts.spl_token_program,
        accounts.seller_token,
        accounts.mint,
        accounts.seller,
        units_in,
    )?;
    escrow::debit(accounts.escrow, accounts.seller, quote.lamports)?;

    state.save(&mut accounts.sale_state.data.borrow_mut())?;

    Ok(())
}
