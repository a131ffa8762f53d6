//! Buy units at the current tier price
use bonfida_utils::{BorshSize, InstructionsAccount};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

use crate::cpi::Cpi;
use crate::curve::quote_buy;
use crate::error::IcoError;
use crate::escrow;
use crate::state::SaleState;
use crate::utils::{
    check_account_key, check_escrow, check_signer, check_token_account, load_sale_state,
};

#[derive(BorshDeserialize, BorshSerialize, BorshSize)]
/// The required parameters for the `buy` instruction
pub struct Params {
    /// Lamports moved to the escrow
    pub lamports_in: u64,
}

#[derive(InstructionsAccount)]
/// The required accounts for the `buy` instruction
pub struct Accounts<'a, T> {
    /// The sale state account
    #[cons(writable)]
    pub sale_state: &'a T,

    /// The buyer
    #[cons(writable, signer)]
    pub buyer: &'a T,

    /// The escrow account
    #[cons(writable)]
    pub escrow: &'a T,

    /// The mint of the units sold
    #[cons(writable)]
    pub mint: &'a T,

    /// The token account receiving the units
    #[cons(writable)]
    pub buyer_token: &'a T,

    /// The system program account
    pub system_program: &'a T,

    /// The SPL token program account
    pub spl_token_program: &'a T,
}

impl<'a, 'b: 'a> Accounts<'a, AccountInfo<'b>> {
    pub fn parse(accounts: &'a [AccountInfo<'b>]) -> Result<Self, ProgramError> {
        let accounts_iter = &mut accounts.iter();
        let accounts = Accounts {
            sale_state: next_account_info(accounts_iter)?,
            buyer: next_account_info(accounts_iter)?,
            escrow: next_account_info(accounts_iter)?,
            mint: next_account_info(accounts_iter)?,
            buyer_token: next_account_info(accounts_iter)?,
            system_program: next_account_info(accounts_iter)?,
            spl_token_program: next_account_info(accounts_iter)?,
        };

        // Check keys
        check_account_key(
            accounts.system_program,
            &system_program::ID,
            IcoError::WrongSystemProgram,
        )?;
        check_account_key(
            accounts.spl_token_program,
            &spl_token::ID,
            IcoError::WrongSplTokenProgramId,
        )?;

        // Check signer
        check_signer(accounts.buyer, IcoError::SignerRequired)?;

        Ok(accounts)
    }
}

pub fn process_buy(program_id: &Pubkey, accounts: &[AccountInfo], params: Params) -> ProgramResult {
    let accounts = Accounts::parse(accounts)?;
    let Params { lamports_in } = params;

    let mut state = load_sale_state(program_id, accounts.sale_state)?;
    check_escrow(program_id, accounts.escrow, &state)?;
    check_account_key(accounts.mint, &state.mint, IcoError::InvalidTokenMint)?;
    check_token_account(accounts.buyer_token, &state.mint)?;

    if accounts.buyer.lamports() < lamports_in {
        msg!("The buyer holds less than {} lamports", lamports_in);
        return Err(IcoError::InsufficientFunds.into());
    }

    let quote = quote_buy(
        state.units_sold,
        state.base_price,
        state.scaling_factor,
        lamports_in,
    )?;
    if quote.units == 0 {
        msg!(
            "{} lamports do not cover one unit at {}",
            lamports_in,
            quote.unit_price
        );
        return Err(IcoError::InsufficientFunds.into());
    }

    // Rejects the whole purchase when it would exceed the total supply
    state.record_mint(quote.units)?;

    msg!(
        "Buying {} units at {} lamports per unit",
        quote.units,
        quote.unit_price
    );

    escrow::credit(
        accounts.system_program,
        accounts.buyer,
        accounts.escrow,
        lamports_in,
    )?;
    Cpi::mint_to(
        accounts.spl_token_program,
        accounts.mint,
        accounts.buyer_token,
        accounts.sale_state,
        &[
            SaleState::SEED.as_bytes(),
            &state.owner.to_bytes(),
            &[state.nonce],
        ],
        quote.units,
    )?;

    state.save(&mut accounts.sale_state.data.borrow_mut())?;

    Ok(())
}
