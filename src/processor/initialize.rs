//! Create a sale state and its escrow
use bonfida_utils::{BorshSize, InstructionsAccount};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
    sysvar::rent,
};

use crate::pda::{find_escrow_address, find_sale_state_address};
use crate::state::{Escrow, SaleState};
use crate::{cpi::Cpi, error::IcoError};

use crate::utils::{check_account_key, check_sale_mint, check_signer};

#[derive(BorshDeserialize, BorshSerialize, BorshSize)]
/// The required parameters for the `initialize` instruction
pub struct Params {
    // Ceiling on units outstanding
    pub total_supply: u64,
    // Price of the first tier in lamports
    pub base_price: u64,
    // Units per price tier
    pub scaling_factor: u64,
}

#[derive(InstructionsAccount)]
/// The required accounts for the `initialize` instruction
pub struct Accounts<'a, T> {
    /// The sale state account
    #[cons(writable)]
    pub sale_state: &'a T,

    /// The sale owner
    #[cons(writable, signer)]
    pub owner: &'a T,

    /// The escrow account
    #[cons(writable)]
    pub escrow: &'a T,

    /// The mint of the units sold
    pub mint: &'a T,

    /// The system program account
    pub system_program: &'a T,

    /// The rent sysvar account
    pub rent_sysvar: &'a T,
}

impl<'a, 'b: 'a> Accounts<'a, AccountInfo<'b>> {
    pub fn parse(accounts: &'a [AccountInfo<'b>]) -> Result<Self, ProgramError> {
        let accounts_iter = &mut accounts.iter();
        let accounts = Accounts {
            sale_state: next_account_info(accounts_iter)?,
            owner: next_account_info(accounts_iter)?,
            escrow: next_account_info(accounts_iter)?,
            mint: next_account_info(accounts_iter)?,
            system_program: next_account_info(accounts_iter)?,
            rent_sysvar: next_account_info(accounts_iter)?,
        };

        // Check keys
        check_account_key(
            accounts.system_program,
            &system_program::ID,
            IcoError::WrongSystemProgram,
        )?;
        check_account_key(accounts.rent_sysvar, &rent::ID, IcoError::WrongRent)?;

        // Check signer
        check_signer(accounts.owner, IcoError::SignerRequired)?;

        Ok(accounts)
    }
}

pub fn process_initialize(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    params: Params,
) -> ProgramResult {
    let accounts = Accounts::parse(accounts)?;
    let Params {
        total_supply,
        base_price,
        scaling_factor,
    } = params;

    if total_supply == 0 || base_price == 0 || scaling_factor == 0 {
        msg!("Supply, base price and scaling factor must be positive");
        return Err(IcoError::InvalidInstruction.into());
    }

    let (derived_state_key, nonce) = find_sale_state_address(accounts.owner.key, program_id)?;
    let (derived_escrow_key, escrow_nonce) = find_escrow_address(accounts.owner.key, program_id)?;

    check_account_key(
        accounts.sale_state,
        &derived_state_key,
        IcoError::InvalidStateAccount,
    )?;
    check_account_key(
        accounts.escrow,
        &derived_escrow_key,
        IcoError::InvalidEscrowAccount,
    )?;

    if accounts.sale_state.owner != &system_program::ID || !accounts.sale_state.data_is_empty() {
        return Err(IcoError::AlreadyInitialized.into());
    }
    if accounts.escrow.owner != &system_program::ID || !accounts.escrow.data_is_empty() {
        return Err(IcoError::AlreadyInitialized.into());
    }

    check_sale_mint(accounts.mint, &derived_state_key)?;

    let state = SaleState::new(
        *accounts.owner.key,
        *accounts.mint.key,
        total_supply,
        base_price,
        scaling_factor,
        derived_escrow_key,
        nonce,
        escrow_nonce,
    );

    msg!("+ Creating sale state");
    Cpi::create_account(
        program_id,
        accounts.system_program,
        accounts.owner,
        accounts.sale_state,
        accounts.rent_sysvar,
        &[
            SaleState::SEED.as_bytes(),
            &accounts.owner.key.to_bytes(),
            &[nonce],
        ],
        state.borsh_len(),
    )?;

    msg!("+ Creating escrow");
    Cpi::create_account(
        program_id,
        accounts.system_program,
        accounts.owner,
        accounts.escrow,
        accounts.rent_sysvar,
        &[
            Escrow::SEED.as_bytes(),
            &accounts.owner.key.to_bytes(),
            &[escrow_nonce],
        ],
        0,
    )?;

    state.save(&mut accounts.sale_state.data.borrow_mut())?;

    msg!(
        "Sale of {} units starting at {} lamports, {} units per tier",
        total_supply,
        base_price,
        scaling_factor
    );

    Ok(())
}
