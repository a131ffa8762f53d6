use crate::error::IcoError;
use crate::pda::create_address;
use crate::state::{Escrow, SaleState};
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, program_error::ProgramError,
    program_option::COption, program_pack::Pack, pubkey::Pubkey, system_program,
};
use spl_token::state::{Account, Mint};

pub fn check_account_key(account: &AccountInfo, key: &Pubkey, error: IcoError) -> ProgramResult {
    if account.key != key {
        return Err(error.into());
    }
    Ok(())
}

pub fn check_account_owner(
    account: &AccountInfo,
    owner: &Pubkey,
    error: IcoError,
) -> ProgramResult {
    if account.owner != owner {
        return Err(error.into());
    }
    Ok(())
}

pub fn check_signer(account: &AccountInfo, error: IcoError) -> ProgramResult {
    if !(account.is_signer) {
        return Err(error.into());
    }
    Ok(())
}

/// Loads a sale state and checks that it lives at the address derived from its owner
pub fn load_sale_state(program_id: &Pubkey, account: &AccountInfo) -> Result<SaleState, ProgramError> {
    if account.owner != program_id {
        if account.owner == &system_program::ID && account.data_is_empty() {
            msg!("No sale state at {}", account.key);
            return Err(IcoError::NotInitialized.into());
        }
        return Err(IcoError::InvalidAccountOwner.into());
    }

    let state = SaleState::from_account_info(account)?;
    let derived = create_address(
        SaleState::SEED,
        &state.owner.to_bytes(),
        state.nonce,
        program_id,
    )
    .ok_or(IcoError::InvalidStateAccount)?;
    check_account_key(account, &derived, IcoError::InvalidStateAccount)?;

    Ok(state)
}

/// Checks that `escrow` is the escrow derived for the sale owner and recorded in the sale
pub fn check_escrow(program_id: &Pubkey, escrow: &AccountInfo, state: &SaleState) -> ProgramResult {
    let derived = create_address(
        Escrow::SEED,
        &state.owner.to_bytes(),
        state.escrow_nonce,
        program_id,
    )
    .ok_or(IcoError::InvalidEscrowAccount)?;
    check_account_key(escrow, &derived, IcoError::InvalidEscrowAccount)?;
    check_account_key(escrow, &state.escrow, IcoError::EscrowMismatch)?;
    check_account_owner(escrow, program_id, IcoError::InvalidAccountOwner)?;
    Ok(())
}

/// Unpacks a token account holding units of `mint`
pub fn check_token_account(account: &AccountInfo, mint: &Pubkey) -> Result<Account, ProgramError> {
    check_account_owner(account, &spl_token::ID, IcoError::InvalidAccountOwner)?;
    let token_account =
        Account::unpack(&account.data.borrow()).map_err(|_| IcoError::InvalidAccountOwner)?;
    if &token_account.mint != mint {
        msg!("Token account holds {} instead of {}", token_account.mint, mint);
        return Err(IcoError::InvalidTokenMint.into());
    }
    Ok(token_account)
}

/// The sale mint must be an empty SPL mint only the sale state can mint from or freeze
pub fn check_sale_mint(account: &AccountInfo, sale_state: &Pubkey) -> ProgramResult {
    check_account_owner(account, &spl_token::ID, IcoError::InvalidTokenMint)?;
    let mint = Mint::unpack(&account.data.borrow()).map_err(|_| IcoError::InvalidTokenMint)?;
    if mint.mint_authority != COption::Some(*sale_state) {
        msg!("The mint authority must be the sale state {}", sale_state);
        return Err(IcoError::InvalidTokenMint.into());
    }
    if mint.supply != 0 {
        msg!("The mint already has {} units in circulation", mint.supply);
        return Err(IcoError::InvalidTokenMint.into());
    }
    match mint.freeze_authority {
        COption::None => {}
        COption::Some(authority) if &authority == sale_state => {}
        COption::Some(authority) => {
            msg!("The mint can be frozen by {}", authority);
            return Err(IcoError::InvalidTokenMint.into());
        }
    }
    Ok(())
}
