//! Custodial balance holding the proceeds of a sale.
//!
//! The escrow is a data-less account owned by the program. It always keeps the
//! rent exempt reserve it was created with, everything above the reserve is
//! the escrow balance.
use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, rent::Rent};

use crate::cpi::Cpi;
use crate::error::IcoError;

/// Lamports that never leave the escrow
pub fn reserve(rent: &Rent) -> u64 {
    rent.minimum_balance(0)
}

pub fn balance(escrow: &AccountInfo, rent: &Rent) -> u64 {
    escrow.lamports().saturating_sub(reserve(rent))
}

/// Fails unless the escrow can pay out `amount` and keep its reserve
pub fn assert_can_pay(
    escrow: &AccountInfo,
    rent: &Rent,
    amount: u64,
    error: IcoError,
) -> ProgramResult {
    if balance(escrow, rent) < amount {
        return Err(error.into());
    }
    Ok(())
}

pub fn credit<'a>(
    system_program: &AccountInfo<'a>,
    source: &AccountInfo<'a>,
    escrow: &AccountInfo<'a>,
    amount: u64,
) -> ProgramResult {
    Cpi::transfer_lamports(system_program, source, escrow, amount)
}

/// Moves `amount` lamports out of the escrow. Callers check the balance first.
pub fn debit(escrow: &AccountInfo, destination: &AccountInfo, amount: u64) -> ProgramResult {
    let mut escrow_lamports = escrow.lamports.borrow_mut();
    let mut destination_lamports = destination.lamports.borrow_mut();

    let escrow_after = escrow_lamports
        .checked_sub(amount)
        .ok_or(IcoError::InsufficientFunds)?;
    let destination_after = destination_lamports
        .checked_add(amount)
        .ok_or(IcoError::CalculationOverflow)?;

    **escrow_lamports = escrow_after;
    **destination_lamports = destination_after;

    Ok(())
}
