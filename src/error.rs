use num_derive::FromPrimitive;
use thiserror::Error;

use solana_program::{decode_error::DecodeError, program_error::ProgramError};

/// Error kinds returned by the program, with stable numeric codes.
/// Variants must only ever be appended.
#[derive(Clone, Copy, Debug, Error, FromPrimitive, PartialEq, Eq)]
pub enum IcoError {
    #[error("This account is already initialized")]
    AlreadyInitialized,
    #[error("This account is not initialized")]
    NotInitialized,
    #[error("Unrecognized instruction or malformed payload")]
    InvalidInstruction,
    #[error("Wrong account owner")]
    InvalidAccountOwner,
    #[error("State account not generated deterministically")]
    InvalidStateAccount,
    #[error("Escrow account not generated deterministically")]
    InvalidEscrowAccount,
    #[error("Escrow account does not match the sale state")]
    EscrowMismatch,
    #[error("Wrong token mint")]
    InvalidTokenMint,
    #[error("Resource not found")]
    InvalidResource,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Calculation overflow")]
    CalculationOverflow,
    #[error("No valid bump seed found for the address")]
    AddressDerivationExhausted,
    #[error("A required signature is missing")]
    SignerRequired,
    #[error("Wrong system program key")]
    WrongSystemProgram,
    #[error("Wrong SPL token program ID")]
    WrongSplTokenProgramId,
    #[error("Wrong rent sysvar key")]
    WrongRent,
    #[error("The resource does not accept overpayment")]
    OverpaymentRejected,
}

impl From<IcoError> for ProgramError {
    fn from(e: IcoError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for IcoError {
    fn type_of() -> &'static str {
        "IcoError"
    }
}
