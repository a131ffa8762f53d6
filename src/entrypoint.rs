use crate::error::IcoError;
use crate::processor::Processor;
use num_traits::FromPrimitive;
use solana_program::{
    account_info::AccountInfo, decode_error::DecodeError, entrypoint::ProgramResult, msg,
    program_error::PrintProgramError, pubkey::Pubkey,
};

#[cfg(not(feature = "no-entrypoint"))]
use solana_program::entrypoint;
#[cfg(not(feature = "no-entrypoint"))]
entrypoint!(process_instruction);

/// The entrypoint to the program
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    msg!("Entrypoint");
    if let Err(error) = Processor::process_instruction(program_id, accounts, instruction_data) {
        // catch the error so we can print it
        error.print::<IcoError>();
        return Err(error);
    }
    Ok(())
}

impl PrintProgramError for IcoError {
    fn print<E>(&self)
    where
        E: 'static + std::error::Error + DecodeError<E> + PrintProgramError + FromPrimitive,
    {
        match self {
            IcoError::AlreadyInitialized => {
                msg!("Error: This account is already initialized")
            }
            IcoError::NotInitialized => {
                msg!("Error: This account is not initialized")
            }
            IcoError::InvalidInstruction => {
                msg!("Error: Unrecognized instruction or malformed payload")
            }
            IcoError::InvalidAccountOwner => {
                msg!("Error: Wrong account owner")
            }
            IcoError::InvalidStateAccount => {
                msg!("Error: State account not generated deterministically")
            }
            IcoError::InvalidEscrowAccount => {
                msg!("Error: Escrow account not generated deterministically")
            }
            IcoError::EscrowMismatch => {
                msg!("Error: Escrow account does not match the sale state")
            }
            IcoError::InvalidTokenMint => {
                msg!("Error: Wrong token mint")
            }
            IcoError::InvalidResource => {
                msg!("Error: Resource not found")
            }
            IcoError::InsufficientFunds => {
                msg!("Error: Insufficient funds")
            }
            IcoError::CalculationOverflow => {
                msg!("Error: Calculation overflow")
            }
            IcoError::AddressDerivationExhausted => {
                msg!("Error: No valid bump seed found for the address")
            }
            IcoError::SignerRequired => {
                msg!("Error: A required signature is missing")
            }
            IcoError::WrongSystemProgram => {
                msg!("Error: Wrong system program key")
            }
            IcoError::WrongSplTokenProgramId => {
                msg!("Error: Wrong SPL token program ID")
            }
            IcoError::WrongRent => {
                msg!("Error: Wrong rent sysvar key")
            }
            IcoError::OverpaymentRejected => {
                msg!("Error: The resource does not accept overpayment")
            }
        }
    }
}
