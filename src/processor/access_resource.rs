//! Pay the access fee of a resource to its server
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
use crate::error::IcoError;
use crate::pda::find_resource_address;
use crate::state::ResourceRecord;
use crate::utils::{check_account_key, check_account_owner, check_signer};

#[derive(BorshDeserialize, BorshSerialize, BorshSize)]
/// The required parameters for the `access_resource` instruction
pub struct Params {
    /// Identifier of the resource
    pub resource_id: String,
    /// Lamports the user is willing to pay
    pub amount_offered: u64,
}

#[derive(InstructionsAccount)]
/// The required accounts for the `access_resource` instruction
pub struct Accounts<'a, T> {
    /// The resource record
    pub resource_state: &'a T,

    /// The user paying for access
    #[cons(writable, signer)]
    pub user: &'a T,

    /// The server receiving the payment
    #[cons(writable)]
    pub server: &'a T,

    /// The system program account
    pub system_program: &'a T,
}

impl<'a, 'b: 'a> Accounts<'a, AccountInfo<'b>> {
    pub fn parse(accounts: &'a [AccountInfo<'b>]) -> Result<Self, ProgramError> {
        let accounts_iter = &mut accounts.iter();
        let accounts = Accounts {
            resource_state: next_account_info(accounts_iter)?,
            user: next_account_info(accounts_iter)?,
            server: next_account_info(accounts_iter)?,
            system_program: next_account_info(accounts_iter)?,
        };

        // Check keys
        check_account_key(
            accounts.system_program,
            &system_program::ID,
            IcoError::WrongSystemProgram,
        )?;

        // Check signer
        check_signer(accounts.user, IcoError::SignerRequired)?;

        Ok(accounts)
    }
}

pub fn process_access_resource(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    params: Params,
) -> ProgramResult {
    let accounts = Accounts::parse(accounts)?;
    let Params {
        resource_id,
        amount_offered,
    } = params;

    let (derived_key, _) = find_resource_address(&resource_id, program_id)?;
    check_account_key(
        accounts.resource_state,
        &derived_key,
        IcoError::InvalidStateAccount,
    )?;
    check_account_owner(accounts.resource_state, program_id, IcoError::InvalidResource)?;

    let record = ResourceRecord::from_account_info(accounts.resource_state)?;
    check_account_key(
        accounts.server,
        &record.server_identity,
        IcoError::InvalidAccountOwner,
    )?;

    let charge = record
        .overpayment_policy
        .charge(record.access_fee, amount_offered)?;
    if accounts.user.lamports() < charge {
        msg!("The user holds less than {} lamports", charge);
        return Err(IcoError::InsufficientFunds.into());
    }

    msg!(
        "Paying {} lamports for {} (fee {})",
        charge,
        resource_id,
        record.access_fee
    );
    Cpi::transfer_lamports(
        accounts.system_program,
        accounts.user,
        accounts.server,
        charge,
    )?;

    Ok(())
}
