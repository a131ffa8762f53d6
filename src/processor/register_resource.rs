//! Create a resource record, or update the fee of an existing one
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

use crate::cpi::Cpi;
use crate::error::IcoError;
use crate::pda::find_resource_address;
use crate::state::{OverpaymentPolicy, ResourceRecord};
use crate::utils::{check_account_key, check_account_owner, check_signer};

#[derive(BorshDeserialize, BorshSerialize, BorshSize)]
/// The required parameters for the `register_resource` instruction
pub struct Params {
    /// Identifier of the resource, at most 32 bytes
    pub resource_id: String,
    /// Lamports charged per access
    pub access_fee: u64,
    /// Handling of offers above the fee
    pub overpayment_policy: OverpaymentPolicy,
}

#[derive(InstructionsAccount)]
/// The required accounts for the `register_resource` instruction
pub struct Accounts<'a, T> {
    /// The resource record
    #[cons(writable)]
    pub resource_state: &'a T,

    /// The server serving the resource
    #[cons(writable, signer)]
    pub server: &'a T,

    /// The system program account
    pub system_program: &'a T,

    /// The rent sysvar account
    pub rent_sysvar: &'a T,
}

impl<'a, 'b: 'a> Accounts<'a, AccountInfo<'b>> {
    pub fn parse(accounts: &'a [AccountInfo<'b>]) -> Result<Self, ProgramError> {
        let accounts_iter = &mut accounts.iter();
        let accounts = Accounts {
            resource_state: next_account_info(accounts_iter)?,
            server: next_account_info(accounts_iter)?,
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
        check_signer(accounts.server, IcoError::SignerRequired)?;

        Ok(accounts)
    }
}

pub fn process_register_resource(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    params: Params,
) -> ProgramResult {
    let accounts = Accounts::parse(accounts)?;
    let Params {
        resource_id,
        access_fee,
        overpayment_policy,
    } = params;

    let (derived_key, nonce) = find_resource_address(&resource_id, program_id)?;
    check_account_key(
        accounts.resource_state,
        &derived_key,
        IcoError::InvalidStateAccount,
    )?;

    if accounts.resource_state.data_is_empty() {
        check_account_owner(
            accounts.resource_state,
            &system_program::ID,
            IcoError::InvalidAccountOwner,
        )?;

        let record = ResourceRecord::new(
            resource_id,
            *accounts.server.key,
            access_fee,
            overpayment_policy,
            nonce,
        );

        msg!("+ Creating resource {}", record.resource_id);
        Cpi::create_account(
            program_id,
            accounts.system_program,
            accounts.server,
            accounts.resource_state,
            accounts.rent_sysvar,
            &[
                ResourceRecord::SEED.as_bytes(),
                record.resource_id.as_bytes(),
                &[nonce],
            ],
            record.borsh_len(),
        )?;

        record.save(&mut accounts.resource_state.data.borrow_mut())?;
        return Ok(());
    }

    check_account_owner(
        accounts.resource_state,
        program_id,
        IcoError::InvalidAccountOwner,
    )?;
    let mut record = ResourceRecord::from_account_info(accounts.resource_state)?;
    check_account_key(
        accounts.server,
        &record.server_identity,
        IcoError::InvalidAccountOwner,
    )?;

    msg!(
        "+ Updating resource {} fee from {} to {}",
        record.resource_id,
        record.access_fee,
        access_fee
    );
    record.access_fee = access_fee;
    record.overpayment_policy = overpayment_policy;
    record.save(&mut accounts.resource_state.data.borrow_mut())?;

    Ok(())
}
