use bonfida_utils::InstructionsAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use num_derive::FromPrimitive;
use solana_program::{instruction::Instruction, pubkey::Pubkey};

pub use crate::processor::{
    access_resource, buy, initialize, register_resource, sell, withdraw_from_escrow,
};

/// The first byte of the instruction data
#[derive(BorshDeserialize, BorshSerialize, FromPrimitive, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramInstruction {
    /// Create the sale state and its escrow
    ///
    /// | Index | Writable | Signer | Description                        |
    /// | ------------------------------------------------------------------ |
    /// | 0     | ✅        | ❌      | The sale state account             |
    /// | 1     | ✅        | ✅      | The sale owner, pays for the accounts |
    /// | 2     | ✅        | ❌      | The escrow account                 |
    /// | 3     | ❌        | ❌      | The mint of the units sold         |
    /// | 4     | ❌        | ❌      | The system program account         |
    /// | 5     | ❌        | ❌      | The rent sysvar account            |
    Initialize,
    /// Buy units at the current tier price
    ///
    /// | Index | Writable | Signer | Description                    |
    /// | -------------------------------------------------------------- |
    /// | 0     | ✅        | ❌      | The sale state account         |
    /// | 1     | ✅        | ✅      | The buyer                      |
    /// | 2     | ✅        | ❌      | The escrow account             |
    /// | 3     | ✅        | ❌      | The mint of the units sold     |
    /// | 4     | ✅        | ❌      | The token account of the buyer |
    /// | 5     | ❌        | ❌      | The system program account     |
    /// | 6     | ❌        | ❌      | The SPL token program account  |
    Buy,
    /// Sell units back to the escrow
    ///
    /// | Index | Writable | Signer | Description                     |
    /// | --------------------------------------------------------------- |
    /// | 0     | ✅        | ❌      | The sale state account          |
    /// | 1     | ✅        | ✅      | The seller                      |
    /// | 2     | ✅        | ❌      | The escrow account              |
    /// | 3     | ✅        | ❌      | The mint of the units sold      |
    /// | 4     | ✅        | ❌      | The token account of the seller |
    /// | 5     | ❌        | ❌      | The SPL token program account   |
    Sell,
    /// Withdraw sale proceeds
    ///
    /// | Index | Writable | Signer | Description            |
    /// | ------------------------------------------------------ |
    /// | 0     | ❌        | ❌      | The sale state account |
    /// | 1     | ✅        | ✅      | The sale owner         |
    /// | 2     | ✅        | ❌      | The escrow account     |
    WithdrawFromEscrow,
    /// Create or update a resource record
    ///
    /// | Index | Writable | Signer | Description                |
    /// | ---------------------------------------------------------- |
    /// | 0     | ✅        | ❌      | The resource record        |
    /// | 1     | ✅        | ✅      | The server                 |
    /// | 2     | ❌        | ❌      | The system program account |
    /// | 3     | ❌        | ❌      | The rent sysvar account    |
    RegisterResource,
    /// Pay the server for one access to a resource
    ///
    /// | Index | Writable | Signer | Description                |
    /// | ---------------------------------------------------------- |
    /// | 0     | ❌        | ❌      | The resource record        |
    /// | 1     | ✅        | ✅      | The user paying            |
    /// | 2     | ✅        | ❌      | The server                 |
    /// | 3     | ❌        | ❌      | The system program account |
    AccessResource,
}

#[allow(missing_docs)]
pub fn initialize(
    program_id: Pubkey,
    accounts: initialize::Accounts<Pubkey>,
    params: initialize::Params,
) -> Instruction {
    accounts.get_instruction(program_id, ProgramInstruction::Initialize as u8, params)
}

#[allow(missing_docs)]
pub fn buy(program_id: Pubkey, accounts: buy::Accounts<Pubkey>, params: buy::Params) -> Instruction {
    accounts.get_instruction(program_id, ProgramInstruction::Buy as u8, params)
}

#[allow(missing_docs)]
pub fn sell(
    program_id: Pubkey,
    accounts: sell::Accounts<Pubkey>,
    params: sell::Params,
) -> Instruction {
    accounts.get_instruction(program_id, ProgramInstruction::Sell as u8, params)
}

#[allow(missing_docs)]
pub fn withdraw_from_escrow(
    program_id: Pubkey,
    accounts: withdraw_from_escrow::Accounts<Pubkey>,
    params: withdraw_from_escrow::Params,
) -> Instruction {
    accounts.get_instruction(
        program_id,
        ProgramInstruction::WithdrawFromEscrow as u8,
        params,
    )
}

#[allow(missing_docs)]
pub fn register_resource(
    program_id: Pubkey,
    accounts: register_resource::Accounts<Pubkey>,
    params: register_resource::Params,
) -> Instruction {
    accounts.get_instruction(
        program_id,
        ProgramInstruction::RegisterResource as u8,
        params,
    )
}

#[allow(missing_docs)]
pub fn access_resource(
    program_id: Pubkey,
    accounts: access_resource::Accounts<Pubkey>,
    params: access_resource::Params,
) -> Instruction {
    accounts.get_instruction(
        program_id,
        ProgramInstruction::AccessResource as u8,
        params,
    )
}
