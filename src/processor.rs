use borsh::BorshDeserialize;
use num_traits::FromPrimitive;
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, msg, pubkey::Pubkey,
};

use crate::error::IcoError;
use crate::instruction::ProgramInstruction;

pub mod access_resource;
pub mod buy;
pub mod initialize;
pub mod register_resource;
pub mod sell;
pub mod withdraw_from_escrow;

pub struct Processor {}

impl Processor {
    pub fn process_instruction(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        msg!("Beginning processing");
        let (tag, instruction_data) = instruction_data
            .split_first()
            .ok_or(IcoError::InvalidInstruction)?;
        let instruction =
            FromPrimitive::from_u8(*tag).ok_or(IcoError::InvalidInstruction)?;
        msg!("Instruction unpacked");

        match instruction {
            ProgramInstruction::Initialize => {
                msg!("Instruction: Initialize");
                let params = parse_params::<initialize::Params>(instruction_data)?;
                initialize::process_initialize(program_id, accounts, params)?;
            }
            ProgramInstruction::Buy => {
                msg!("Instruction: Buy");
                let params = parse_params::<buy::Params>(instruction_data)?;
                buy::process_buy(program_id, accounts, params)?;
            }
            ProgramInstruction::Sell => {
                msg!("Instruction: Sell");
                let params = parse_params::<sell::Params>(instruction_data)?;
                sell::process_sell(program_id, accounts, params)?;
            }
            ProgramInstruction::WithdrawFromEscrow => {
                msg!("Instruction: Withdraw from escrow");
                let params = parse_params::<withdraw_from_escrow::Params>(instruction_data)?;
                withdraw_from_escrow::process_withdraw_from_escrow(program_id, accounts, params)?;
            }
            ProgramInstruction::RegisterResource => {
                msg!("Instruction: Register resource");
                let params = parse_params::<register_resource::Params>(instruction_data)?;
                register_resource::process_register_resource(program_id, accounts, params)?;
            }
            ProgramInstruction::AccessResource => {
                msg!("Instruction: Access resource");
                let params = parse_params::<access_resource::Params>(instruction_data)?;
                access_resource::process_access_resource(program_id, accounts, params)?;
            }
        }

        Ok(())
    }
}

fn parse_params<P: BorshDeserialize>(data: &[u8]) -> Result<P, IcoError> {
    P::try_from_slice(data).map_err(|_| IcoError::InvalidInstruction)
}
