//! Address derivation for every record the program owns.
//!
//! An address is derived from a namespace seed, a binding key and a one byte
//! bump. The search walks bumps from 255 down and gives up once all 256 have
//! been tried.
use solana_program::pubkey::Pubkey;

use crate::error::IcoError;
use crate::state::{Escrow, ResourceRecord, SaleState, MAX_RESOURCE_ID_LEN};

/// Finds the canonical address and bump for `seed` bound to `key`
pub fn find_address(seed: &str, key: &[u8], program_id: &Pubkey) -> Result<(Pubkey, u8), IcoError> {
    Pubkey::try_find_program_address(&[seed.as_bytes(), key], program_id)
        .ok_or(IcoError::AddressDerivationExhausted)
}

/// Recomputes an address from a known bump, `None` if the bump is not valid
pub fn create_address(seed: &str, key: &[u8], nonce: u8, program_id: &Pubkey) -> Option<Pubkey> {
    Pubkey::create_program_address(&[seed.as_bytes(), key, &[nonce]], program_id).ok()
}

pub fn find_sale_state_address(owner: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8), IcoError> {
    find_address(SaleState::SEED, &owner.to_bytes(), program_id)
}

pub fn find_escrow_address(owner: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8), IcoError> {
    find_address(Escrow::SEED, &owner.to_bytes(), program_id)
}

pub fn find_resource_address(
    resource_id: &str,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), IcoError> {
    if resource_id.is_empty() || resource_id.len() > MAX_RESOURCE_ID_LEN {
        return Err(IcoError::InvalidInstruction);
    }
    find_address(ResourceRecord::SEED, resource_id.as_bytes(), program_id)
}
