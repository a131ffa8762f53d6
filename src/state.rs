use crate::error::IcoError;
use bonfida_utils::BorshSize;
use borsh::{BorshDeserialize, BorshSerialize};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use solana_program::account_info::AccountInfo;
use solana_program::entrypoint::ProgramResult;
use solana_program::program_error::ProgramError;
use solana_program::pubkey::Pubkey;

/// Resource identifiers are used verbatim as an address seed
pub const MAX_RESOURCE_ID_LEN: usize = 32;

/// Offset of the record tag, which doubles as the initialization marker
pub const TAG_OFFSET: usize = 0;

#[derive(BorshSerialize, BorshDeserialize, FromPrimitive, PartialEq, Eq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    Uninitialized,
    SaleState,
    ResourceRecord,
}

impl BorshSize for Tag {
    fn borsh_len(&self) -> usize {
        1
    }
}

impl Tag {
    /// Reads the tag of a record without deserializing the rest of it
    pub fn peek(data: &[u8]) -> Option<Tag> {
        data.get(TAG_OFFSET).and_then(|t| Tag::from_u8(*t))
    }
}

/// What happens when a caller offers more than the access fee
#[derive(BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum OverpaymentPolicy {
    /// The offer must equal the fee
    Reject,
    /// Only the fee is charged, the excess stays with the caller
    Refund,
    /// The full offer is paid to the server
    Tip,
}

impl BorshSize for OverpaymentPolicy {
    fn borsh_len(&self) -> usize {
        1
    }
}

impl OverpaymentPolicy {
    /// Lamports to charge for an offer, given the current fee
    pub fn charge(&self, access_fee: u64, amount_offered: u64) -> Result<u64, IcoError> {
        if amount_offered < access_fee {
            return Err(IcoError::InsufficientFunds);
        }
        match self {
            OverpaymentPolicy::Reject if amount_offered > access_fee => {
                Err(IcoError::OverpaymentRejected)
            }
            OverpaymentPolicy::Reject | OverpaymentPolicy::Refund => Ok(access_fee),
            OverpaymentPolicy::Tip => Ok(amount_offered),
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, BorshSize, Debug, PartialEq, Eq, Clone)]
pub struct SaleState {
    // Tag
    pub tag: Tag,

    // Owner of the sale, the only account allowed to withdraw from escrow
    pub owner: Pubkey,

    // Mint of the units sold, its mint authority is this account
    pub mint: Pubkey,

    // Ceiling on units outstanding, fixed at creation
    pub total_supply: u64,

    // Units currently outstanding from this sale
    pub units_sold: u64,

    // Price of the first tier in lamports
    pub base_price: u64,

    // Number of units per price tier
    pub scaling_factor: u64,

    // Escrow holding the sale proceeds
    pub escrow: Pubkey,

    // Sale state nonce
    pub nonce: u8,

    // Escrow nonce
    pub escrow_nonce: u8,
}

impl SaleState {
    pub const SEED: &'static str = "ico_state";

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner: Pubkey,
        mint: Pubkey,
        total_supply: u64,
        base_price: u64,
        scaling_factor: u64,
        escrow: Pubkey,
        nonce: u8,
        escrow_nonce: u8,
    ) -> Self {
        Self {
            tag: Tag::SaleState,
            owner,
            mint,
            total_supply,
            units_sold: 0,
            base_price,
            scaling_factor,
            escrow,
            nonce,
            escrow_nonce,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.tag == Tag::SaleState
    }

    pub fn save(&self, mut dst: &mut [u8]) -> ProgramResult {
        self.serialize(&mut dst)
            .map_err(|_| ProgramError::AccountDataTooSmall)
    }

    pub fn from_account_info(a: &AccountInfo) -> Result<SaleState, ProgramError> {
        let mut data = &a.data.borrow() as &[u8];
        if Tag::peek(data) != Some(Tag::SaleState) {
            return Err(IcoError::InvalidStateAccount.into());
        }
        let result = SaleState::deserialize(&mut data)
            .map_err(|_| IcoError::InvalidStateAccount)?;
        Ok(result)
    }

    /// Records `units` more outstanding, bounded by the total supply
    pub fn record_mint(&mut self, units: u64) -> ProgramResult {
        let units_sold = self
            .units_sold
            .checked_add(units)
            .ok_or(IcoError::CalculationOverflow)?;
        if units_sold > self.total_supply {
            return Err(IcoError::CalculationOverflow.into());
        }
        self.units_sold = units_sold;
        Ok(())
    }

    pub fn record_burn(&mut self, units: u64) -> ProgramResult {
        self.units_sold = self
            .units_sold
            .checked_sub(units)
            .ok_or(IcoError::CalculationOverflow)?;
        Ok(())
    }
}

#[derive(BorshSerialize, BorshDeserialize, BorshSize, Debug, PartialEq, Eq, Clone)]
pub struct ResourceRecord {
    // Tag
    pub tag: Tag,

    // Caller chosen identifier, also the address seed
    pub resource_id: String,

    // Receives access payments and is the only account allowed to update the record
    pub server_identity: Pubkey,

    // Current price of one access in lamports
    pub access_fee: u64,

    // Handling of offers above the fee
    pub overpayment_policy: OverpaymentPolicy,

    // Resource record nonce
    pub nonce: u8,
}

impl ResourceRecord {
    pub const SEED: &'static str = "resource_state";

    pub fn new(
        resource_id: String,
        server_identity: Pubkey,
        access_fee: u64,
        overpayment_policy: OverpaymentPolicy,
        nonce: u8,
    ) -> Self {
        Self {
            tag: Tag::ResourceRecord,
            resource_id,
            server_identity,
            access_fee,
            overpayment_policy,
            nonce,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.tag == Tag::ResourceRecord
    }

    pub fn save(&self, mut dst: &mut [u8]) -> ProgramResult {
        self.serialize(&mut dst)
            .map_err(|_| ProgramError::AccountDataTooSmall)
    }

    pub fn from_account_info(a: &AccountInfo) -> Result<ResourceRecord, ProgramError> {
        let mut data = &a.data.borrow() as &[u8];
        if Tag::peek(data) != Some(Tag::ResourceRecord) {
            return Err(IcoError::InvalidResource.into());
        }
        let result = ResourceRecord::deserialize(&mut data)
            .map_err(|_| IcoError::InvalidResource)?;
        Ok(result)
    }
}

pub struct Escrow {}

impl Escrow {
    pub const SEED: &'static str = "escrow_account";
}
