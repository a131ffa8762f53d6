use solana_program::declare_id;

pub mod entrypoint;
pub mod error;
pub mod instruction;
pub mod state;

pub mod curve;
pub mod escrow;
pub mod pda;

pub(crate) mod processor;
pub(crate) mod utils;

pub(crate) mod cpi;

declare_id!("CtxSa1eGateProgram1111111111111111111111111");
