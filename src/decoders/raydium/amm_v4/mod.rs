pub mod instructions;

#[cfg(test)]
mod test;

use solana_sdk::{pubkey, pubkey::Pubkey};

pub const RAYDIUM_AMM_V4_PROGRAM_ID: Pubkey =
    pubkey!("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8");
