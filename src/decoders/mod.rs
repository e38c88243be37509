// src/decoders/mod.rs

pub mod raydium;

pub use raydium::amm_v4::instructions::{DecodeError, FixedSide, LiquidityInstruction};
