//! # CP-AMM: Constant-Product Liquidity Pools
//!
//! A permissionless decentralized exchange on Solana built from
//! `x * y = k` pools.
//!
//! ## Overview
//!
//! Anyone can open a pool for a pair of SPL assets at a fee tier, deposit
//! both assets for LP shares, and swap one asset for the other. Every pool
//! owns two reserve vaults and an LP mint, all controlled by a per-pool
//! signing PDA.
//!
//! ## How it works
//! - `amm` holds the pure curve and share math. It never touches accounts.
//! - `instructions` read live balances, ask `amm` for a checked quote, then
//!   move tokens through the token program.
//! - `Config` decides where the protocol fee on swaps ends up.
//!

use anchor_lang::prelude::*;

pub mod address;
pub mod amm;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod validation;

pub use amm::*;
pub use instructions::*;
pub use state::*;

declare_id!("9fnAYnT9SSXvbRReoLPvg3RCfiCJkPLz8sZfiswXERJ4");

/// Main CP-AMM program
#[program]
pub mod cp_amm {
    use super::*;

    /// Create the global configuration (admin, once)
    pub fn initialize(
        ctx: Context<Initialize>,
        protocol_fee_mode: ProtocolFeeMode,
        treasury: Pubkey,
    ) -> Result<()> {
        ctx.accounts.initialize(protocol_fee_mode, treasury, &ctx.bumps)
    }

    /// Change where swap protocol fees go (admin only)
    pub fn set_protocol_fee_mode(
        ctx: Context<SetProtocolFeeMode>,
        protocol_fee_mode: ProtocolFeeMode,
        treasury: Pubkey,
    ) -> Result<()> {
        ctx.accounts.set_protocol_fee_mode(protocol_fee_mode, treasury)
    }

    /// Create a pool with its vaults and LP mint (permissionless)
    pub fn create_pool(ctx: Context<CreatePool>, fee_bps: u16, proto_fee_bps: u16) -> Result<()> {
        ctx.accounts.create_pool(fee_bps, proto_fee_bps)
    }

    /// Deposit both assets, returns the LP shares minted
    pub fn add_liquidity(ctx: Context<AddLiquidity>, amount_a: u64, amount_b: u64) -> Result<u64> {
        ctx.accounts.add_liquidity(amount_a, amount_b)
    }

    /// Burn LP shares for a proportional slice of both reserves, returns the amounts paid out
    pub fn remove_liquidity(ctx: Context<RemoveLiquidity>, share_amount: u64) -> Result<WithdrawnAmounts> {
        ctx.accounts.remove_liquidity(share_amount)
    }

    /// Swap one pool asset for the other, returns the amount paid out
    pub fn swap_token(ctx: Context<Swap>, amount_in: u64, minimum_out: u64) -> Result<u64> {
        ctx.accounts.swap_token(SwapParams {
            amount_in,
            minimum_out,
        })
    }
}
