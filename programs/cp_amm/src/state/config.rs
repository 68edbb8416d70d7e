//! Global Protocol Configuration
//!
//! This account stores protocol-wide settings that apply to all pools.

use anchor_lang::prelude::*;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["config"]
#[account(discriminator = 2)]
#[derive(InitSpace)]
pub struct Config {
    /// Protocol administrator, the only signer allowed to change settings
    pub admin: Pubkey,

    /// Where the protocol-fee slice of every swap input goes
    pub protocol_fee_mode: ProtocolFeeMode,

    /// Owner of the token accounts that receive protocol fees
    /// when `protocol_fee_mode` is `Treasury`
    pub treasury: Pubkey,

    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const SEED: &'static [u8] = b"config";
}

/// Disposition of the protocol fee charged on swaps
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum ProtocolFeeMode {
    /// Protocol fee stays in the input vault and accrues to LPs with the trading fee
    #[default]
    RetainInVault,
    /// Protocol fee is sent to a treasury-owned account for the input mint
    Treasury,
}
