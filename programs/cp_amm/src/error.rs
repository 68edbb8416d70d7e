//! Error definitions
//!
//! Every failure a pool operation can surface. All of them abort the whole
//! instruction; nothing is retried on-chain.

use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    #[msg("No liquidity found in the pool")]
    NoLiquidityFound,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("A pool already exists for this pair and fee tier")]
    DuplicatePool,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Deposit is too small to mint any LP shares")]
    InsufficientAmount,
    #[msg("Insufficient balance to perform this operation")]
    InsufficientBalance,
    #[msg("Insufficient liquidity in the pool")]
    InsufficientLiquidity,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Account does not match its derived address")]
    InvalidDerivedAddress,
    #[msg("Pool assets must be distinct and in canonical order")]
    InvalidAssetPair,
    #[msg("Fee parameters exceed 10000 bps")]
    InvalidFee,
    #[msg("Token mint does not belong to this pool")]
    InvalidMint,
    #[msg("Vault does not belong to this pool")]
    InvalidVault,
    #[msg("Reserve product decreased")]
    InvariantViolation,
    #[msg("Protocol fee destination account is required")]
    MissingFeeDestination,
    #[msg("Protocol fee destination is not a treasury account for the input mint")]
    InvalidFeeDestination,
    #[msg("Signer is not the protocol admin")]
    Unauthorized,
}
