//! Shared precondition checks
//!
//! Every pool operation runs its inputs through these before touching the
//! token program, so a failed check never leaves a partial transfer behind.

use anchor_lang::prelude::*;

use crate::address::mint_precedes;
use crate::constants::BPS_DENOMINATOR;
use crate::error::AmmError;
use crate::state::ProtocolFeeMode;

/// Reject zero amounts
pub fn require_nonzero(amount: u64) -> Result<()> {
    require!(amount > 0, AmmError::ZeroAmount);
    Ok(())
}

/// Validate fee parameters: trading fee plus protocol fee may not exceed 100%
pub fn validate_fee_params(fee_bps: u16, proto_fee_bps: u16) -> Result<()> {
    let total = (fee_bps as u64) + (proto_fee_bps as u64);
    require!(total <= BPS_DENOMINATOR, AmmError::InvalidFee);
    Ok(())
}

/// Validate that the pair is distinct and in canonical (base58 ascending) order
pub fn validate_asset_pair(mint_a: &Pubkey, mint_b: &Pubkey) -> Result<()> {
    require!(mint_precedes(mint_a, mint_b), AmmError::InvalidAssetPair);
    Ok(())
}

/// Validate that `balance` covers `amount`
pub fn validate_balance(balance: u64, amount: u64) -> Result<()> {
    require!(balance >= amount, AmmError::InsufficientBalance);
    Ok(())
}

/// Validate slippage constraints
pub fn validate_slippage(actual: u64, minimum: u64) -> Result<()> {
    require!(actual >= minimum, AmmError::SlippageExceeded);
    Ok(())
}

/// Validate a caller-supplied account against the address the program derived
pub fn validate_derived_address(supplied: &Pubkey, derived: &Pubkey) -> Result<()> {
    if supplied != derived {
        msg!("Derived address mismatch: supplied {}, expected {}", supplied, derived);
        return err!(AmmError::InvalidDerivedAddress);
    }
    Ok(())
}

/// Validate that a pool address has never been allocated
///
/// A live record, or any account already handed to another program, means
/// the pool exists.
pub fn validate_pool_unallocated(data_len: usize, owner: &Pubkey) -> Result<()> {
    require!(data_len == 0 && *owner == System::id(), AmmError::DuplicatePool);
    Ok(())
}

/// Validate the protocol-fee destination for the active fee mode
///
/// `destination` is the `(owner, mint)` of the supplied token account. Only
/// `Treasury` mode needs one: it must exist, be owned by `treasury` and hold
/// the swap's input mint.
pub fn validate_fee_destination(
    mode: ProtocolFeeMode,
    destination: Option<(&Pubkey, &Pubkey)>,
    treasury: &Pubkey,
    mint_in: &Pubkey,
) -> Result<()> {
    if mode == ProtocolFeeMode::RetainInVault {
        return Ok(());
    }

    let (owner, mint) = destination.ok_or(AmmError::MissingFeeDestination)?;
    require_keys_eq!(*owner, *treasury, AmmError::InvalidFeeDestination);
    require_keys_eq!(*mint, *mint_in, AmmError::InvalidFeeDestination);
    Ok(())
}
