//! # LP Share Accounting
//!
//! Shares are a proportional claim on both vaults.
//!
//! ## Minting
//!
//! ```text
//! supply == 0:  shares = floor(√(amount_a * amount_b))
//! supply  > 0:  shares = min(floor(amount_a * supply / vault_a),
//!                            floor(amount_b * supply / vault_b))
//! ```
//!
//! The deposit is taken in full. Whatever side exceeds the pool ratio is
//! donated to existing holders, so callers should size the pair with
//! [`matching_deposit`] first.
//!
//! ## Burning
//!
//! ```text
//! out_a = floor(shares * vault_a / supply)
//! out_b = floor(shares * vault_b / supply)
//! ```

use anchor_lang::prelude::*;

use super::math::{mul_div_floor, sqrt, to_u64};
use crate::error::AmmError;
use crate::validation::{require_nonzero, validate_balance};

/// Live pool balances, re-read at the start of every operation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub lp_supply: u64,
}

/// Shares to mint for a deposit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositQuote {
    pub shares: u64,
    pub amount_a: u64,
    pub amount_b: u64,
    /// True when this deposit sets the pool's initial ratio
    pub initial: bool,
}

/// Reserves released for burning shares
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalQuote {
    pub shares: u64,
    pub amount_a: u64,
    pub amount_b: u64,
}

impl PoolSnapshot {
    pub fn new(reserve_a: u64, reserve_b: u64, lp_supply: u64) -> Self {
        Self {
            reserve_a,
            reserve_b,
            lp_supply,
        }
    }

    pub fn after_deposit(&self, quote: &DepositQuote) -> Result<Self> {
        Ok(Self {
            reserve_a: self
                .reserve_a
                .checked_add(quote.amount_a)
                .ok_or(AmmError::ArithmeticOverflow)?,
            reserve_b: self
                .reserve_b
                .checked_add(quote.amount_b)
                .ok_or(AmmError::ArithmeticOverflow)?,
            lp_supply: self
                .lp_supply
                .checked_add(quote.shares)
                .ok_or(AmmError::ArithmeticOverflow)?,
        })
    }

    pub fn after_withdrawal(&self, quote: &WithdrawalQuote) -> Result<Self> {
        Ok(Self {
            reserve_a: self
                .reserve_a
                .checked_sub(quote.amount_a)
                .ok_or(AmmError::InsufficientLiquidity)?,
            reserve_b: self
                .reserve_b
                .checked_sub(quote.amount_b)
                .ok_or(AmmError::InsufficientLiquidity)?,
            lp_supply: self
                .lp_supply
                .checked_sub(quote.shares)
                .ok_or(AmmError::InsufficientBalance)?,
        })
    }
}

/// Calculate LP shares for depositing `amount_a` and `amount_b`
///
/// # Errors
/// * `ZeroAmount` - nothing deposited, or one side missing on the first deposit
/// * `InsufficientLiquidity` - shares outstanding but a vault is empty
/// * `InsufficientAmount` - the deposit is too small to earn a single share
/// * `ArithmeticOverflow` - a vault or the share supply would exceed `u64`
pub fn shares_for_deposit(pool: &PoolSnapshot, amount_a: u64, amount_b: u64) -> Result<DepositQuote> {
    require!(amount_a > 0 || amount_b > 0, AmmError::ZeroAmount);

    let initial = pool.lp_supply == 0;
    let shares = if initial {
        require_nonzero(amount_a)?;
        require_nonzero(amount_b)?;

        // Geometric mean makes the first share independent of the price
        // the depositor picks.
        to_u64(sqrt((amount_a as u128) * (amount_b as u128)))?
    } else {
        require!(
            pool.reserve_a > 0 && pool.reserve_b > 0,
            AmmError::InsufficientLiquidity
        );

        let supply = pool.lp_supply as u128;
        let share_a = (amount_a as u128)
            .checked_mul(supply)
            .ok_or(AmmError::ArithmeticOverflow)?
            / pool.reserve_a as u128;
        let share_b = (amount_b as u128)
            .checked_mul(supply)
            .ok_or(AmmError::ArithmeticOverflow)?
            / pool.reserve_b as u128;

        to_u64(share_a.min(share_b))?
    };

    require!(shares > 0, AmmError::InsufficientAmount);

    let quote = DepositQuote {
        shares,
        amount_a,
        amount_b,
        initial,
    };
    // Vault balances and supply must stay representable
    pool.after_deposit(&quote)?;

    Ok(quote)
}

/// Calculate reserves released for burning `share_amount` of `share_balance`
///
/// # Errors
/// * `InsufficientBalance` - `share_amount` is zero (checked first), or the
///   caller holds fewer shares than requested
/// * `NoLiquidityFound` - no shares are outstanding
pub fn amounts_for_withdrawal(
    pool: &PoolSnapshot,
    share_balance: u64,
    share_amount: u64,
) -> Result<WithdrawalQuote> {
    require!(share_amount > 0, AmmError::InsufficientBalance);
    require!(pool.lp_supply > 0, AmmError::NoLiquidityFound);
    validate_balance(share_balance, share_amount)?;
    validate_balance(pool.lp_supply, share_amount)?;

    let amount_a = mul_div_floor(share_amount, pool.reserve_a, pool.lp_supply)?;
    let amount_b = mul_div_floor(share_amount, pool.reserve_b, pool.lp_supply)?;

    Ok(WithdrawalQuote {
        shares: share_amount,
        amount_a,
        amount_b,
    })
}

/// Amount of the other asset that matches `amount` at the current pool ratio
///
/// Formula: floor(amount * reserve_other / reserve_in)
pub fn matching_deposit(amount: u64, reserve_in: u64, reserve_other: u64) -> Result<u64> {
    require!(reserve_in > 0, AmmError::NoLiquidityFound);
    mul_div_floor(amount, reserve_other, reserve_in)
}
