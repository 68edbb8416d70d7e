//! # Constant-Product Curve
//!
//! Swaps move the pool along the hyperbola `x * y = k`.
//!
//! ## The Core Invariant
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │        (vault_in + net_in) * (vault_out - out) >= k          │
//! │                                                              │
//! │   Where:                                                     │
//! │   • k       = vault_in * vault_out before the swap           │
//! │   • net_in  = amount_in minus trading and protocol fees      │
//! │   • out     = amount paid to the trader                      │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Swap Formula
//!
//! ```text
//! 1. fee        = floor(amount_in * fee_bps / 10000)
//! 2. proto_fee  = floor(amount_in * proto_fee_bps / 10000)
//! 3. net_in     = amount_in - fee - proto_fee
//! 4. amount_out = floor(vault_out * net_in / (vault_in + net_in))
//! ```
//!
//! Flooring `amount_out` always rounds in favour of the pool, and the
//! trading fee stays in the input vault, so `k` can only grow.

use anchor_lang::prelude::*;

use super::math::{mul_div_floor, reserve_product, to_u64};
use crate::constants::BPS_DENOMINATOR;
use crate::error::AmmError;
use crate::state::ProtocolFeeMode;
use crate::validation::{require_nonzero, validate_fee_params, validate_slippage};

/// Caller-supplied swap arguments
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapParams {
    /// How much the trader gives
    pub amount_in: u64,
    /// Slippage protection
    pub minimum_out: u64,
}

/// Trading and protocol fee rates of a pool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSchedule {
    pub fee_bps: u16,
    pub proto_fee_bps: u16,
}

/// How one `amount_in` is divided between LPs, the protocol and the curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub lp_fee: u64,
    pub protocol_fee: u64,
    pub net_in: u64,
}

impl FeeSchedule {
    pub fn new(fee_bps: u16, proto_fee_bps: u16) -> Self {
        Self {
            fee_bps,
            proto_fee_bps,
        }
    }

    /// Split `amount_in` into its fee components and the amount that prices
    /// the trade. Each fee is floored independently.
    pub fn split(&self, amount_in: u64) -> Result<FeeSplit> {
        let lp_fee = mul_div_floor(amount_in, self.fee_bps as u64, BPS_DENOMINATOR)?;
        let protocol_fee = mul_div_floor(amount_in, self.proto_fee_bps as u64, BPS_DENOMINATOR)?;

        let net_in = amount_in
            .checked_sub(lp_fee)
            .and_then(|rest| rest.checked_sub(protocol_fee))
            .ok_or(AmmError::ArithmeticOverflow)?;

        Ok(FeeSplit {
            lp_fee,
            protocol_fee,
            net_in,
        })
    }
}

/// Fully validated outcome of a swap, computed before any transfer happens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: u64,
    pub amount_out: u64,
    pub lp_fee: u64,
    pub protocol_fee: u64,
    pub net_in: u64,
    /// Amount of `amount_in` that lands in the input vault
    pub vault_in_credit: u64,
    /// Amount of `amount_in` routed to the protocol treasury
    pub treasury_credit: u64,
}

impl SwapQuote {
    /// Vault balances `(in, out)` once the quote has been executed
    pub fn reserves_after(&self, reserve_in: u64, reserve_out: u64) -> Result<(u64, u64)> {
        let new_in = reserve_in
            .checked_add(self.vault_in_credit)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let new_out = reserve_out
            .checked_sub(self.amount_out)
            .ok_or(AmmError::InsufficientLiquidity)?;
        Ok((new_in, new_out))
    }
}

/// Constant-product pricing for a two-asset pool
///
/// Symmetric: the caller decides which reserve is "in" and which is "out".
pub struct ConstantProductCurve;

impl ConstantProductCurve {
    /// Output for a fee-adjusted input
    ///
    /// Formula: out = floor(reserve_out * net_in / (reserve_in + net_in))
    ///
    /// # Arguments
    /// * `reserve_in` - Balance of the vault receiving the trade
    /// * `reserve_out` - Balance of the vault paying the trade
    /// * `net_in` - Input after fees
    pub fn get_amount_out(reserve_in: u64, reserve_out: u64, net_in: u64) -> Result<u64> {
        let denominator = (reserve_in as u128)
            .checked_add(net_in as u128)
            .ok_or(AmmError::ArithmeticOverflow)?;
        if denominator == 0 {
            return err!(AmmError::InsufficientLiquidity);
        }

        let numerator = (reserve_out as u128)
            .checked_mul(net_in as u128)
            .ok_or(AmmError::ArithmeticOverflow)?;

        to_u64(numerator / denominator)
    }

    /// Price and validate a swap
    ///
    /// # Arguments
    /// * `reserve_in` - Current balance of the input vault
    /// * `reserve_out` - Current balance of the output vault
    /// * `params` - Amount in and the trader's minimum acceptable output
    /// * `fees` - Pool fee rates
    /// * `mode` - Where the protocol-fee slice of `amount_in` goes
    ///
    /// # Errors
    /// * `ZeroAmount` - `amount_in` is zero
    /// * `InsufficientLiquidity` - the trade would empty the output vault
    /// * `SlippageExceeded` - output below `minimum_out`
    /// * `InvariantViolation` - reserve product would shrink
    ///
    /// # Example
    /// ```ignore
    /// // Pool holds 100_000 A and 200_000 B, fees 25 + 5 bps
    /// let quote = ConstantProductCurve::quote_swap(
    ///     100_000,
    ///     200_000,
    ///     SwapParams { amount_in: 1_000, minimum_out: 0 },
    ///     FeeSchedule::new(25, 5),
    ///     ProtocolFeeMode::RetainInVault,
    /// )?;
    /// // quote.amount_out == 1_976
    /// ```
    pub fn quote_swap(
        reserve_in: u64,
        reserve_out: u64,
        params: SwapParams,
        fees: FeeSchedule,
        mode: ProtocolFeeMode,
    ) -> Result<SwapQuote> {
        require_nonzero(params.amount_in)?;
        validate_fee_params(fees.fee_bps, fees.proto_fee_bps)?;

        let split = fees.split(params.amount_in)?;
        let amount_out = Self::get_amount_out(reserve_in, reserve_out, split.net_in)?;

        // Draining (or an already empty output side) is never allowed
        require!(amount_out < reserve_out, AmmError::InsufficientLiquidity);
        validate_slippage(amount_out, params.minimum_out)?;

        let (vault_in_credit, treasury_credit) = match mode {
            ProtocolFeeMode::RetainInVault => (params.amount_in, 0),
            ProtocolFeeMode::Treasury => (
                params
                    .amount_in
                    .checked_sub(split.protocol_fee)
                    .ok_or(AmmError::ArithmeticOverflow)?,
                split.protocol_fee,
            ),
        };

        let quote = SwapQuote {
            amount_in: params.amount_in,
            amount_out,
            lp_fee: split.lp_fee,
            protocol_fee: split.protocol_fee,
            net_in: split.net_in,
            vault_in_credit,
            treasury_credit,
        };

        let after = quote.reserves_after(reserve_in, reserve_out)?;
        Self::check_invariant((reserve_in, reserve_out), after)?;

        Ok(quote)
    }

    /// Fail unless `k` is non-decreasing from `before` to `after`
    pub fn check_invariant(before: (u64, u64), after: (u64, u64)) -> Result<()> {
        let k_before = reserve_product(before.0, before.1);
        let k_after = reserve_product(after.0, after.1);
        require!(k_after >= k_before, AmmError::InvariantViolation);
        Ok(())
    }

    /// Marginal price of one unit of the input asset, in bps of the output asset
    ///
    /// # Example
    /// ```ignore
    /// // 100_000 A against 200_000 B: 1 A = 2 B
    /// let price = ConstantProductCurve::spot_price_bps(100_000, 200_000)?;
    /// // price == 20_000
    /// ```
    pub fn spot_price_bps(reserve_in: u64, reserve_out: u64) -> Result<u64> {
        require!(reserve_in > 0, AmmError::InsufficientLiquidity);
        mul_div_floor(reserve_out, BPS_DENOMINATOR, reserve_in)
    }
}

/// Lowest acceptable output for an expected quote and a slippage tolerance
///
/// Formula: floor(expected_out * (10000 - slippage_bps) / 10000)
pub fn minimum_out_with_slippage(expected_out: u64, slippage_bps: u16) -> Result<u64> {
    let keep_bps = BPS_DENOMINATOR
        .checked_sub(slippage_bps as u64)
        .ok_or(AmmError::InvalidFee)?;
    mul_div_floor(expected_out, keep_bps, BPS_DENOMINATOR)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn params(amount_in: u64, minimum_out: u64) -> SwapParams {
        SwapParams {
            amount_in,
            minimum_out,
        }
    }

    #[test]
    fn test_fee_split() {
        let split = FeeSchedule::new(25, 5).split(1_000).unwrap();
        assert_eq!(split.lp_fee, 2);
        assert_eq!(split.protocol_fee, 0);
        assert_eq!(split.net_in, 998);

        let split = FeeSchedule::new(30, 20).split(1_000_000).unwrap();
        assert_eq!(split.lp_fee, 3_000);
        assert_eq!(split.protocol_fee, 2_000);
        assert_eq!(split.net_in, 995_000);
    }

    #[test]
    fn test_full_fee_leaves_nothing_to_trade() {
        let split = FeeSchedule::new(9_000, 1_000).split(1_000).unwrap();
        assert_eq!(split.net_in, 0);
    }

    #[test]
    fn test_reference_swap() {
        let quote = ConstantProductCurve::quote_swap(
            100_000,
            200_000,
            params(1_000, 0),
            FeeSchedule::new(25, 5),
            ProtocolFeeMode::RetainInVault,
        )
        .unwrap();

        assert_eq!(quote.lp_fee, 2);
        assert_eq!(quote.protocol_fee, 0);
        assert_eq!(quote.net_in, 998);
        assert_eq!(quote.amount_out, 200_000 * 998 / 100_998);
        assert_eq!(quote.amount_out, 1_976);
        assert_eq!(quote.vault_in_credit, 1_000);
        assert_eq!(quote.treasury_credit, 0);
    }

    #[test]
    fn test_reference_swap_slippage() {
        let fees = FeeSchedule::new(25, 5);
        let mode = ProtocolFeeMode::RetainInVault;

        assert!(ConstantProductCurve::quote_swap(100_000, 200_000, params(1_000, 1_976), fees, mode).is_ok());

        let result = ConstantProductCurve::quote_swap(100_000, 200_000, params(1_000, 1_977), fees, mode);
        assert_eq!(result.unwrap_err(), AmmError::SlippageExceeded.into());
    }

    #[test]
    fn test_swap_is_symmetric() {
        let fees = FeeSchedule::new(25, 5);
        let mode = ProtocolFeeMode::RetainInVault;

        // B -> A against the same pool is just the reserves swapped
        let quote = ConstantProductCurve::quote_swap(200_000, 100_000, params(2_000, 0), fees, mode).unwrap();
        let split = fees.split(2_000).unwrap();
        assert_eq!(
            quote.amount_out,
            (100_000u128 * split.net_in as u128 / (200_000u128 + split.net_in as u128)) as u64
        );
    }

    #[test]
    fn test_zero_amount_swap_fails() {
        let result = ConstantProductCurve::quote_swap(
            100_000,
            200_000,
            params(0, 0),
            FeeSchedule::new(25, 5),
            ProtocolFeeMode::RetainInVault,
        );
        assert_eq!(result.unwrap_err(), AmmError::ZeroAmount.into());
    }

    #[test]
    fn test_empty_pool_swap_fails() {
        let fees = FeeSchedule::new(25, 5);
        let mode = ProtocolFeeMode::RetainInVault;

        let result = ConstantProductCurve::quote_swap(0, 0, params(1_000, 0), fees, mode);
        assert_eq!(result.unwrap_err(), AmmError::InsufficientLiquidity.into());

        // Input side empty: the whole output vault would be paid out
        let result = ConstantProductCurve::quote_swap(0, 200_000, params(1_000, 0), fees, mode);
        assert_eq!(result.unwrap_err(), AmmError::InsufficientLiquidity.into());
    }

    #[test]
    fn test_huge_swap_never_drains_pool() {
        let quote = ConstantProductCurve::quote_swap(
            1,
            200_000,
            params(u64::MAX, 0),
            FeeSchedule::new(0, 0),
            ProtocolFeeMode::RetainInVault,
        );
        // u64::MAX in on a 1-unit reserve overflows the input vault balance
        assert_eq!(quote.unwrap_err(), AmmError::ArithmeticOverflow.into());

        let quote = ConstantProductCurve::quote_swap(
            10,
            200_000,
            params(1_000_000_000, 0),
            FeeSchedule::new(0, 0),
            ProtocolFeeMode::RetainInVault,
        )
        .unwrap();
        assert!(quote.amount_out < 200_000);
    }

    #[test]
    fn test_tiny_swap_can_round_to_zero() {
        let quote = ConstantProductCurve::quote_swap(
            1_000_000,
            1_000,
            params(1, 0),
            FeeSchedule::new(0, 0),
            ProtocolFeeMode::RetainInVault,
        )
        .unwrap();
        assert_eq!(quote.amount_out, 0);

        // With any positive minimum the trader is protected
        let result = ConstantProductCurve::quote_swap(
            1_000_000,
            1_000,
            params(1, 1),
            FeeSchedule::new(0, 0),
            ProtocolFeeMode::RetainInVault,
        );
        assert_eq!(result.unwrap_err(), AmmError::SlippageExceeded.into());
    }

    #[test]
    fn test_product_grows_with_fees() {
        let quote = ConstantProductCurve::quote_swap(
            1_000_000,
            1_000_000,
            params(50_000, 0),
            FeeSchedule::new(30, 0),
            ProtocolFeeMode::RetainInVault,
        )
        .unwrap();

        let (new_in, new_out) = quote.reserves_after(1_000_000, 1_000_000).unwrap();
        assert!(reserve_product(new_in, new_out) > reserve_product(1_000_000, 1_000_000));
    }

    // Where the protocol fee ends up is a deployment choice; both
    // dispositions must keep the pool's product from shrinking.
    #[test]
    fn test_protocol_fee_retained_in_vault() {
        let quote = ConstantProductCurve::quote_swap(
            1_000_000,
            2_000_000,
            params(100_000, 0),
            FeeSchedule::new(25, 5),
            ProtocolFeeMode::RetainInVault,
        )
        .unwrap();

        assert_eq!(quote.protocol_fee, 50);
        assert_eq!(quote.vault_in_credit, 100_000);
        assert_eq!(quote.treasury_credit, 0);
    }

    #[test]
    fn test_protocol_fee_routed_to_treasury() {
        let retained = ConstantProductCurve::quote_swap(
            1_000_000,
            2_000_000,
            params(100_000, 0),
            FeeSchedule::new(25, 5),
            ProtocolFeeMode::RetainInVault,
        )
        .unwrap();
        let swept = ConstantProductCurve::quote_swap(
            1_000_000,
            2_000_000,
            params(100_000, 0),
            FeeSchedule::new(25, 5),
            ProtocolFeeMode::Treasury,
        )
        .unwrap();

        // Pricing does not depend on the disposition
        assert_eq!(swept.amount_out, retained.amount_out);
        assert_eq!(swept.treasury_credit, 50);
        assert_eq!(swept.vault_in_credit, 100_000 - 50);
        assert_eq!(swept.vault_in_credit + swept.treasury_credit, swept.amount_in);

        let (new_in, new_out) = swept.reserves_after(1_000_000, 2_000_000).unwrap();
        assert!(reserve_product(new_in, new_out) >= reserve_product(1_000_000, 2_000_000));
    }

    #[test]
    fn test_invariant_check() {
        assert!(ConstantProductCurve::check_invariant((100, 100), (110, 91)).is_ok());
        assert_eq!(
            ConstantProductCurve::check_invariant((100, 100), (110, 90)).unwrap_err(),
            AmmError::InvariantViolation.into()
        );
    }

    #[test]
    fn test_spot_price() {
        assert_eq!(ConstantProductCurve::spot_price_bps(100_000, 200_000).unwrap(), 20_000);
        assert_eq!(ConstantProductCurve::spot_price_bps(200_000, 100_000).unwrap(), 5_000);
        assert_eq!(
            ConstantProductCurve::spot_price_bps(0, 100_000).unwrap_err(),
            AmmError::InsufficientLiquidity.into()
        );
    }

    #[test]
    fn test_minimum_out_with_slippage() {
        assert_eq!(minimum_out_with_slippage(1_976, 0).unwrap(), 1_976);
        assert_eq!(minimum_out_with_slippage(1_976, 100).unwrap(), 1_956);
        assert_eq!(minimum_out_with_slippage(1_976, 10_000).unwrap(), 0);
        assert!(minimum_out_with_slippage(1_976, 10_001).is_err());
    }
}
