//! Checked integer helpers shared by the pricing code
//!
//! Amounts are `u64`; every product is formed in `u128` so that two `u64`
//! factors can never overflow, and every narrowing back to `u64` is checked.

use anchor_lang::prelude::*;

use crate::error::AmmError;

/// Integer square root using Newton's method
///
/// Computes floor(√x) for any `u128`
///
/// # Algorithm
/// Uses iterative refinement: z = (x/z + z) / 2
/// Converges quadratically to √x
pub fn sqrt(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }

    // Initial guess: ceil(x / 2), written so that u128::MAX cannot overflow
    let mut z = (x >> 1) + (x & 1);
    let mut y = x;

    while z < y {
        y = z;
        z = (x / z + z) / 2;
    }

    y
}

/// floor(a * b / denominator) with a `u128` intermediate
pub fn mul_div_floor(a: u64, b: u64, denominator: u64) -> Result<u64> {
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(AmmError::ArithmeticOverflow)?;
    let quotient = product
        .checked_div(denominator as u128)
        .ok_or(AmmError::ArithmeticOverflow)?;
    to_u64(quotient)
}

/// Narrow a `u128` result back to the native amount type
pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(AmmError::ArithmeticOverflow))
}

/// Product of two reserves, the constant-product invariant `k`
pub fn reserve_product(x: u64, y: u64) -> u128 {
    // (2^64 - 1)^2 < 2^128, cannot overflow
    (x as u128) * (y as u128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(0), 0);
        assert_eq!(sqrt(1), 1);
        assert_eq!(sqrt(2), 1);
        assert_eq!(sqrt(3), 1);
        assert_eq!(sqrt(4), 2);
        assert_eq!(sqrt(10), 3);
        assert_eq!(sqrt(1_000_000), 1_000);
        assert_eq!(sqrt(20_000_000_000), 141_421);
    }

    #[test]
    fn test_sqrt_extremes() {
        assert_eq!(sqrt(u128::MAX), u64::MAX as u128);

        let max_product = reserve_product(u64::MAX, u64::MAX);
        assert_eq!(sqrt(max_product), u64::MAX as u128);
        assert_eq!(sqrt(max_product - 1), (u64::MAX - 1) as u128);
    }

    #[test]
    fn test_mul_div_floor_rounds_down() {
        assert_eq!(mul_div_floor(10, 10, 3).unwrap(), 33);
        assert_eq!(mul_div_floor(200_000, 998, 100_998).unwrap(), 1_976);
        assert_eq!(mul_div_floor(u64::MAX, u64::MAX, u64::MAX).unwrap(), u64::MAX);
    }

    #[test]
    fn test_mul_div_floor_rejects_overflow_and_zero_denominator() {
        assert_eq!(
            mul_div_floor(u64::MAX, 2, 1).unwrap_err(),
            AmmError::ArithmeticOverflow.into()
        );
        assert_eq!(
            mul_div_floor(1, 1, 0).unwrap_err(),
            AmmError::ArithmeticOverflow.into()
        );
    }
}
