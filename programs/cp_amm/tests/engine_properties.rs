//! Property-based tests for the pool engine
//!
//! Random reserves, deposits and trades against the pure curve and share
//! math. Account handling is not involved.

use cp_amm::amm::{
    amounts_for_withdrawal, matching_deposit, minimum_out_with_slippage, shares_for_deposit,
    ConstantProductCurve, FeeSchedule, PoolSnapshot, SwapParams,
};
use cp_amm::state::ProtocolFeeMode;
use proptest::prelude::*;

prop_compose! {
    fn reserves_strategy()(
        reserve_a in 1_000u64..1_000_000_000_000u64,
        reserve_b in 1_000u64..1_000_000_000_000u64,
    ) -> (u64, u64) {
        (reserve_a, reserve_b)
    }
}

prop_compose! {
    fn fee_strategy()(
        fee_bps in 0u16..=300u16,
        proto_fee_bps in 0u16..=100u16,
    ) -> FeeSchedule {
        FeeSchedule::new(fee_bps, proto_fee_bps)
    }
}

fn mode_strategy() -> impl Strategy<Value = ProtocolFeeMode> {
    prop_oneof![Just(ProtocolFeeMode::RetainInVault), Just(ProtocolFeeMode::Treasury)]
}

proptest! {
    #[test]
    fn swap_never_decreases_reserve_product(
        (reserve_in, reserve_out) in reserves_strategy(),
        amount_in in 1u64..1_000_000_000u64,
        fees in fee_strategy(),
        mode in mode_strategy(),
    ) {
        let quote = ConstantProductCurve::quote_swap(
            reserve_in,
            reserve_out,
            SwapParams { amount_in, minimum_out: 0 },
            fees,
            mode,
        ).unwrap();

        let (after_in, after_out) = quote.reserves_after(reserve_in, reserve_out).unwrap();
        prop_assert!(quote.amount_out < reserve_out);
        prop_assert!(
            after_in as u128 * after_out as u128 >= reserve_in as u128 * reserve_out as u128
        );
        prop_assert_eq!(quote.vault_in_credit + quote.treasury_credit, amount_in);
        prop_assert_eq!(quote.net_in + quote.lp_fee + quote.protocol_fee, amount_in);
    }

    #[test]
    fn slippage_floor_is_always_met(
        (reserve_in, reserve_out) in reserves_strategy(),
        amount_in in 1u64..1_000_000_000u64,
        fees in fee_strategy(),
        slippage_bps in 0u16..=10_000u16,
    ) {
        let expected = ConstantProductCurve::quote_swap(
            reserve_in,
            reserve_out,
            SwapParams { amount_in, minimum_out: 0 },
            fees,
            ProtocolFeeMode::RetainInVault,
        ).unwrap();

        let minimum_out = minimum_out_with_slippage(expected.amount_out, slippage_bps).unwrap();
        prop_assert!(minimum_out <= expected.amount_out);

        let quote = ConstantProductCurve::quote_swap(
            reserve_in,
            reserve_out,
            SwapParams { amount_in, minimum_out },
            fees,
            ProtocolFeeMode::RetainInVault,
        ).unwrap();
        prop_assert_eq!(quote.amount_out, expected.amount_out);
    }

    #[test]
    fn deposit_then_withdraw_all_returns_no_more_than_deposited(
        amount_a in 1u64..1_000_000_000_000u64,
        amount_b in 1u64..1_000_000_000_000u64,
    ) {
        let empty = PoolSnapshot::default();
        let deposit = shares_for_deposit(&empty, amount_a, amount_b).unwrap();
        let pool = empty.after_deposit(&deposit).unwrap();

        let withdrawal = amounts_for_withdrawal(&pool, deposit.shares, deposit.shares).unwrap();
        prop_assert!(withdrawal.amount_a <= amount_a);
        prop_assert!(withdrawal.amount_b <= amount_b);

        let drained = pool.after_withdrawal(&withdrawal).unwrap();
        prop_assert_eq!(drained.lp_supply, 0);
    }

    #[test]
    fn later_provider_cannot_withdraw_more_than_deposited(
        (reserve_a, reserve_b) in reserves_strategy(),
        amount_a in 1u64..1_000_000_000u64,
        amount_b in 1u64..1_000_000_000u64,
    ) {
        let seed = shares_for_deposit(&PoolSnapshot::default(), reserve_a, reserve_b).unwrap();
        let pool = PoolSnapshot::default().after_deposit(&seed).unwrap();

        let deposit = shares_for_deposit(&pool, amount_a, amount_b);
        prop_assume!(deposit.is_ok());
        let deposit = deposit.unwrap();
        let pool = pool.after_deposit(&deposit).unwrap();

        let withdrawal = amounts_for_withdrawal(&pool, deposit.shares, deposit.shares).unwrap();
        prop_assert!(withdrawal.amount_a <= amount_a);
        prop_assert!(withdrawal.amount_b <= amount_b);
    }

    #[test]
    fn matched_deposit_grows_supply_and_vaults_exactly(
        (reserve_a, reserve_b) in reserves_strategy(),
        amount_a in 1u64..1_000_000_000u64,
    ) {
        let seed = shares_for_deposit(&PoolSnapshot::default(), reserve_a, reserve_b).unwrap();
        let pool = PoolSnapshot::default().after_deposit(&seed).unwrap();

        let amount_b = matching_deposit(amount_a, pool.reserve_a, pool.reserve_b).unwrap();
        let deposit = shares_for_deposit(&pool, amount_a, amount_b);
        prop_assume!(deposit.is_ok());
        let deposit = deposit.unwrap();

        let after = pool.after_deposit(&deposit).unwrap();
        prop_assert!(deposit.shares > 0);
        prop_assert!(after.lp_supply > pool.lp_supply);
        prop_assert_eq!(after.reserve_a, pool.reserve_a + amount_a);
        prop_assert_eq!(after.reserve_b, pool.reserve_b + amount_b);
    }
}
