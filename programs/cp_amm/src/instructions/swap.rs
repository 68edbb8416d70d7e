//! Token Swap
//!
//! Exchanges one pool asset for the other along the constant-product curve.
//! Direction is set by which pool vault the caller passes as `vault_in`.
//!
//! ## Fee disposition
//!
//! ```text
//! amount_in ──┬── lp fee ───────────▶ vault_in (stays with LPs)
//!             ├── protocol fee ──┬──▶ vault_in            (RetainInVault)
//!             │                  └──▶ fee destination     (Treasury)
//!             └── net_in ───────────▶ vault_in (priced by the curve)
//! ```

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::amm::{ConstantProductCurve, SwapParams, SwapQuote};
use crate::error::AmmError;
use crate::state::{Config, Pool, ProtocolFeeMode};
use crate::validation::{validate_balance, validate_fee_destination};

/// Event emitted on every swap
#[event]
pub struct TokensSwapped {
    pub pool: Pubkey,
    pub trader: Pubkey,
    pub mint_in: Pubkey,
    pub mint_out: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub lp_fee: u64,
    pub protocol_fee: u64,
    pub protocol_fee_mode: ProtocolFeeMode,
}

#[derive(Accounts)]
pub struct Swap<'info> {
    pub trader: Signer<'info>,

    /// Protocol-fee disposition for every pool.
    ///
    /// Pools can take liquidity before this exists but cannot trade until
    /// `initialize` creates it. `initialize` is unguarded: its first caller
    /// becomes admin.
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        constraint = pool.is_derived_at(&pool.key()) @ AmmError::InvalidDerivedAddress,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// CHECK: Signing PDA, verified against the pool's stored bump
    #[account(
        constraint = pool.is_authority(&pool.key(), pool_authority.key) @ AmmError::InvalidDerivedAddress,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    pub mint_in: Box<InterfaceAccount<'info, Mint>>,

    pub mint_out: Box<InterfaceAccount<'info, Mint>>,

    /// Pool vault receiving the input asset
    #[account(mut)]
    pub vault_in: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool vault paying out the output asset
    #[account(mut)]
    pub vault_out: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint_in,
        token::authority = trader,
    )]
    pub trader_source: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint_out,
    )]
    pub trader_destination: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Treasury account for the input mint; required in `Treasury` mode
    #[account(mut)]
    pub protocol_fee_destination: Option<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Swap<'info> {
    /// Swap `params.amount_in` of the input asset, returning the amount paid out
    pub fn swap_token(&mut self, params: SwapParams) -> Result<u64> {
        let mode = self.config.protocol_fee_mode;

        self.pool.validate_route(
            &self.vault_in.key(),
            &self.vault_out.key(),
            &self.mint_in.key(),
            &self.mint_out.key(),
        )?;

        let quote = ConstantProductCurve::quote_swap(
            self.vault_in.amount,
            self.vault_out.amount,
            params,
            self.pool.fee_schedule(),
            mode,
        )?;
        validate_balance(self.trader_source.amount, params.amount_in)?;

        validate_fee_destination(
            mode,
            self.protocol_fee_destination
                .as_ref()
                .map(|destination| (&destination.owner, &destination.mint)),
            &self.config.treasury,
            &self.mint_in.key(),
        )?;

        self.collect_input(&quote)?;
        self.pay_output(quote.amount_out)?;

        msg!("Swapped {} in for {} out", quote.amount_in, quote.amount_out);
        msg!("Fees: {} LP, {} protocol ({:?})", quote.lp_fee, quote.protocol_fee, mode);

        emit!(TokensSwapped {
            pool: self.pool.key(),
            trader: self.trader.key(),
            mint_in: self.mint_in.key(),
            mint_out: self.mint_out.key(),
            amount_in: quote.amount_in,
            amount_out: quote.amount_out,
            lp_fee: quote.lp_fee,
            protocol_fee: quote.protocol_fee,
            protocol_fee_mode: mode,
        });

        Ok(quote.amount_out)
    }

    /// Trader pays the vault credit and, in treasury mode, the protocol fee
    fn collect_input(&self, quote: &SwapQuote) -> Result<()> {
        self.transfer_from_trader(self.vault_in.to_account_info(), quote.vault_in_credit)?;

        if quote.treasury_credit > 0 {
            let destination = self
                .protocol_fee_destination
                .as_ref()
                .ok_or(AmmError::MissingFeeDestination)?;
            self.transfer_from_trader(destination.to_account_info(), quote.treasury_credit)?;
        }
        Ok(())
    }

    fn transfer_from_trader(&self, to: AccountInfo<'info>, amount: u64) -> Result<()> {
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_source.to_account_info(),
                    mint: self.mint_in.to_account_info(),
                    to,
                    authority: self.trader.to_account_info(),
                },
            ),
            amount,
            self.mint_in.decimals,
        )
    }

    fn pay_output(&self, amount_out: u64) -> Result<()> {
        let pool_key = self.pool.key();
        let authority_seeds = self.pool.authority_seeds(&pool_key);
        let signer_seeds = &[&authority_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault_out.to_account_info(),
                    mint: self.mint_out.to_account_info(),
                    to: self.trader_destination.to_account_info(),
                    authority: self.pool_authority.to_account_info(),
                },
                signer_seeds,
            ),
            amount_out,
            self.mint_out.decimals,
        )
    }
}
