//! Liquidity Withdrawal
//!
//! Burns LP shares and releases the proportional slice of both reserves.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn, transfer_checked, Burn, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::amm::{amounts_for_withdrawal, PoolSnapshot};
use crate::error::AmmError;
use crate::state::Pool;

/// Event emitted when liquidity is withdrawn
#[event]
pub struct LiquidityRemoved {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub shares_burned: u64,
    pub amount_a: u64,
    pub amount_b: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub lp_supply: u64,
}

/// Amounts released by a withdrawal, returned to the caller
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawnAmounts {
    pub amount_a: u64,
    pub amount_b: u64,
}

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    pub provider: Signer<'info>,

    #[account(
        constraint = pool.is_derived_at(&pool.key()) @ AmmError::InvalidDerivedAddress,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// CHECK: Signing PDA, verified against the pool's stored bump
    #[account(
        constraint = pool.is_authority(&pool.key(), pool_authority.key) @ AmmError::InvalidDerivedAddress,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(address = pool.mint_a @ AmmError::InvalidMint)]
    pub mint_a: Box<InterfaceAccount<'info, Mint>>,

    #[account(address = pool.mint_b @ AmmError::InvalidMint)]
    pub mint_b: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut, address = pool.vault_a @ AmmError::InvalidVault)]
    pub vault_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = pool.vault_b @ AmmError::InvalidVault)]
    pub vault_b: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = pool.lp_mint @ AmmError::InvalidMint)]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = mint_a,
        token::authority = provider,
    )]
    pub provider_token_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint_b,
        token::authority = provider,
    )]
    pub provider_token_b: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Provider's LP shares, burned from here
    #[account(
        mut,
        token::mint = lp_mint,
        token::authority = provider,
    )]
    pub provider_lp: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> RemoveLiquidity<'info> {
    /// Burn `share_amount` shares, returning the released amounts
    pub fn remove_liquidity(&mut self, share_amount: u64) -> Result<WithdrawnAmounts> {
        let snapshot = PoolSnapshot::new(self.vault_a.amount, self.vault_b.amount, self.lp_mint.supply);
        let quote = amounts_for_withdrawal(&snapshot, self.provider_lp.amount, share_amount)?;
        let after = snapshot.after_withdrawal(&quote)?;

        burn(
            CpiContext::new(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.lp_mint.to_account_info(),
                    from: self.provider_lp.to_account_info(),
                    authority: self.provider.to_account_info(),
                },
            ),
            share_amount,
        )?;

        let pool_key = self.pool.key();
        let authority_seeds = self.pool.authority_seeds(&pool_key);
        let signer_seeds = &[&authority_seeds[..]];

        if quote.amount_a > 0 {
            transfer_checked(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.vault_a.to_account_info(),
                        mint: self.mint_a.to_account_info(),
                        to: self.provider_token_a.to_account_info(),
                        authority: self.pool_authority.to_account_info(),
                    },
                    signer_seeds,
                ),
                quote.amount_a,
                self.mint_a.decimals,
            )?;
        }

        if quote.amount_b > 0 {
            transfer_checked(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.vault_b.to_account_info(),
                        mint: self.mint_b.to_account_info(),
                        to: self.provider_token_b.to_account_info(),
                        authority: self.pool_authority.to_account_info(),
                    },
                    signer_seeds,
                ),
                quote.amount_b,
                self.mint_b.decimals,
            )?;
        }

        msg!("Burned {} LP shares", share_amount);
        msg!("Withdrew {} of token A, {} of token B", quote.amount_a, quote.amount_b);

        emit!(LiquidityRemoved {
            pool: pool_key,
            provider: self.provider.key(),
            shares_burned: share_amount,
            amount_a: quote.amount_a,
            amount_b: quote.amount_b,
            reserve_a: after.reserve_a,
            reserve_b: after.reserve_b,
            lp_supply: after.lp_supply,
        });

        Ok(WithdrawnAmounts {
            amount_a: quote.amount_a,
            amount_b: quote.amount_b,
        })
    }
}
