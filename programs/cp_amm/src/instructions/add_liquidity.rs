//! Liquidity Provision
//!
//! Deposits both assets into the pool vaults and mints LP shares to the
//! provider. The amounts supplied are deposited exactly; see
//! [`crate::amm::matching_deposit`] for sizing a ratio-matched pair.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{mint_to, transfer_checked, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked},
};

use crate::amm::{shares_for_deposit, PoolSnapshot};
use crate::error::AmmError;
use crate::state::Pool;
use crate::validation::validate_balance;

/// Event emitted when liquidity is added
#[event]
pub struct LiquidityAdded {
    pub pool: Pubkey,
    pub provider: Pubkey,
    pub amount_a: u64,
    pub amount_b: u64,
    pub shares_minted: u64,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub lp_supply: u64,
}

/// Accounts for depositing liquidity
#[derive(Accounts)]
pub struct AddLiquidity<'info> {
    /// Liquidity provider
    #[account(mut)]
    pub provider: Signer<'info>,

    /// Pool record (read only)
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

    /// Provider's asset A account
    #[account(
        mut,
        token::mint = mint_a,
        token::authority = provider,
    )]
    pub provider_token_a: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Provider's asset B account
    #[account(
        mut,
        token::mint = mint_b,
        token::authority = provider,
    )]
    pub provider_token_b: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Provider's LP share account
    #[account(
        init_if_needed,
        payer = provider,
        associated_token::mint = lp_mint,
        associated_token::authority = provider,
        associated_token::token_program = token_program,
    )]
    pub provider_lp: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> AddLiquidity<'info> {
    /// Deposit `amount_a` and `amount_b`, returning the shares minted
    pub fn add_liquidity(&mut self, amount_a: u64, amount_b: u64) -> Result<u64> {
        let snapshot = PoolSnapshot::new(self.vault_a.amount, self.vault_b.amount, self.lp_mint.supply);

        let quote = shares_for_deposit(&snapshot, amount_a, amount_b)?;
        validate_balance(self.provider_token_a.amount, amount_a)?;
        validate_balance(self.provider_token_b.amount, amount_b)?;
        let after = snapshot.after_deposit(&quote)?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.provider_token_a.to_account_info(),
                    mint: self.mint_a.to_account_info(),
                    to: self.vault_a.to_account_info(),
                    authority: self.provider.to_account_info(),
                },
            ),
            amount_a,
            self.mint_a.decimals,
        )?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.provider_token_b.to_account_info(),
                    mint: self.mint_b.to_account_info(),
                    to: self.vault_b.to_account_info(),
                    authority: self.provider.to_account_info(),
                },
            ),
            amount_b,
            self.mint_b.decimals,
        )?;

        let pool_key = self.pool.key();
        let authority_seeds = self.pool.authority_seeds(&pool_key);
        let signer_seeds = &[&authority_seeds[..]];

        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.lp_mint.to_account_info(),
                    to: self.provider_lp.to_account_info(),
                    authority: self.pool_authority.to_account_info(),
                },
                signer_seeds,
            ),
            quote.shares,
        )?;

        msg!(
            "Liquidity added: {} of token A, {} of token B.",
            amount_a,
            amount_b
        );
        msg!("Minted {} LP shares{}", quote.shares, if quote.initial { " (initial deposit)" } else { "" });

        emit!(LiquidityAdded {
            pool: pool_key,
            provider: self.provider.key(),
            amount_a,
            amount_b,
            shares_minted: quote.shares,
            reserve_a: after.reserve_a,
            reserve_b: after.reserve_b,
            lp_supply: after.lp_supply,
        });

        Ok(quote.shares)
    }
}
