//! Permissionless Pool Creation
//!
//! Creates the pool record, the LP share mint and both reserve vaults in a
//! single instruction. Every account is allocated by the program itself so
//! that the derivation check and the duplicate check run before anything is
//! created.
//!
//! ```text
//! (mint_a, mint_b, fee_bps) ──▶ pool ──┬──▶ pool_auth
//!                                      ├──▶ vault_a
//!                                      ├──▶ vault_b
//!                                      └──▶ lp_mint
//! ```

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use anchor_spl::token_interface::{
    initialize_account3, initialize_mint2, InitializeAccount3, InitializeMint2, Mint, TokenInterface,
};

use crate::address::PoolAddresses;
use crate::constants::*;
use crate::error::AmmError;
use crate::state::Pool;
use crate::validation::{validate_asset_pair, validate_fee_params, validate_pool_unallocated};

/// Event emitted when a pool is created
#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub lp_mint: Pubkey,
    pub fee_bps: u16,
    pub proto_fee_bps: u16,
    pub admin: Pubkey,
}

#[derive(Accounts)]
pub struct CreatePool<'info> {
    /// Pool creator, pays for every new account
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Asset A (must sort before asset B)
    pub mint_a: Box<InterfaceAccount<'info, Mint>>,

    /// Asset B
    pub mint_b: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: Pool record, verified against its derived address and created here
    #[account(mut)]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: Signing PDA for the vaults and LP mint, verified against its derived address
    pub pool_authority: UncheckedAccount<'info>,

    /// CHECK: LP share mint, verified against its derived address and created here
    #[account(mut)]
    pub lp_mint: UncheckedAccount<'info>,

    /// CHECK: Asset A reserve, verified against its derived address and created here
    #[account(mut)]
    pub vault_a: UncheckedAccount<'info>,

    /// CHECK: Asset B reserve, verified against its derived address and created here
    #[account(mut)]
    pub vault_b: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreatePool<'info> {
    pub fn create_pool(&mut self, fee_bps: u16, proto_fee_bps: u16) -> Result<()> {
        let mint_a = self.mint_a.key();
        let mint_b = self.mint_b.key();

        validate_asset_pair(&mint_a, &mint_b)?;
        validate_fee_params(fee_bps, proto_fee_bps)?;
        validate_pool_mint(&self.mint_a.to_account_info(), &self.token_program.key())?;
        validate_pool_mint(&self.mint_b.to_account_info(), &self.token_program.key())?;

        let addresses = PoolAddresses::derive(&crate::ID, mint_a, mint_b, fee_bps)?;
        addresses.validate_accounts(
            self.pool.key,
            self.pool_authority.key,
            self.lp_mint.key,
            self.vault_a.key,
            self.vault_b.key,
        )?;
        validate_pool_unallocated(self.pool.data_len(), self.pool.owner)?;

        let pool_key = addresses.pool;
        let fee_seed = fee_bps.to_le_bytes();
        let pool_bump = [addresses.pool_bump];
        let lp_mint_bump = [addresses.lp_mint_bump];
        let vault_a_bump = [addresses.vault_a_bump];
        let vault_b_bump = [addresses.vault_b_bump];

        // Pool record
        self.create_account(
            &self.pool.to_account_info(),
            Pool::SPACE,
            &crate::ID,
            &[POOL_SEED, mint_a.as_ref(), mint_b.as_ref(), &fee_seed, &pool_bump],
        )?;

        // LP mint, 9 decimals, no freeze authority
        self.create_account(
            &self.lp_mint.to_account_info(),
            MINT_ACCOUNT_SPACE,
            &self.token_program.key(),
            &[LP_MINT_SEED, pool_key.as_ref(), &lp_mint_bump],
        )?;
        initialize_mint2(
            CpiContext::new(
                self.token_program.to_account_info(),
                InitializeMint2 {
                    mint: self.lp_mint.to_account_info(),
                },
            ),
            LP_MINT_DECIMALS,
            &addresses.authority,
            None,
        )?;

        // Reserve vaults, owned by the pool authority
        self.create_account(
            &self.vault_a.to_account_info(),
            TOKEN_ACCOUNT_SPACE,
            &self.token_program.key(),
            &[VAULT_A_SEED, pool_key.as_ref(), &vault_a_bump],
        )?;
        initialize_account3(CpiContext::new(
            self.token_program.to_account_info(),
            InitializeAccount3 {
                account: self.vault_a.to_account_info(),
                mint: self.mint_a.to_account_info(),
                authority: self.pool_authority.to_account_info(),
            },
        ))?;

        self.create_account(
            &self.vault_b.to_account_info(),
            TOKEN_ACCOUNT_SPACE,
            &self.token_program.key(),
            &[VAULT_B_SEED, pool_key.as_ref(), &vault_b_bump],
        )?;
        initialize_account3(CpiContext::new(
            self.token_program.to_account_info(),
            InitializeAccount3 {
                account: self.vault_b.to_account_info(),
                mint: self.mint_b.to_account_info(),
                authority: self.pool_authority.to_account_info(),
            },
        ))?;

        let pool = Pool {
            mint_a,
            mint_b,
            vault_a: addresses.vault_a,
            vault_b: addresses.vault_b,
            lp_mint: addresses.lp_mint,
            fee_bps,
            proto_fee_bps,
            admin: self.creator.key(),
            bump_pool: addresses.pool_bump,
            bump_auth: addresses.authority_bump,
        };
        {
            let pool_info = self.pool.to_account_info();
            let mut data = pool_info.try_borrow_mut_data()?;
            pool.try_serialize(&mut &mut data[..])?;
        }

        msg!("Pool created: {}", pool_key);
        msg!("Mints: {} / {}", mint_a, mint_b);
        msg!("Fees: {} bps trading, {} bps protocol", fee_bps, proto_fee_bps);

        emit!(PoolCreated {
            pool: pool_key,
            mint_a,
            mint_b,
            lp_mint: addresses.lp_mint,
            fee_bps,
            proto_fee_bps,
            admin: self.creator.key(),
        });

        Ok(())
    }

    /// Allocate a program-derived account, tolerating lamports sent to the
    /// address ahead of time.
    fn create_account(
        &self,
        target: &AccountInfo<'info>,
        space: usize,
        owner: &Pubkey,
        signer_seeds: &[&[u8]],
    ) -> Result<()> {
        let rent_exempt_balance = Rent::get()?.minimum_balance(space);
        let signer = &[signer_seeds];

        let top_up = match AccountFunding::plan(target.lamports(), rent_exempt_balance) {
            AccountFunding::Create { lamports } => {
                return system_program::create_account(
                    CpiContext::new_with_signer(
                        self.system_program.to_account_info(),
                        CreateAccount {
                            from: self.creator.to_account_info(),
                            to: target.clone(),
                        },
                        signer,
                    ),
                    lamports,
                    space as u64,
                    owner,
                );
            }
            AccountFunding::Adopt { top_up } => top_up,
        };

        if top_up > 0 {
            system_program::transfer(
                CpiContext::new(
                    self.system_program.to_account_info(),
                    Transfer {
                        from: self.creator.to_account_info(),
                        to: target.clone(),
                    },
                ),
                top_up,
            )?;
        }
        system_program::allocate(
            CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                Allocate {
                    account_to_allocate: target.clone(),
                },
                signer,
            ),
            space as u64,
        )?;
        system_program::assign(
            CpiContext::new_with_signer(
                self.system_program.to_account_info(),
                Assign {
                    account_to_assign: target.clone(),
                },
                signer,
            ),
            owner,
        )
    }
}

/// How a derived address gets funded before it is allocated
///
/// `create_account` refuses addresses that already hold lamports, so an
/// address someone has pre-funded is adopted instead: topped up to the rent
/// exempt minimum, then allocated and assigned in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountFunding {
    Create { lamports: u64 },
    Adopt { top_up: u64 },
}

impl AccountFunding {
    pub fn plan(current_lamports: u64, rent_exempt_balance: u64) -> Self {
        if current_lamports == 0 {
            AccountFunding::Create {
                lamports: rent_exempt_balance,
            }
        } else {
            AccountFunding::Adopt {
                top_up: rent_exempt_balance.saturating_sub(current_lamports),
            }
        }
    }
}

/// Pool assets must live under the supplied token program and carry no
/// extensions (vaults are allocated at the base account size).
fn validate_pool_mint(mint: &AccountInfo, token_program: &Pubkey) -> Result<()> {
    require_keys_eq!(*mint.owner, *token_program, AmmError::InvalidMint);
    require!(mint.data_len() == MINT_ACCOUNT_SPACE, AmmError::InvalidMint);
    Ok(())
}
