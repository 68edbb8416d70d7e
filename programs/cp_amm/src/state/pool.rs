//! Pool Record
//!
//! One account per (asset pair, fee tier). Reserves are never stored here:
//! they are always read live from the two vaults.

use anchor_lang::prelude::*;

use crate::address;
use crate::amm::FeeSchedule;
use crate::constants::POOL_AUTHORITY_SEED;
use crate::error::AmmError;

/// Durable state of one trading pair
///
/// Seeds: ["Pool", mint_a, mint_b, fee_bps.to_le_bytes()]
///
/// Layout: one discriminator byte, then the fields below in order,
/// integers little-endian.
#[account(discriminator = 1)]
#[derive(InitSpace)]
pub struct Pool {
    /// Asset A, the smaller of the two mints
    pub mint_a: Pubkey,
    /// Asset B, the larger of the two mints
    pub mint_b: Pubkey,
    /// Reserve of asset A, owned by the pool authority
    pub vault_a: Pubkey,
    /// Reserve of asset B, owned by the pool authority
    pub vault_b: Pubkey,
    /// LP share mint, minted and burned only under the pool authority
    pub lp_mint: Pubkey,
    /// Trading fee in basis points, retained by LPs
    pub fee_bps: u16,
    /// Protocol fee in basis points
    pub proto_fee_bps: u16,
    /// Pool creator
    pub admin: Pubkey,
    /// Bump of the pool record address
    pub bump_pool: u8,
    /// Bump of the pool authority address
    pub bump_auth: u8,
}

impl Pool {
    pub const SPACE: usize = Pool::DISCRIMINATOR.len() + Pool::INIT_SPACE;

    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule::new(self.fee_bps, self.proto_fee_bps)
    }

    /// True if `key` is the address this record derives to
    pub fn is_derived_at(&self, key: &Pubkey) -> bool {
        address::verify_pool_address(
            &crate::ID,
            &self.mint_a,
            &self.mint_b,
            self.fee_bps,
            self.bump_pool,
            key,
        )
    }

    /// True if `authority` is the signing PDA of the pool at `pool_key`
    pub fn is_authority(&self, pool_key: &Pubkey, authority: &Pubkey) -> bool {
        address::verify_authority_address(&crate::ID, pool_key, self.bump_auth, authority)
    }

    /// Signer seeds of the pool authority for the pool at `pool_key`
    pub fn authority_seeds<'a>(&'a self, pool_key: &'a Pubkey) -> [&'a [u8]; 3] {
        [
            POOL_AUTHORITY_SEED,
            pool_key.as_ref(),
            std::slice::from_ref(&self.bump_auth),
        ]
    }

    /// True if `key` is one of this pool's two vaults
    pub fn is_vault(&self, key: &Pubkey) -> bool {
        *key == self.vault_a || *key == self.vault_b
    }

    /// Mint held by `vault`, if it is one of this pool's vaults
    pub fn mint_for_vault(&self, vault: &Pubkey) -> Option<Pubkey> {
        if *vault == self.vault_a {
            Some(self.mint_a)
        } else if *vault == self.vault_b {
            Some(self.mint_b)
        } else {
            None
        }
    }

    /// Check a caller-designated swap direction against this pool
    ///
    /// Both vaults must be this pool's and distinct (`InvalidVault`); each
    /// mint must be the one its vault holds (`InvalidMint`).
    pub fn validate_route(
        &self,
        vault_in: &Pubkey,
        vault_out: &Pubkey,
        mint_in: &Pubkey,
        mint_out: &Pubkey,
    ) -> Result<()> {
        require!(self.is_vault(vault_in) && self.is_vault(vault_out), AmmError::InvalidVault);
        require_keys_neq!(*vault_in, *vault_out, AmmError::InvalidVault);
        require!(self.mint_for_vault(vault_in) == Some(*mint_in), AmmError::InvalidMint);
        require!(self.mint_for_vault(vault_out) == Some(*mint_out), AmmError::InvalidMint);
        Ok(())
    }
}
