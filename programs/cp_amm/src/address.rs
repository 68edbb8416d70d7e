//! Deterministic pool addressing
//!
//! Single source of truth for every address a pool owns. The pool record is
//! derived from its asset pair and fee tier; the authority, both vaults and
//! the LP mint are derived from the pool record. Clients run the same
//! derivation to locate a pool without any registry.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::AmmError;
use crate::validation::validate_derived_address;

/// True if `mint_x` sorts strictly before `mint_y` in pool pair order
///
/// Pairs are ordered by their base58 text, not their raw bytes. The two
/// orders disagree whenever the encodings differ in length (43 vs 44
/// characters), and wallets derive pool addresses from the text order.
pub fn mint_precedes(mint_x: &Pubkey, mint_y: &Pubkey) -> bool {
    mint_x.to_string() < mint_y.to_string()
}

/// Order two mints canonically so an unordered pair always maps to one pool
pub fn canonical_pair(mint_x: Pubkey, mint_y: Pubkey) -> Result<(Pubkey, Pubkey)> {
    require_keys_neq!(mint_x, mint_y, AmmError::InvalidAssetPair);
    if mint_precedes(&mint_x, &mint_y) {
        Ok((mint_x, mint_y))
    } else {
        Ok((mint_y, mint_x))
    }
}

/// Derive pool record PDA for a canonically ordered pair and fee tier
pub fn pool_address(program_id: &Pubkey, mint_a: &Pubkey, mint_b: &Pubkey, fee_bps: u16) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POOL_SEED, mint_a.as_ref(), mint_b.as_ref(), &fee_bps.to_le_bytes()],
        program_id,
    )
}

/// Derive the pool authority PDA (signs for vaults and the LP mint)
pub fn pool_authority_address(program_id: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_AUTHORITY_SEED, pool.as_ref()], program_id)
}

/// Derive the asset A reserve PDA
pub fn vault_a_address(program_id: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_A_SEED, pool.as_ref()], program_id)
}

/// Derive the asset B reserve PDA
pub fn vault_b_address(program_id: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_B_SEED, pool.as_ref()], program_id)
}

/// Derive the LP share mint PDA
pub fn lp_mint_address(program_id: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_MINT_SEED, pool.as_ref()], program_id)
}

/// Recompute the pool record address from its stored bump
pub fn verify_pool_address(
    program_id: &Pubkey,
    mint_a: &Pubkey,
    mint_b: &Pubkey,
    fee_bps: u16,
    bump: u8,
    candidate: &Pubkey,
) -> bool {
    Pubkey::create_program_address(
        &[POOL_SEED, mint_a.as_ref(), mint_b.as_ref(), &fee_bps.to_le_bytes(), &[bump]],
        program_id,
    )
    .map(|derived| derived == *candidate)
    .unwrap_or(false)
}

/// Recompute the pool authority address from its stored bump
pub fn verify_authority_address(program_id: &Pubkey, pool: &Pubkey, bump: u8, candidate: &Pubkey) -> bool {
    Pubkey::create_program_address(&[POOL_AUTHORITY_SEED, pool.as_ref(), &[bump]], program_id)
        .map(|derived| derived == *candidate)
        .unwrap_or(false)
}

/// Every address belonging to one pool, with the bumps that sign for them
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolAddresses {
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub fee_bps: u16,
    pub pool: Pubkey,
    pub pool_bump: u8,
    pub authority: Pubkey,
    pub authority_bump: u8,
    pub vault_a: Pubkey,
    pub vault_a_bump: u8,
    pub vault_b: Pubkey,
    pub vault_b_bump: u8,
    pub lp_mint: Pubkey,
    pub lp_mint_bump: u8,
}

impl PoolAddresses {
    /// Derive all pool addresses for an unordered pair and a fee tier
    pub fn derive(program_id: &Pubkey, mint_x: Pubkey, mint_y: Pubkey, fee_bps: u16) -> Result<Self> {
        let (mint_a, mint_b) = canonical_pair(mint_x, mint_y)?;

        let (pool, pool_bump) = pool_address(program_id, &mint_a, &mint_b, fee_bps);
        let (authority, authority_bump) = pool_authority_address(program_id, &pool);
        let (vault_a, vault_a_bump) = vault_a_address(program_id, &pool);
        let (vault_b, vault_b_bump) = vault_b_address(program_id, &pool);
        let (lp_mint, lp_mint_bump) = lp_mint_address(program_id, &pool);

        Ok(Self {
            mint_a,
            mint_b,
            fee_bps,
            pool,
            pool_bump,
            authority,
            authority_bump,
            vault_a,
            vault_a_bump,
            vault_b,
            vault_b_bump,
            lp_mint,
            lp_mint_bump,
        })
    }

    /// Check caller-supplied accounts against the derived set
    ///
    /// Any substitution fails with `InvalidDerivedAddress`.
    pub fn validate_accounts(
        &self,
        pool: &Pubkey,
        authority: &Pubkey,
        lp_mint: &Pubkey,
        vault_a: &Pubkey,
        vault_b: &Pubkey,
    ) -> Result<()> {
        validate_derived_address(pool, &self.pool)?;
        validate_derived_address(authority, &self.authority)?;
        validate_derived_address(lp_mint, &self.lp_mint)?;
        validate_derived_address(vault_a, &self.vault_a)?;
        validate_derived_address(vault_b, &self.vault_b)
    }
}
