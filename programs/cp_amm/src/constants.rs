//! Protocol constants
//!
//! Seeds used for every derived address, fee denominators and the fixed
//! sizes of the accounts the program allocates itself.

/// Seed prefix of the pool record: ["Pool", mint_a, mint_b, fee_bps_le]
pub const POOL_SEED: &[u8] = b"Pool";

/// Seed prefix of the pool's signing authority: ["pool_auth", pool]
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_auth";

/// Seed prefix of the asset A reserve: ["vault_a", pool]
pub const VAULT_A_SEED: &[u8] = b"vault_a";

/// Seed prefix of the asset B reserve: ["vault_b", pool]
pub const VAULT_B_SEED: &[u8] = b"vault_b";

/// Seed prefix of the LP share mint: ["lp_mint", pool]
pub const LP_MINT_SEED: &[u8] = b"lp_mint";

/// 10_000 bps = 100%
pub const BPS_DENOMINATOR: u64 = 10_000;

/// LP shares use a fixed precision regardless of the underlying assets
pub const LP_MINT_DECIMALS: u8 = 9;

/// Size of a base SPL mint (no extensions)
pub const MINT_ACCOUNT_SPACE: usize = 82;

/// Size of a base SPL token account (no extensions)
pub const TOKEN_ACCOUNT_SPACE: usize = 165;
