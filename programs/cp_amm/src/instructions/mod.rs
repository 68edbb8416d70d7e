//! Instruction handlers for the pool protocol
//!
//! - `initialize` - Create the global configuration (once)
//! - `create_pool` - Create a pool for an asset pair and fee tier (permissionless)
//! - `add_liquidity` - Deposit both assets for LP shares
//! - `remove_liquidity` - Burn LP shares for the underlying assets
//! - `swap_token` (in `swap`) - Trade one pool asset for the other

pub mod add_liquidity;
pub mod create_pool;
pub mod initialize;
pub mod remove_liquidity;
pub mod swap;

pub use add_liquidity::*;
pub use create_pool::*;
pub use initialize::*;
pub use remove_liquidity::*;
pub use swap::*;
