//! # Automated Market Maker (AMM) Module
//!
//! Pure pricing and share accounting for **constant-product** pools.
//! Nothing in here touches accounts: handlers read the live vault and mint
//! balances, ask this module for a fully validated quote, and only then
//! move tokens.
//!
//! ## The Constant-Product AMM
//!
//! ```text
//!            k = vault_a * vault_b
//!
//!   ┌────────────────────────────────────────┐
//!   │                                         │
//!   │    B  ▲                                │
//!   │       │╲                               │
//!   │       │ ╲                              │
//!   │       │  ╲__                           │
//!   │       │     ╲___   x * y = k           │
//!   │       │         ╲________              │
//!   │       └──────────────────▶ A           │
//!   │                                         │
//!   │  Swaps slide along the curve           │
//!   │  Fees push the pool to a higher curve  │
//!   └────────────────────────────────────────┘
//! ```

pub mod constant_product;
pub mod liquidity;
pub mod math;

pub use constant_product::*;
pub use liquidity::*;
