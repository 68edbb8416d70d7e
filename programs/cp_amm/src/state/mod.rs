//! State structures for the pool protocol

pub mod config;
pub mod pool;

pub use config::*;
pub use pool::*;
