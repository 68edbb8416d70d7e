//! Protocol Initialization
//!
//! Sets up the global configuration for the pool protocol.
//! This is typically called once during deployment.

use anchor_lang::prelude::*;

use crate::error::AmmError;
use crate::state::{Config, ProtocolFeeMode};

/// Event emitted when the protocol configuration is created
#[event]
pub struct ConfigInitialized {
    pub admin: Pubkey,
    pub protocol_fee_mode: ProtocolFeeMode,
    pub treasury: Pubkey,
}

/// Event emitted when the admin changes the protocol-fee disposition
#[event]
pub struct ProtocolFeeModeUpdated {
    pub protocol_fee_mode: ProtocolFeeMode,
    pub treasury: Pubkey,
}

/// Accounts required for protocol initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Protocol administrator (becomes the admin)
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = admin,
        space = Config::DISCRIMINATOR.len() + Config::INIT_SPACE,
        seeds = [Config::SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Initialize the protocol configuration
    pub fn initialize(
        &mut self,
        protocol_fee_mode: ProtocolFeeMode,
        treasury: Pubkey,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        self.config.set_inner(Config {
            admin: self.admin.key(),
            protocol_fee_mode,
            treasury,
            bump: bumps.config,
        });

        msg!("Protocol initialized!");
        msg!("Admin: {}", self.admin.key());
        msg!("Protocol fee mode: {:?}, treasury: {}", protocol_fee_mode, treasury);

        emit!(ConfigInitialized {
            admin: self.admin.key(),
            protocol_fee_mode,
            treasury,
        });

        Ok(())
    }
}

/// Accounts for changing the protocol-fee disposition
#[derive(Accounts)]
pub struct SetProtocolFeeMode<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = admin @ AmmError::Unauthorized,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> SetProtocolFeeMode<'info> {
    pub fn set_protocol_fee_mode(&mut self, protocol_fee_mode: ProtocolFeeMode, treasury: Pubkey) -> Result<()> {
        self.config.protocol_fee_mode = protocol_fee_mode;
        self.config.treasury = treasury;

        msg!("Protocol fee mode set to {:?}, treasury: {}", protocol_fee_mode, treasury);

        emit!(ProtocolFeeModeUpdated {
            protocol_fee_mode,
            treasury,
        });

        Ok(())
    }
}
