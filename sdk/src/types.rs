//! Result types returned by [`crate::SwapKit`] operations.

use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::instructions::SwapDirection;

#[derive(Debug, Clone)]
pub struct CreatePoolResult {
    pub signature:      Signature,
    pub pool:           Pubkey,
    pub pool_authority: Pubkey,
    pub vault_a:        Pubkey,
    pub vault_b:        Pubkey,
    pub mint_a:         Pubkey,
    pub mint_b:         Pubkey,
}

#[derive(Debug, Clone)]
pub struct LiquidityResult {
    pub signature: Signature,
    pub pool:      Pubkey,
    /// Provider's position PDA, created on first deposit.
    pub position:  Pubkey,
    pub amount_a:  u64,
    pub amount_b:  u64,
}

#[derive(Debug, Clone)]
pub struct RemoveLiquidityResult {
    pub signature: Signature,
    pub pool:      Pubkey,
    pub position:  Pubkey,
    pub lp_amount: u64,
}

#[derive(Debug, Clone)]
pub struct SwapResult {
    pub signature:      Signature,
    pub pool:           Pubkey,
    pub direction:      SwapDirection,
    /// Signer's token account the input was taken from.
    pub source_account: Pubkey,
    pub amount_in:      u64,
    /// Floor passed to the program; 0 means no floor.
    pub min_amount_out: u64,
}

/// Token holdings of one wallet for the configured mint pair, in atomic units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balances {
    pub owner:   Pubkey,
    pub token_a: u64,
    pub token_b: u64,
}
