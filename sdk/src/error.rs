//! SDK error type.

use std::path::PathBuf;

use solana_sdk::{pubkey::Pubkey, transaction::TransactionError};

/// All errors returned by the token-swap kit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── RPC / network ────────────────────────────────────────────────────────
    /// A Solana JSON-RPC call failed before the chain judged the transaction.
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    /// The transaction landed but the program reported a failure.
    #[error("Transaction failed: {0}")]
    TransactionFailed(TransactionError),

    /// The RPC node answered with data this kit cannot interpret.
    #[error("Unexpected RPC response: {0}")]
    UnexpectedResponse(String),

    // ── Signing ──────────────────────────────────────────────────────────────
    /// A write operation was attempted before a keypair was loaded.
    #[error("Wallet not connected — load a keypair before sending transactions")]
    WalletNotConnected,

    #[error("Cannot load keypair from '{path}': {reason}")]
    Keypair { path: String, reason: String },

    // ── Token accounts ───────────────────────────────────────────────────────
    /// The signer holds no token account for the mint an operation spends.
    #[error("No token account for mint {mint} owned by {owner}")]
    NoTokenAccount { owner: Pubkey, mint: Pubkey },

    // ── Configuration ────────────────────────────────────────────────────────
    #[error("Cannot read config '{}': {source}", .path.display())]
    ConfigIo {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config '{}': {source}", .path.display())]
    ConfigParse {
        path:   PathBuf,
        source: serde_json::Error,
    },

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
