//! Pool configuration: which program, which pool, which mint pair.
//!
//! Loaded from a JSON file such as:
//!
//! ```json
//! {
//!   "rpc_url":    "https://api.devnet.solana.com",
//!   "program_id": "<base-58 program id>",
//!   "pool":       "<base-58 pool address, optional>",
//!   "mint_a":     "<base-58 mint>",
//!   "mint_b":     "<base-58 mint>",
//!   "commitment": "confirmed"
//! }
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::{
    error::{Error, Result},
    instructions::derive_pool,
};

pub const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";
pub const DEVNET_RPC:  &str = "https://api.devnet.solana.com";

// ─── Commitment ───────────────────────────────────────────────────────────────

/// Confirmation level used for reads and for `send_and_confirm`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn to_commitment_config(self) -> CommitmentConfig {
        match self {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

// ─── Config ───────────────────────────────────────────────────────────────────

/// Everything [`crate::SwapKit`] needs to address one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitConfig {
    pub rpc_url:    String,
    pub program_id: Pubkey,
    /// Explicit pool address. When `None` the pool PDA for the mint pair is used.
    pub pool:       Option<Pubkey>,
    pub mint_a:     Pubkey,
    pub mint_b:     Pubkey,
    pub commitment: Commitment,
}

/// On-disk shape; pubkeys stay strings until validated.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default = "default_rpc_url")]
    rpc_url:    String,
    program_id: String,
    #[serde(default)]
    pool:       Option<String>,
    mint_a:     String,
    mint_b:     String,
    #[serde(default)]
    commitment: Commitment,
}

fn default_rpc_url() -> String {
    MAINNET_RPC.to_string()
}

impl KitConfig {
    /// Build a config in code. The pool address is derived from the mints.
    pub fn new(program_id: Pubkey, mint_a: Pubkey, mint_b: Pubkey) -> Self {
        Self {
            rpc_url: MAINNET_RPC.to_string(),
            program_id,
            pool: None,
            mint_a,
            mint_b,
            commitment: Commitment::default(),
        }
    }

    /// Read and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_raw(raw)
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn with_pool(mut self, pool: Pubkey) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }

    /// The configured pool, or the pool PDA for `(mint_a, mint_b)`.
    pub fn pool_address(&self) -> Pubkey {
        self.pool
            .unwrap_or_else(|| derive_pool(&self.mint_a, &self.mint_b, &self.program_id).0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(Error::InvalidArgument("rpc_url must not be empty".into()));
        }
        if self.mint_a == self.mint_b {
            return Err(Error::InvalidArgument(format!(
                "mint_a and mint_b must differ (both are {})",
                self.mint_a
            )));
        }
        Ok(())
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let pool = raw
            .pool
            .as_deref()
            .map(|p| parse_pubkey("pool", p))
            .transpose()?;
        let cfg = Self {
            rpc_url:    raw.rpc_url,
            program_id: parse_pubkey("program_id", &raw.program_id)?,
            pool,
            mint_a:     parse_pubkey("mint_a", &raw.mint_a)?,
            mint_b:     parse_pubkey("mint_b", &raw.mint_b)?,
            commitment: raw.commitment,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

impl FromStr for KitConfig {
    type Err = Error;

    /// Parse the JSON config format from memory.
    fn from_str(s: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(s).map_err(|source| Error::ConfigParse {
            path: "<inline>".into(),
            source,
        })?;
        Self::from_raw(raw)
    }
}

fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value.trim()).map_err(|_| {
        Error::InvalidArgument(format!("{field}: '{value}' is not a base-58 public key"))
    })
}
