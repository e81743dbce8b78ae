//! token-swap kit
//!
//! Thin client for the `token_swap` constant-product pool program on Solana.
//! Each write method builds a single instruction, signs it with the loaded
//! wallet key and submits it. Pricing, liquidity accounting and slippage
//! enforcement all happen on-chain.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use token_swap_kit::{KitConfig, SwapKit};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut kit = SwapKit::from_config(KitConfig::from_file("token-swap.json")?);
//!     kit.set_keypair_from_wallet(token_swap_kit::wallet::DEFAULT_KEYPAIR_PATH)?;
//!
//!     kit.add_liquidity(1_000_000, 2_000_000).await?;
//!     let res = kit.swap_a_to_b(10_000, 19_000).await?;
//!     println!("Swapped! tx: {}", res.signature);
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`SwapKit::create_pool`] | Create the pool for the configured mint pair |
//! | [`SwapKit::add_liquidity`] | Deposit token A and token B |
//! | [`SwapKit::remove_liquidity`] | Burn LP shares, withdraw both tokens |
//! | [`SwapKit::swap_a_to_b`] | Sell token A for token B |
//! | [`SwapKit::swap_b_to_a`] | Sell token B for token A |
//! | [`SwapKit::balances`] | Wallet holdings of both tokens |

pub mod client;
pub mod config;
pub mod error;
pub mod instructions;
pub mod types;
pub mod wallet;

pub use client::SwapKit;
pub use config::{Commitment, KitConfig};
pub use error::{Error, Result};
pub use instructions::SwapDirection;
pub use types::*;
