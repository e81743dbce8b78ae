//! [`SwapKit`] — the main entry point for integrations.

use std::str::FromStr;

use solana_account_decoder_client_types::UiAccountData;
use solana_client::{
    nonblocking::rpc_client::RpcClient, rpc_request::TokenAccountsFilter,
    rpc_response::RpcKeyedAccount,
};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::{debug, info, warn};

use crate::{
    config::KitConfig,
    error::{Error, Result},
    instructions::{
        add_liquidity_ix, create_pool_ix, derive_ata, derive_pool, derive_pool_authority,
        derive_position, derive_vault, remove_liquidity_ix, swap_ix, SwapDirection, VaultSide,
    },
    types::{Balances, CreatePoolResult, LiquidityResult, RemoveLiquidityResult, SwapResult},
    wallet::load_keypair,
};

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async client for one `token_swap` pool.
///
/// Holds an RPC handle, the pool configuration and an optional signing key.
/// Every write operation builds one instruction, signs it with the loaded key
/// and submits it in its own transaction.
///
/// ```rust,no_run
/// # use token_swap_kit::{KitConfig, SwapKit};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = KitConfig::from_file("token-swap.json")?;
/// let mut kit = SwapKit::from_config(config);
/// kit.set_keypair_from_wallet("~/.config/solana/id.json")?;
///
/// let res = kit.swap_a_to_b(1_000_000, 990_000).await?;
/// println!("swapped: {}", res.signature);
/// # Ok(())
/// # }
/// ```
pub struct SwapKit {
    rpc:     RpcClient,
    config:  KitConfig,
    keypair: Option<Keypair>,
}

impl SwapKit {
    /// Wrap an existing RPC client. Its commitment level is used as-is.
    pub fn new(rpc: RpcClient, config: KitConfig) -> Self {
        Self { rpc, config, keypair: None }
    }

    /// Build an RPC client from `config.rpc_url` and `config.commitment`.
    pub fn from_config(config: KitConfig) -> Self {
        let rpc = RpcClient::new_with_commitment(
            config.rpc_url.clone(),
            config.commitment.to_commitment_config(),
        );
        Self::new(rpc, config)
    }

    pub fn with_keypair(mut self, keypair: Keypair) -> Self {
        self.keypair = Some(keypair);
        self
    }

    pub fn set_keypair(&mut self, keypair: Keypair) {
        self.keypair = Some(keypair);
    }

    /// Load the signing key from a Solana CLI wallet file.
    pub fn set_keypair_from_wallet(&mut self, path: &str) -> Result<Pubkey> {
        let keypair = load_keypair(path)?;
        let pubkey = keypair.pubkey();
        debug!(%pubkey, path, "keypair loaded");
        self.keypair = Some(keypair);
        Ok(pubkey)
    }

    pub fn signer_pubkey(&self) -> Option<Pubkey> {
        self.keypair.as_ref().map(|k| k.pubkey())
    }

    pub fn config(&self) -> &KitConfig {
        &self.config
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    // ── Write operations ──────────────────────────────────────────────────────

    /// Create the pool for the configured mint pair.
    ///
    /// The program creates the pool at the PDA for `(mint_a, mint_b)`. A
    /// configured `pool` pointing anywhere else is rejected, since later
    /// operations would address that other account.
    pub async fn create_pool(&self) -> Result<CreatePoolResult> {
        let payer = self.signer()?;
        let cfg = &self.config;

        let (pool, _) = derive_pool(&cfg.mint_a, &cfg.mint_b, &cfg.program_id);
        if let Some(configured) = cfg.pool.filter(|p| *p != pool) {
            return Err(Error::InvalidArgument(format!(
                "configured pool {configured} is not the pool PDA {pool} for this mint pair"
            )));
        }
        let (pool_authority, _) = derive_pool_authority(&pool, &cfg.program_id);
        let (vault_a, _)        = derive_vault(&pool, VaultSide::A, &cfg.program_id);
        let (vault_b, _)        = derive_vault(&pool, VaultSide::B, &cfg.program_id);

        let ix = create_pool_ix(&cfg.program_id, &payer.pubkey(), &cfg.mint_a, &cfg.mint_b);
        let signature = self.sign_and_send("create_pool", ix).await?;

        Ok(CreatePoolResult {
            signature,
            pool,
            pool_authority,
            vault_a,
            vault_b,
            mint_a: cfg.mint_a,
            mint_b: cfg.mint_b,
        })
    }

    /// Deposit `amount_a` of token A and `amount_b` of token B.
    ///
    /// Source accounts are looked up among the signer's token accounts.
    pub async fn add_liquidity(&self, amount_a: u64, amount_b: u64) -> Result<LiquidityResult> {
        let payer = self.signer()?;
        require_nonzero("amount_a", amount_a)?;
        require_nonzero("amount_b", amount_b)?;

        let cfg = &self.config;
        let owner = payer.pubkey();
        let pool = cfg.pool_address();
        let token_a = self.find_token_account(&owner, &cfg.mint_a).await?;
        let token_b = self.find_token_account(&owner, &cfg.mint_b).await?;

        let ix = add_liquidity_ix(
            &cfg.program_id, &owner, &pool, &token_a, &token_b, amount_a, amount_b,
        );
        let signature = self.sign_and_send("add_liquidity", ix).await?;

        Ok(LiquidityResult {
            signature,
            pool,
            position: derive_position(&pool, &owner, &cfg.program_id).0,
            amount_a,
            amount_b,
        })
    }

    /// Burn `lp_amount` LP shares; withdrawn tokens go to the signer's ATAs.
    pub async fn remove_liquidity(&self, lp_amount: u64) -> Result<RemoveLiquidityResult> {
        let payer = self.signer()?;
        require_nonzero("lp_amount", lp_amount)?;

        let cfg = &self.config;
        let owner = payer.pubkey();
        let pool = cfg.pool_address();

        let ix = remove_liquidity_ix(
            &cfg.program_id,
            &owner,
            &pool,
            &derive_ata(&owner, &cfg.mint_a),
            &derive_ata(&owner, &cfg.mint_b),
            lp_amount,
        );
        let signature = self.sign_and_send("remove_liquidity", ix).await?;

        Ok(RemoveLiquidityResult {
            signature,
            pool,
            position: derive_position(&pool, &owner, &cfg.program_id).0,
            lp_amount,
        })
    }

    /// Sell `amount_a` of token A for at least `min_amount_b` of token B.
    pub async fn swap_a_to_b(&self, amount_a: u64, min_amount_b: u64) -> Result<SwapResult> {
        self.swap(SwapDirection::AToB, amount_a, min_amount_b).await
    }

    /// Sell `amount_b` of token B for at least `min_amount_a` of token A.
    pub async fn swap_b_to_a(&self, amount_b: u64, min_amount_a: u64) -> Result<SwapResult> {
        self.swap(SwapDirection::BToA, amount_b, min_amount_a).await
    }

    // ── Read operations ───────────────────────────────────────────────────────

    /// Sum `owner`'s token balances for both configured mints.
    pub async fn balances(&self, owner: &Pubkey) -> Result<Balances> {
        let token_a = self.total_balance(owner, &self.config.mint_a).await?;
        let token_b = self.total_balance(owner, &self.config.mint_b).await?;
        Ok(Balances { owner: *owner, token_a, token_b })
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn signer(&self) -> Result<&Keypair> {
        self.keypair.as_ref().ok_or(Error::WalletNotConnected)
    }

    async fn swap(
        &self,
        direction:      SwapDirection,
        amount_in:      u64,
        min_amount_out: u64,
    ) -> Result<SwapResult> {
        let payer = self.signer()?;
        require_nonzero("amount_in", amount_in)?;

        let cfg = &self.config;
        let owner = payer.pubkey();
        let pool = cfg.pool_address();
        let (mint_in, mint_out) = direction.mints(cfg.mint_a, cfg.mint_b);
        let token_in  = self.find_token_account(&owner, &mint_in).await?;
        let token_out = derive_ata(&owner, &mint_out);

        let ix = swap_ix(
            &cfg.program_id, &owner, &pool, &token_in, &token_out,
            direction, amount_in, min_amount_out,
        );
        let signature = self.sign_and_send(direction.ix_name(), ix).await?;

        Ok(SwapResult {
            signature,
            pool,
            direction,
            source_account: token_in,
            amount_in,
            min_amount_out,
        })
    }

    /// Sign `ix` with the loaded key as fee payer and confirm it.
    async fn sign_and_send(&self, label: &str, ix: Instruction) -> Result<Signature> {
        let payer = self.signer()?;
        debug!(label, accounts = ix.accounts.len(), data_len = ix.data.len(), "submitting");

        let blockhash = self.rpc.get_latest_blockhash().await?;
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );

        match self.rpc.send_and_confirm_transaction(&tx).await {
            Ok(sig) => {
                info!(label, %sig, "transaction confirmed");
                Ok(sig)
            }
            Err(err) => match err.get_transaction_error() {
                Some(tx_err) => {
                    warn!(label, error = %tx_err, "transaction failed on-chain");
                    Err(Error::TransactionFailed(tx_err))
                }
                None => Err(err.into()),
            },
        }
    }

    /// Find the token account `owner` spends `mint` from.
    async fn find_token_account(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
        let candidates = self
            .token_accounts(owner, mint)
            .await?
            .iter()
            .map(keyed_pubkey)
            .collect::<Result<Vec<_>>>()?;
        let chosen = pick_token_account(&candidates, &derive_ata(owner, mint))
            .ok_or(Error::NoTokenAccount { owner: *owner, mint: *mint })?;
        debug!(%owner, %mint, account = %chosen, candidates = candidates.len(), "token account resolved");
        Ok(chosen)
    }

    /// `owner`'s token accounts for `mint`, jsonParsed.
    async fn token_accounts(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Vec<RpcKeyedAccount>> {
        Ok(self
            .rpc
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::Mint(*mint))
            .await?)
    }

    /// One listing, so every amount comes from the same slot.
    async fn total_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<u64> {
        sum_token_amounts(&self.token_accounts(owner, mint).await?)
    }
}

// ─── Utilities ────────────────────────────────────────────────────────────────

/// Prefer the owner's ATA; otherwise the first account the node listed.
fn pick_token_account(candidates: &[Pubkey], ata: &Pubkey) -> Option<Pubkey> {
    candidates
        .iter()
        .find(|k| *k == ata)
        .or_else(|| candidates.first())
        .copied()
}

fn keyed_pubkey(keyed: &RpcKeyedAccount) -> Result<Pubkey> {
    Pubkey::from_str(&keyed.pubkey)
        .map_err(|_| Error::UnexpectedResponse(format!("token account key '{}'", keyed.pubkey)))
}

/// Read `info.tokenAmount.amount` from a jsonParsed SPL token account.
fn parsed_token_amount(keyed: &RpcKeyedAccount) -> Result<u64> {
    let amount = match &keyed.account.data {
        UiAccountData::Json(parsed) => parsed
            .parsed
            .get("info")
            .and_then(|info| info.get("tokenAmount"))
            .and_then(|t| t.get("amount"))
            .and_then(|a| a.as_str())
            .and_then(|a| a.parse::<u64>().ok()),
        _ => None,
    };
    amount.ok_or_else(|| {
        Error::UnexpectedResponse(format!("token amount missing for {}", keyed.pubkey))
    })
}

fn sum_token_amounts(accounts: &[RpcKeyedAccount]) -> Result<u64> {
    accounts
        .iter()
        .try_fold(0u64, |total, keyed| Ok(total.saturating_add(parsed_token_amount(keyed)?)))
}

fn require_nonzero(name: &str, amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(Error::InvalidArgument(format!("{name} must be greater than zero")));
    }
    Ok(())
}
