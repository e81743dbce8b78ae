use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use token_swap_kit::{wallet::DEFAULT_KEYPAIR_PATH, KitConfig, SwapKit, SwapResult};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ─── Version banner ───────────────────────────────────────────────────────────

/// Print the token-swap banner to stdout.
fn print_banner() {
    let ver = env!("CARGO_PKG_VERSION");
    println!();
    println!("  token-swap  v{ver}  ·  constant-product pool client for Solana");
    println!("  {}", "─".repeat(62));
    println!("  Config    token-swap.json  (override with --config / TOKEN_SWAP_CONFIG)");
    println!("  Wallet    {DEFAULT_KEYPAIR_PATH}");
    println!("  Logging   RUST_LOG=debug for per-request detail on stderr");
    println!();
}

// ─── CLI definition ───────────────────────────────────────────────────────────

/// token-swap — create, fund and trade against a token_swap pool.
///
/// Every command supports --json for machine-readable output.
/// Global options can also be set via environment variables:
///   TOKEN_SWAP_CONFIG   — pool config JSON
///   TOKEN_SWAP_RPC_URL  — Solana JSON-RPC endpoint (overrides the config file)
///   TOKEN_SWAP_KEYPAIR  — path to the signer's Ed25519 keypair JSON
#[derive(Parser)]
#[command(
    name    = "token-swap",
    version = env!("CARGO_PKG_VERSION"),
    about   = "Client for the token_swap constant-product pool program on Solana.",
    after_help = "\
CONFIG FILE:
  {
    \"rpc_url\":    \"https://api.devnet.solana.com\",
    \"program_id\": \"<program id>\",
    \"pool\":       \"<pool address, optional — defaults to the PDA for the pair>\",
    \"mint_a\":     \"<mint A>\",
    \"mint_b\":     \"<mint B>\",
    \"commitment\": \"confirmed\"
  }

QUICK START:
  token-swap create-pool
  token-swap add-liquidity --amount-a 1000000 --amount-b 2000000
  token-swap swap-a-to-b   --amount 10000 --min-out 19000
  token-swap balances --json"
)]
struct Cli {
    /// Pool config JSON file
    #[arg(
        long,
        global        = true,
        value_name    = "PATH",
        default_value = "token-swap.json",
        env           = "TOKEN_SWAP_CONFIG"
    )]
    config: String,

    /// Solana JSON-RPC endpoint; overrides `rpc_url` from the config file
    #[arg(long, global = true, value_name = "URL", env = "TOKEN_SWAP_RPC_URL")]
    rpc_url: Option<String>,

    /// Path to the signer's Ed25519 keypair JSON file
    #[arg(
        long,
        global        = true,
        value_name    = "PATH",
        default_value = DEFAULT_KEYPAIR_PATH,
        env           = "TOKEN_SWAP_KEYPAIR"
    )]
    keypair: String,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the pool for the configured mint pair
    ///
    /// The pool, its authority and both vaults are program-derived addresses.
    /// The new pool is empty; run `add-liquidity` to seed it.
    #[command(name = "create-pool")]
    CreatePool,

    /// Deposit token A and token B into the pool
    #[command(
        name = "add-liquidity",
        after_help = "\
EXAMPLES:
  token-swap add-liquidity --amount-a 1000000000 --amount-b 185000000

NOTES:
  Amounts are in atomic units. Source accounts are the signer's token
  accounts for each mint (the associated token account when present)."
    )]
    AddLiquidity {
        /// Amount of token A to deposit (atomic units)
        #[arg(long, value_name = "AMOUNT", value_parser = clap::value_parser!(u64).range(1..))]
        amount_a: u64,

        /// Amount of token B to deposit (atomic units)
        #[arg(long, value_name = "AMOUNT", value_parser = clap::value_parser!(u64).range(1..))]
        amount_b: u64,
    },

    /// Burn LP shares and withdraw both tokens
    #[command(name = "remove-liquidity")]
    RemoveLiquidity {
        /// Number of LP shares to burn
        #[arg(long, value_name = "SHARES", value_parser = clap::value_parser!(u64).range(1..))]
        amount: u64,
    },

    /// Sell token A for token B
    #[command(
        name = "swap-a-to-b",
        after_help = "\
EXAMPLES:
  # Sell 1 000 000 units of A, accept no less than 990 000 units of B
  token-swap swap-a-to-b --amount 1000000 --min-out 990000

  # No slippage floor
  token-swap swap-a-to-b --amount 1000000 --min-out 0"
    )]
    SwapAToB {
        /// Amount of token A to sell (atomic units)
        #[arg(long, value_name = "AMOUNT", value_parser = clap::value_parser!(u64).range(1..))]
        amount: u64,

        /// Minimum token B to receive; the program rejects the swap below this.
        /// 0 disables the floor.
        #[arg(long, value_name = "AMOUNT")]
        min_out: u64,
    },

    /// Sell token B for token A
    #[command(name = "swap-b-to-a")]
    SwapBToA {
        /// Amount of token B to sell (atomic units)
        #[arg(long, value_name = "AMOUNT", value_parser = clap::value_parser!(u64).range(1..))]
        amount: u64,

        /// Minimum token A to receive; 0 disables the floor
        #[arg(long, value_name = "AMOUNT")]
        min_out: u64,
    },

    /// Show token A / token B holdings of a wallet
    ///
    /// Read-only — no transaction is sent.
    Balances {
        /// Wallet to inspect; defaults to the keypair's address
        #[arg(long, value_name = "PUBKEY")]
        owner: Option<String>,
    },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // When invoked with no arguments, show banner + full help and exit cleanly.
    if std::env::args().len() == 1 {
        print_banner();
        Cli::command().print_long_help().ok();
        println!();
        return Ok(());
    }

    let cli = Cli::parse();
    init_logging();

    match &cli.command {
        Commands::CreatePool => cmd_create_pool(&cli).await,
        Commands::AddLiquidity { amount_a, amount_b } => {
            cmd_add_liquidity(&cli, *amount_a, *amount_b).await
        }
        Commands::RemoveLiquidity { amount } => cmd_remove_liquidity(&cli, *amount).await,
        Commands::SwapAToB { amount, min_out } => {
            let kit = signing_kit(&cli)?;
            let res = kit
                .swap_a_to_b(*amount, *min_out)
                .await
                .context("swap_a_to_b transaction failed")?;
            print_swap(&cli, "swap-a-to-b", &res);
            Ok(())
        }
        Commands::SwapBToA { amount, min_out } => {
            let kit = signing_kit(&cli)?;
            let res = kit
                .swap_b_to_a(*amount, *min_out)
                .await
                .context("swap_b_to_a transaction failed")?;
            print_swap(&cli, "swap-b-to-a", &res);
            Ok(())
        }
        Commands::Balances { owner } => cmd_balances(&cli, owner.as_deref()).await,
    }
}

/// Structured logs go to stderr so `--json` output on stdout stays parseable.
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ─── create-pool ─────────────────────────────────────────────────────────────

async fn cmd_create_pool(cli: &Cli) -> Result<()> {
    let kit = signing_kit(cli)?;
    let res = kit.create_pool().await.context("create_pool transaction failed")?;

    if cli.json {
        println!("{}", json!({
            "status":         "ok",
            "command":        "create-pool",
            "pool":           res.pool.to_string(),
            "pool_authority": res.pool_authority.to_string(),
            "vault_a":        res.vault_a.to_string(),
            "vault_b":        res.vault_b.to_string(),
            "mint_a":         res.mint_a.to_string(),
            "mint_b":         res.mint_b.to_string(),
            "tx":             res.signature.to_string(),
        }));
    } else {
        println!("─── Pool Created ─────────────────────────────────────────────────");
        println!("  Pool             {}", res.pool);
        println!("  Pool authority   {}", res.pool_authority);
        println!("  Mint A           {}", res.mint_a);
        println!("  Mint B           {}", res.mint_b);
        println!("  Vault A          {}", res.vault_a);
        println!("  Vault B          {}", res.vault_b);
        println!("  Transaction      {}", res.signature);
        println!();
        println!("  Seed it with:  token-swap add-liquidity --amount-a <A> --amount-b <B>");
    }
    Ok(())
}

// ─── add-liquidity ───────────────────────────────────────────────────────────

async fn cmd_add_liquidity(cli: &Cli, amount_a: u64, amount_b: u64) -> Result<()> {
    let kit = signing_kit(cli)?;
    let res = kit
        .add_liquidity(amount_a, amount_b)
        .await
        .context("add_liquidity transaction failed")?;

    if cli.json {
        println!("{}", json!({
            "status":   "ok",
            "command":  "add-liquidity",
            "pool":     res.pool.to_string(),
            "position": res.position.to_string(),
            "amount_a": res.amount_a,
            "amount_b": res.amount_b,
            "tx":       res.signature.to_string(),
        }));
    } else {
        println!("─── Liquidity Added ──────────────────────────────────────────────");
        println!("  Pool             {}", res.pool);
        println!("  Position         {}", res.position);
        println!("  Deposited A      {:>20}", res.amount_a);
        println!("  Deposited B      {:>20}", res.amount_b);
        println!("  Transaction      {}", res.signature);
    }
    Ok(())
}

// ─── remove-liquidity ────────────────────────────────────────────────────────

async fn cmd_remove_liquidity(cli: &Cli, amount: u64) -> Result<()> {
    let kit = signing_kit(cli)?;
    let res = kit
        .remove_liquidity(amount)
        .await
        .context("remove_liquidity transaction failed")?;

    if cli.json {
        println!("{}", json!({
            "status":    "ok",
            "command":   "remove-liquidity",
            "pool":      res.pool.to_string(),
            "position":  res.position.to_string(),
            "lp_amount": res.lp_amount,
            "tx":        res.signature.to_string(),
        }));
    } else {
        println!("─── Liquidity Removed ────────────────────────────────────────────");
        println!("  Pool             {}", res.pool);
        println!("  Position         {}", res.position);
        println!("  LP shares burned {:>20}", res.lp_amount);
        println!("  Transaction      {}", res.signature);
    }
    Ok(())
}

// ─── swap-a-to-b / swap-b-to-a ───────────────────────────────────────────────

fn print_swap(cli: &Cli, command: &str, res: &SwapResult) {
    if cli.json {
        println!("{}", json!({
            "status":         "ok",
            "command":        command,
            "pool":           res.pool.to_string(),
            "direction":      res.direction.to_string(),
            "source_account": res.source_account.to_string(),
            "amount_in":      res.amount_in,
            "min_amount_out": res.min_amount_out,
            "tx":             res.signature.to_string(),
        }));
    } else {
        let floor = if res.min_amount_out == 0 {
            "none".to_string()
        } else {
            res.min_amount_out.to_string()
        };
        println!("─── Swap Executed ────────────────────────────────────────────────");
        println!("  Pool             {}", res.pool);
        println!("  Direction        {}", res.direction);
        println!("  Source account   {}", res.source_account);
        println!("  Sold             {:>20}", res.amount_in);
        println!("  Minimum out      {:>20}", floor);
        println!("  Transaction      {}", res.signature);
    }
}

// ─── balances ────────────────────────────────────────────────────────────────

async fn cmd_balances(cli: &Cli, owner: Option<&str>) -> Result<()> {
    let mut kit = load_kit(cli)?;
    let owner = match owner {
        Some(s) => Pubkey::from_str(s)
            .map_err(|_| anyhow!("--owner '{s}' is not a base-58 public key"))?,
        None => kit
            .set_keypair_from_wallet(&cli.keypair)
            .context("Pass --owner or point --keypair / TOKEN_SWAP_KEYPAIR at a wallet")?,
    };

    let bal = kit
        .balances(&owner)
        .await
        .context("Failed to query token balances — check your RPC endpoint")?;

    if cli.json {
        println!("{}", json!({
            "status":  "ok",
            "command": "balances",
            "owner":   bal.owner.to_string(),
            "mint_a":  kit.config().mint_a.to_string(),
            "mint_b":  kit.config().mint_b.to_string(),
            "token_a": bal.token_a,
            "token_b": bal.token_b,
        }));
    } else {
        println!("─── Balances ─────────────────────────────────────────────────────");
        println!("  Owner            {}", bal.owner);
        println!("  Token A          {:>20}  ({})", bal.token_a, kit.config().mint_a);
        println!("  Token B          {:>20}  ({})", bal.token_b, kit.config().mint_b);
    }
    Ok(())
}

// ─── Shared utilities ─────────────────────────────────────────────────────────

/// Load the config file and apply the `--rpc-url` override.
fn load_config(cli: &Cli) -> Result<KitConfig> {
    let config = KitConfig::from_file(&cli.config).with_context(|| {
        format!(
            "Failed to load config '{}'.\n  \
             Set TOKEN_SWAP_CONFIG or pass --config to use a different file.",
            cli.config
        )
    })?;
    debug!(path = %cli.config, pool = %config.pool_address(), "config loaded");
    Ok(match &cli.rpc_url {
        Some(url) => config.with_rpc_url(url.as_str()),
        None => config,
    })
}

fn load_kit(cli: &Cli) -> Result<SwapKit> {
    Ok(SwapKit::from_config(load_config(cli)?))
}

/// A kit with the signer loaded from `--keypair`.
fn signing_kit(cli: &Cli) -> Result<SwapKit> {
    let mut kit = load_kit(cli)?;
    kit.set_keypair_from_wallet(&cli.keypair)
        .context("Set TOKEN_SWAP_KEYPAIR or pass --keypair to specify a different path.")?;
    Ok(kit)
}
