use assert_cmd::Command;
use predicates::str::contains;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{write_keypair_file, Keypair},
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Nothing listens on the discard port; commands reaching the network fail fast.
const DEAD_RPC: &str = "http://127.0.0.1:9";

struct TestEnv {
    tmp: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self { tmp: TempDir::new().expect("create temp dir") }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    fn write_config(&self, mint_a: &Pubkey, mint_b: &Pubkey) -> PathBuf {
        let path = self.path("token-swap.json");
        let body = format!(
            r#"{{
  "rpc_url":    "{DEAD_RPC}",
  "program_id": "{}",
  "mint_a":     "{mint_a}",
  "mint_b":     "{mint_b}"
}}"#,
            Pubkey::new_unique()
        );
        fs::write(&path, body).expect("write config");
        path
    }

    fn write_keypair(&self) -> PathBuf {
        let path = self.path("id.json");
        write_keypair_file(&Keypair::new(), &path).expect("write keypair");
        path
    }

    fn cmd(&self, config: &Path, keypair: &Path) -> Command {
        let mut cmd = Command::cargo_bin("token-swap").unwrap();
        cmd.env_remove("TOKEN_SWAP_RPC_URL")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(config)
            .arg("--keypair")
            .arg(keypair);
        cmd
    }
}

#[test]
fn no_args_prints_banner() {
    Command::cargo_bin("token-swap")
        .unwrap()
        .assert()
        .success()
        .stdout(contains("token-swap"))
        .stdout(contains("swap-a-to-b"));
}

#[test]
fn help_lists_every_operation() {
    let out = Command::cargo_bin("token-swap").unwrap().arg("--help").output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    for sub in ["create-pool", "add-liquidity", "remove-liquidity", "swap-a-to-b", "swap-b-to-a", "balances"] {
        assert!(text.contains(sub), "help is missing `{sub}`");
    }
}

#[test]
fn missing_config_is_reported() {
    let env = TestEnv::new();
    env.cmd(&env.path("absent.json"), &env.path("id.json"))
        .arg("create-pool")
        .assert()
        .failure()
        .stderr(contains("Failed to load config"));
}

#[test]
fn identical_mints_are_rejected() {
    let env = TestEnv::new();
    let mint = Pubkey::new_unique();
    let config = env.write_config(&mint, &mint);
    env.cmd(&config, &env.write_keypair())
        .arg("create-pool")
        .assert()
        .failure()
        .stderr(contains("must differ"));
}

#[test]
fn missing_wallet_is_reported() {
    let env = TestEnv::new();
    let config = env.write_config(&Pubkey::new_unique(), &Pubkey::new_unique());
    env.cmd(&config, &env.path("no-wallet.json"))
        .args(["swap-a-to-b", "--amount", "10", "--min-out", "0"])
        .assert()
        .failure()
        .stderr(contains("Cannot load keypair"));
}

#[test]
fn zero_amount_is_a_usage_error() {
    let env = TestEnv::new();
    let config = env.write_config(&Pubkey::new_unique(), &Pubkey::new_unique());
    env.cmd(&config, &env.write_keypair())
        .args(["add-liquidity", "--amount-a", "0", "--amount-b", "5"])
        .assert()
        .failure()
        .stderr(contains("--amount-a"));
}

#[test]
fn bad_owner_is_rejected() {
    let env = TestEnv::new();
    let config = env.write_config(&Pubkey::new_unique(), &Pubkey::new_unique());
    env.cmd(&config, &env.path("unused.json"))
        .args(["balances", "--owner", "not-a-key"])
        .assert()
        .failure()
        .stderr(contains("not a base-58 public key"));
}

#[test]
fn unreachable_rpc_fails_with_context() {
    let env = TestEnv::new();
    let config = env.write_config(&Pubkey::new_unique(), &Pubkey::new_unique());
    env.cmd(&config, &env.write_keypair())
        .arg("create-pool")
        .assert()
        .failure()
        .stderr(contains("create_pool transaction failed"));
}

#[test]
fn balances_reports_rpc_failure() {
    let env = TestEnv::new();
    let config = env.write_config(&Pubkey::new_unique(), &Pubkey::new_unique());
    env.cmd(&config, &env.write_keypair())
        .args(["--rpc-url", "http://127.0.0.1:1", "--json", "balances"])
        .assert()
        .failure()
        .stderr(contains("Failed to query token balances"));
}
