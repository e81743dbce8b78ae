//! Keypair loading from Solana CLI wallet files.

use solana_sdk::signature::{read_keypair_file, Keypair};

use crate::error::{Error, Result};

/// Where `solana-keygen new` writes the default wallet.
pub const DEFAULT_KEYPAIR_PATH: &str = "~/.config/solana/id.json";

/// Expand `~/` to `$HOME/` in keypair paths. Without `HOME` the path is left as-is.
pub fn expand_home(path: &str) -> String {
    expand_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_with(path: &str, home: Option<&str>) -> String {
    match (path.strip_prefix("~/"), home.filter(|h| !h.is_empty())) {
        (Some(rest), Some(home)) => format!("{}/{rest}", home.trim_end_matches('/')),
        _ => path.to_string(),
    }
}

/// Load an Ed25519 keypair from a JSON byte-array file.
pub fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded = expand_home(path);
    read_keypair_file(&expanded).map_err(|e| Error::Keypair {
        path:   expanded,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::{write_keypair_file, Signer};

    #[test]
    fn loads_keypair_written_by_solana_tooling() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let kp   = Keypair::new();
        write_keypair_file(&kp, &path).unwrap();

        let loaded = load_keypair(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.pubkey(), kp.pubkey());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_keypair("/no/such/wallet.json").unwrap_err();
        match err {
            Error::Keypair { path, .. } => assert_eq!(path, "/no/such/wallet.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn garbage_file_is_rejected() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(load_keypair(path.to_str().unwrap()), Err(Error::Keypair { .. })));
    }

    #[test]
    fn only_leading_tilde_is_expanded() {
        assert_eq!(expand_with("/abs/id.json", Some("/home/me")), "/abs/id.json");
        assert_eq!(expand_with("rel/~/id.json", Some("/home/me")), "rel/~/id.json");
        assert_eq!(expand_with("~/id.json", Some("/home/me")), "/home/me/id.json");
        assert_eq!(expand_with("~/id.json", Some("/home/me/")), "/home/me/id.json");
    }

    #[test]
    fn tilde_stays_when_home_is_unknown() {
        assert_eq!(expand_with("~/.config/solana/id.json", None), "~/.config/solana/id.json");
        assert_eq!(expand_with("~/id.json", Some("")), "~/id.json");

        let err = load_keypair("~/surely-missing-wallet.json").unwrap_err();
        assert!(matches!(err, Error::Keypair { path, .. } if path.ends_with("/surely-missing-wallet.json")));
    }
}
