//! Low-level Anchor instruction builders for the `token_swap` program.
//!
//! Each function constructs a [`solana_sdk::instruction::Instruction`] ready
//! for signing and submission.  Account order follows the program's
//! `#[derive(Accounts)]` structs.
//!
//! Anchor instruction discriminators: `sha256("global:{name}")[..8]`.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey,
    pubkey::Pubkey,
    sysvar,
};

// ─── Well-known program IDs ───────────────────────────────────────────────────

pub const SPL_TOKEN_ID:      Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ATA_PROGRAM_ID:    Pubkey = pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");

// ─── PDA seeds ────────────────────────────────────────────────────────────────

pub const POOL_SEED:           &[u8] = b"pool";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const VAULT_A_SEED:        &[u8] = b"vault_a";
pub const VAULT_B_SEED:        &[u8] = b"vault_b";
pub const POSITION_SEED:       &[u8] = b"position";

// ─── Direction ────────────────────────────────────────────────────────────────

/// Which side of the pool a swap sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    /// Sell token A, receive token B.
    AToB,
    /// Sell token B, receive token A.
    BToA,
}

impl SwapDirection {
    /// On-chain instruction name for this direction.
    pub fn ix_name(self) -> &'static str {
        match self {
            SwapDirection::AToB => "swap_a_to_b",
            SwapDirection::BToA => "swap_b_to_a",
        }
    }

    /// `(mint_in, mint_out)` for a pool holding `mint_a` / `mint_b`.
    pub fn mints(self, mint_a: Pubkey, mint_b: Pubkey) -> (Pubkey, Pubkey) {
        match self {
            SwapDirection::AToB => (mint_a, mint_b),
            SwapDirection::BToA => (mint_b, mint_a),
        }
    }
}

impl std::fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SwapDirection::AToB => "a_to_b",
            SwapDirection::BToA => "b_to_a",
        })
    }
}

/// Pool vault side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultSide {
    A,
    B,
}

// ─── PDA derivation helpers ───────────────────────────────────────────────────

/// Derive the pool PDA for the given mint pair.
pub fn derive_pool(mint_a: &Pubkey, mint_b: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POOL_SEED, mint_a.as_ref(), mint_b.as_ref()],
        program_id,
    )
}

/// Derive the pool-authority PDA that signs for vault transfers.
pub fn derive_pool_authority(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_AUTHORITY_SEED, pool.as_ref()], program_id)
}

/// Derive one of the pool's two token vaults.
pub fn derive_vault(pool: &Pubkey, side: VaultSide, program_id: &Pubkey) -> (Pubkey, u8) {
    let seed = match side {
        VaultSide::A => VAULT_A_SEED,
        VaultSide::B => VAULT_B_SEED,
    };
    Pubkey::find_program_address(&[seed, pool.as_ref()], program_id)
}

/// Derive the per-provider position PDA for a pool.
pub fn derive_position(pool: &Pubkey, owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POSITION_SEED, pool.as_ref(), owner.as_ref()],
        program_id,
    )
}

/// Derive the Associated Token Account for a wallet + mint.
pub fn derive_ata(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[wallet.as_ref(), SPL_TOKEN_ID.as_ref(), mint.as_ref()],
        &ATA_PROGRAM_ID,
    )
    .0
}

// ─── Discriminator ────────────────────────────────────────────────────────────

pub(crate) fn disc(name: &str) -> [u8; 8] {
    let h = solana_sdk::hash::hash(format!("global:{name}").as_bytes());
    let mut d = [0u8; 8];
    d.copy_from_slice(&h.to_bytes()[..8]);
    d
}

fn ix_data(name: &str, args: &[u64]) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + args.len() * 8);
    data.extend_from_slice(&disc(name));
    for arg in args {
        data.extend_from_slice(&arg.to_le_bytes());
    }
    data
}

// ─── create_pool ──────────────────────────────────────────────────────────────

/// Build the `create_pool` instruction.
///
/// The pool, its authority and both vaults are PDAs, so `creator` is the only
/// signer.
pub fn create_pool_ix(
    program_id: &Pubkey,
    creator:    &Pubkey,
    mint_a:     &Pubkey,
    mint_b:     &Pubkey,
) -> Instruction {
    let (pool, _)           = derive_pool(mint_a, mint_b, program_id);
    let (pool_authority, _) = derive_pool_authority(&pool, program_id);
    let (vault_a, _)        = derive_vault(&pool, VaultSide::A, program_id);
    let (vault_b, _)        = derive_vault(&pool, VaultSide::B, program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*creator,                true),   // mut + signer
            AccountMeta::new_readonly(*mint_a,        false),
            AccountMeta::new_readonly(*mint_b,        false),
            AccountMeta::new(pool,                    false),  // mut PDA (init)
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(vault_a,                 false),  // mut PDA (init)
            AccountMeta::new(vault_b,                 false),  // mut PDA (init)
            AccountMeta::new_readonly(SPL_TOKEN_ID,   false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data: ix_data("create_pool", &[]),
    }
}

// ─── add_liquidity ────────────────────────────────────────────────────────────

/// Build the `add_liquidity` instruction.
///
/// `provider_token_a` / `provider_token_b` must hold the pool's mint A / mint B
/// and be owned by `provider`.
pub fn add_liquidity_ix(
    program_id:       &Pubkey,
    provider:         &Pubkey,
    pool:             &Pubkey,
    provider_token_a: &Pubkey,
    provider_token_b: &Pubkey,
    amount_a:         u64,
    amount_b:         u64,
) -> Instruction {
    let (pool_authority, _) = derive_pool_authority(pool, program_id);
    let (position, _)       = derive_position(pool, provider, program_id);
    let (vault_a, _)        = derive_vault(pool, VaultSide::A, program_id);
    let (vault_b, _)        = derive_vault(pool, VaultSide::B, program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*provider,               true),   // mut + signer
            AccountMeta::new(*pool,                   false),  // mut
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(position,                false),  // mut PDA (init_if_needed)
            AccountMeta::new(vault_a,                 false),
            AccountMeta::new(vault_b,                 false),
            AccountMeta::new(*provider_token_a,       false),
            AccountMeta::new(*provider_token_b,       false),
            AccountMeta::new_readonly(SPL_TOKEN_ID,   false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data: ix_data("add_liquidity", &[amount_a, amount_b]),
    }
}

// ─── remove_liquidity ─────────────────────────────────────────────────────────

/// Build the `remove_liquidity` instruction, burning `lp_amount` shares.
///
/// Withdrawn tokens land in `provider_token_a` / `provider_token_b`.
pub fn remove_liquidity_ix(
    program_id:       &Pubkey,
    provider:         &Pubkey,
    pool:             &Pubkey,
    provider_token_a: &Pubkey,
    provider_token_b: &Pubkey,
    lp_amount:        u64,
) -> Instruction {
    let (pool_authority, _) = derive_pool_authority(pool, program_id);
    let (position, _)       = derive_position(pool, provider, program_id);
    let (vault_a, _)        = derive_vault(pool, VaultSide::A, program_id);
    let (vault_b, _)        = derive_vault(pool, VaultSide::B, program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*provider,               true),
            AccountMeta::new(*pool,                   false),
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(position,                false),
            AccountMeta::new(vault_a,                 false),
            AccountMeta::new(vault_b,                 false),
            AccountMeta::new(*provider_token_a,       false),
            AccountMeta::new(*provider_token_b,       false),
            AccountMeta::new_readonly(SPL_TOKEN_ID,   false),
        ],
        data: ix_data("remove_liquidity", &[lp_amount]),
    }
}

// ─── swap ─────────────────────────────────────────────────────────────────────

/// Build a `swap_a_to_b` or `swap_b_to_a` instruction.
///
/// Pass the pool's vaults in A/B order regardless of direction; the
/// instruction name tells the program which way tokens move.
/// `min_amount_out = 0` disables the on-chain slippage floor.
#[allow(clippy::too_many_arguments)]
pub fn swap_ix(
    program_id:       &Pubkey,
    trader:           &Pubkey,
    pool:             &Pubkey,
    trader_token_in:  &Pubkey,
    trader_token_out: &Pubkey,
    direction:        SwapDirection,
    amount_in:        u64,
    min_amount_out:   u64,
) -> Instruction {
    let (pool_authority, _) = derive_pool_authority(pool, program_id);
    let (vault_a, _)        = derive_vault(pool, VaultSide::A, program_id);
    let (vault_b, _)        = derive_vault(pool, VaultSide::B, program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*trader,                 true),
            AccountMeta::new(*pool,                   false),
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(vault_a,                 false),
            AccountMeta::new(vault_b,                 false),
            AccountMeta::new(*trader_token_in,        false),
            AccountMeta::new(*trader_token_out,       false),
            AccountMeta::new_readonly(SPL_TOKEN_ID,   false),
        ],
        data: ix_data(direction.ix_name(), &[amount_in, min_amount_out]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminator_is_sha256_prefix() {
        let full = solana_sdk::hash::hash(b"global:create_pool").to_bytes();
        assert_eq!(disc("create_pool"), full[..8]);
        assert_ne!(disc("swap_a_to_b"), disc("swap_b_to_a"));
    }

    #[test]
    fn create_pool_has_no_args_and_one_signer() {
        let (program, creator) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mint_a, mint_b)   = (Pubkey::new_unique(), Pubkey::new_unique());
        let ix = create_pool_ix(&program, &creator, &mint_a, &mint_b);

        assert_eq!(ix.program_id, program);
        assert_eq!(ix.data, disc("create_pool").to_vec());
        assert_eq!(ix.accounts.len(), 10);
        let signers: Vec<_> = ix.accounts.iter().filter(|m| m.is_signer).collect();
        assert_eq!(signers.len(), 1);
        assert_eq!(signers[0].pubkey, creator);
        assert_eq!(ix.accounts[3].pubkey, derive_pool(&mint_a, &mint_b, &program).0);
    }

    #[test]
    fn add_liquidity_encodes_both_amounts() {
        let (program, provider, pool) =
            (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let (ta, tb) = (Pubkey::new_unique(), Pubkey::new_unique());
        let ix = add_liquidity_ix(&program, &provider, &pool, &ta, &tb, 1_000, 2_500);

        assert_eq!(&ix.data[..8], &disc("add_liquidity"));
        assert_eq!(&ix.data[8..16], &1_000u64.to_le_bytes());
        assert_eq!(&ix.data[16..24], &2_500u64.to_le_bytes());
        assert_eq!(ix.accounts[3].pubkey, derive_position(&pool, &provider, &program).0);
        assert_eq!(ix.accounts[6].pubkey, ta);
        assert_eq!(ix.accounts[7].pubkey, tb);
    }

    #[test]
    fn remove_liquidity_encodes_lp_amount() {
        let (program, provider, pool) =
            (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let ix = remove_liquidity_ix(
            &program, &provider, &pool, &Pubkey::new_unique(), &Pubkey::new_unique(), 42,
        );
        assert_eq!(ix.data.len(), 16);
        assert_eq!(&ix.data[8..], &42u64.to_le_bytes());
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
    }

    #[test]
    fn swap_direction_picks_instruction_name() {
        let (program, trader, pool) =
            (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let (tin, tout) = (Pubkey::new_unique(), Pubkey::new_unique());

        let a_to_b = swap_ix(&program, &trader, &pool, &tin, &tout, SwapDirection::AToB, 7, 3);
        let b_to_a = swap_ix(&program, &trader, &pool, &tin, &tout, SwapDirection::BToA, 7, 3);

        assert_eq!(&a_to_b.data[..8], &disc("swap_a_to_b"));
        assert_eq!(&b_to_a.data[..8], &disc("swap_b_to_a"));
        assert_eq!(a_to_b.data[8..], b_to_a.data[8..]);
        // Vault order never flips.
        assert_eq!(a_to_b.accounts[3].pubkey, b_to_a.accounts[3].pubkey);
    }

    #[test]
    fn direction_orders_mints() {
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(SwapDirection::AToB.mints(a, b), (a, b));
        assert_eq!(SwapDirection::BToA.mints(a, b), (b, a));
    }

    #[test]
    fn vaults_are_distinct_per_side() {
        let (program, pool) = (Pubkey::new_unique(), Pubkey::new_unique());
        assert_ne!(
            derive_vault(&pool, VaultSide::A, &program).0,
            derive_vault(&pool, VaultSide::B, &program).0,
        );
    }
}
