use soroban_sdk::{contracttype, BytesN};

/// Token and payment amounts. Soroban token convention: i128, with all
/// externally supplied values validated strictly positive on input.
pub type Amount = i128;

/// A scheduled, time-locked contract upgrade.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingUpgrade {
    pub wasm_hash: BytesN<32>,
    pub execute_not_before: u64,
}
