use shared::types::Amount;
use soroban_sdk::{contracttype, Address};

/// Immutable contract configuration written at initialization.
/// `max_tokens_per_holder` is the one field the owner may overwrite later.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenConfig {
    /// Pool owner: receives the full supply at init and sells from it.
    pub owner: Address,
    /// Token used for sale payments and dividend value.
    pub payment_token: Address,
    /// Destination for initial-offering proceeds. Never the owner.
    pub proceeds_account: Address,
    /// Fixed unit supply. No mint or burn after initialization.
    pub total_supply: Amount,
    /// Payment-token price of one unit on the initial offering.
    pub unit_price: Amount,
    /// Per-purchaser cumulative cap on units bought from the offering.
    pub max_tokens_per_holder: Amount,
}
