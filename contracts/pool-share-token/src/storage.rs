use shared::errors::Error;
use shared::types::{Amount, PendingUpgrade};
use soroban_sdk::{Address, Env, Vec};

use crate::types::TokenConfig;

/// Storage keys for ledger and sale data structures
const CONFIG_KEY: &str = "config";
const SALE_OPEN_KEY: &str = "sale_open";
const HOLDERS_KEY: &str = "holders";
const BALANCE_PREFIX: &str = "balance";
const PURCHASED_PREFIX: &str = "purchased";

// Dividend storage keys
const DIVIDEND_PREFIX: &str = "dividend";
const DIVIDENDS_IN_KEY: &str = "div_in";
const DIVIDENDS_OUT_KEY: &str = "div_out";

// Upgrade storage key
const PENDING_UPGRADE_KEY: &str = "upg_hash";

/// Store the contract configuration
pub fn set_config(env: &Env, config: &TokenConfig) {
    env.storage().instance().set(&CONFIG_KEY, config);
}

/// Retrieve the contract configuration
pub fn get_config(env: &Env) -> Result<TokenConfig, Error> {
    env.storage()
        .instance()
        .get::<&str, TokenConfig>(&CONFIG_KEY)
        .ok_or(Error::NotInit)
}

/// Check if the contract has been initialized
pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG_KEY)
}

/// Store whether the primary sale window is open
pub fn set_sale_open(env: &Env, open: bool) {
    env.storage().instance().set(&SALE_OPEN_KEY, &open);
}

/// Retrieve whether the primary sale window is open
pub fn is_sale_open(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<&str, bool>(&SALE_OPEN_KEY)
        .unwrap_or(false)
}

/// Store a unit balance
pub fn set_balance(env: &Env, id: &Address, balance: Amount) {
    let key = (BALANCE_PREFIX, id.clone());
    env.storage().persistent().set(&key, &balance);
}

/// Retrieve a unit balance, 0 for unknown identities
pub fn get_balance(env: &Env, id: &Address) -> Amount {
    let key = (BALANCE_PREFIX, id.clone());
    env.storage()
        .persistent()
        .get::<(&str, Address), Amount>(&key)
        .unwrap_or(0)
}

/// Retrieve the holder index (identities with balance > 0)
pub fn get_holders(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get::<&str, Vec<Address>>(&HOLDERS_KEY)
        .unwrap_or(Vec::new(env))
}

/// Store the holder index
pub fn set_holders(env: &Env, holders: &Vec<Address>) {
    env.storage().persistent().set(&HOLDERS_KEY, holders);
}

/// Keep the holder index in step with a freshly written balance.
/// Insert and remove are both idempotent so either side of a transfer may
/// cross the zero boundary without special casing.
pub fn sync_holder(env: &Env, id: &Address, new_balance: Amount) {
    let mut holders = get_holders(env);
    let index = holders.first_index_of(id.clone());

    if new_balance > 0 {
        if index.is_none() {
            holders.push_back(id.clone());
            set_holders(env, &holders);
        }
    } else if let Some(index) = index {
        holders.remove(index);
        set_holders(env, &holders);
    }
}

/// Store units purchased on the initial offering by an identity
pub fn set_purchased(env: &Env, id: &Address, units: Amount) {
    let key = (PURCHASED_PREFIX, id.clone());
    env.storage().persistent().set(&key, &units);
}

/// Retrieve units purchased on the initial offering by an identity
pub fn get_purchased(env: &Env, id: &Address) -> Amount {
    let key = (PURCHASED_PREFIX, id.clone());
    env.storage()
        .persistent()
        .get::<(&str, Address), Amount>(&key)
        .unwrap_or(0)
}

// ==================== Dividend Storage ====================

/// Store an identity's claimable dividend accrual
pub fn set_dividend(env: &Env, id: &Address, amount: Amount) {
    let key = (DIVIDEND_PREFIX, id.clone());
    env.storage().persistent().set(&key, &amount);
}

/// Retrieve an identity's claimable dividend accrual
pub fn get_dividend(env: &Env, id: &Address) -> Amount {
    let key = (DIVIDEND_PREFIX, id.clone());
    env.storage()
        .persistent()
        .get::<(&str, Address), Amount>(&key)
        .unwrap_or(0)
}

/// Retrieve the running total of value ever deposited for distribution
pub fn get_dividends_in(env: &Env) -> Amount {
    env.storage()
        .persistent()
        .get::<&str, Amount>(&DIVIDENDS_IN_KEY)
        .unwrap_or(0)
}

/// Update the running total of value ever deposited for distribution
pub fn set_dividends_in(env: &Env, amount: Amount) {
    env.storage().persistent().set(&DIVIDENDS_IN_KEY, &amount);
}

/// Retrieve the running total of value ever claimed
pub fn get_dividends_out(env: &Env) -> Amount {
    env.storage()
        .persistent()
        .get::<&str, Amount>(&DIVIDENDS_OUT_KEY)
        .unwrap_or(0)
}

/// Update the running total of value ever claimed
pub fn set_dividends_out(env: &Env, amount: Amount) {
    env.storage().persistent().set(&DIVIDENDS_OUT_KEY, &amount);
}

// ==================== Upgrade Storage ====================

/// Store a pending upgrade
pub fn set_pending_upgrade(env: &Env, pending: &PendingUpgrade) {
    env.storage().instance().set(&PENDING_UPGRADE_KEY, pending);
}

/// Retrieve the pending upgrade, if any
pub fn get_pending_upgrade(env: &Env) -> Option<PendingUpgrade> {
    env.storage()
        .instance()
        .get::<&str, PendingUpgrade>(&PENDING_UPGRADE_KEY)
}

/// Check if an upgrade is scheduled
pub fn has_pending_upgrade(env: &Env) -> bool {
    env.storage().instance().has(&PENDING_UPGRADE_KEY)
}

/// Remove the pending upgrade
pub fn clear_pending_upgrade(env: &Env) {
    env.storage().instance().remove(&PENDING_UPGRADE_KEY);
}
