#![no_std]

use shared::{
    constants::UPGRADE_TIME_LOCK_SECS,
    errors::Error,
    events::*,
    types::{Amount, PendingUpgrade},
};
use soroban_sdk::{
    contract, contractimpl, contractmeta, token::TokenClient, Address, BytesN, Env, Vec,
};
use soroban_token_sdk::TokenUtils;

mod storage;
mod types;


use storage::*;
use types::TokenConfig;

contractmeta!(key = "name", val = "Pool Share Token Contract");

#[contract]
pub struct PoolShareToken;

#[contractimpl]
impl PoolShareToken {
    /// Initialize the pool-share ledger and assign the full supply to `owner`
    ///
    /// # Arguments
    /// * `owner` - Pool owner; receives the full supply and holds policy rights
    /// * `payment_token` - Token used for sale payments and dividend value
    /// * `proceeds_account` - Destination for initial-offering revenue
    /// * `total_supply` - Fixed unit supply, never minted or burned afterwards
    /// * `unit_price` - Payment-token price of one unit on the offering
    /// * `max_tokens_per_holder` - Per-purchaser cap on offering purchases
    ///
    /// # Errors
    /// * `AlreadyInit` - Contract was already initialized
    /// * `InvInput` - Non-positive supply, price or cap, or proceeds == owner
    pub fn initialize(
        env: Env,
        owner: Address,
        payment_token: Address,
        proceeds_account: Address,
        total_supply: Amount,
        unit_price: Amount,
        max_tokens_per_holder: Amount,
    ) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInit);
        }
        owner.require_auth();

        if total_supply <= 0 || unit_price <= 0 || max_tokens_per_holder <= 0 {
            return Err(Error::InvInput);
        }
        if proceeds_account == owner {
            return Err(Error::InvInput);
        }

        let config = TokenConfig {
            owner: owner.clone(),
            payment_token,
            proceeds_account,
            total_supply,
            unit_price,
            max_tokens_per_holder,
        };
        set_config(&env, &config);

        // Owner is the sole initial holder
        set_balance(&env, &owner, total_supply);
        sync_holder(&env, &owner, total_supply);

        // Offering opens at construction; the owner may toggle it later
        set_sale_open(&env, true);

        TokenUtils::new(&env)
            .events()
            .mint(owner.clone(), owner.clone(), total_supply);
        env.events()
            .publish((TOKEN_INITIALIZED,), (owner, total_supply));

        Ok(())
    }

    /// Move units between two identities
    ///
    /// # Arguments
    /// * `from` - Sender, must authorize the call
    /// * `to` - Recipient
    /// * `amount` - Units to move, must be positive
    ///
    /// # Errors
    /// * `InvInput` - Non-positive amount or self-transfer
    /// * `InsufBalance` - Sender balance is below `amount`
    pub fn transfer(env: Env, from: Address, to: Address, amount: Amount) -> Result<(), Error> {
        from.require_auth();
        get_config(&env)?;

        if amount <= 0 || to == from {
            return Err(Error::InvInput);
        }

        let from_balance = get_balance(&env, &from);
        if from_balance < amount {
            return Err(Error::InsufBalance);
        }

        let to_balance = get_balance(&env, &to)
            .checked_add(amount)
            .ok_or(Error::InvInput)?;
        let from_balance = from_balance - amount;

        // Balance writes and holder-index maintenance happen together so no
        // observer sees the index disagree with the balances
        set_balance(&env, &from, from_balance);
        sync_holder(&env, &from, from_balance);
        set_balance(&env, &to, to_balance);
        sync_holder(&env, &to, to_balance);

        TokenUtils::new(&env).events().transfer(from, to, amount);

        Ok(())
    }

    /// Get a unit balance; unknown identities read as 0
    pub fn balance_of(env: Env, id: Address) -> Amount {
        get_balance(&env, &id)
    }

    /// Get the number of identities holding a nonzero balance
    pub fn number_of_token_holders(env: Env) -> u32 {
        get_holders(&env).len()
    }

    /// Get the current holders. Iteration order is not a contract.
    pub fn token_holders(env: Env) -> Vec<Address> {
        get_holders(&env)
    }

    /// Buy units from the pool owner's balance on the initial offering
    ///
    /// `paid_value` is converted to units at `unit_price` with integer
    /// division; any remainder is kept by the proceeds account, not refunded.
    ///
    /// # Arguments
    /// * `buyer` - Purchaser, must authorize the call
    /// * `paid_value` - Payment-token value attached to the purchase
    ///
    /// # Errors
    /// * `SaleClosed` - Offering window is closed
    /// * `InvInput` - Non-positive value, value below one unit's price, or
    ///   the owner buying from its own pool
    /// * `PurchaseLim` - Purchase limit exceeds allowable token balance per holder
    /// * `InsufBalance` - Owner's remaining pool balance is short
    pub fn buy_on_initial_offering(
        env: Env,
        buyer: Address,
        paid_value: Amount,
    ) -> Result<(), Error> {
        buyer.require_auth();
        let config = get_config(&env)?;

        if !is_sale_open(&env) {
            return Err(Error::SaleClosed);
        }
        // The debit and credit below alias the same balance slot if the
        // owner buys from itself, which would inflate the supply
        if paid_value <= 0 || buyer == config.owner {
            return Err(Error::InvInput);
        }

        let units = paid_value / config.unit_price;
        if units == 0 {
            return Err(Error::InvInput);
        }

        let purchased = get_purchased(&env, &buyer)
            .checked_add(units)
            .ok_or(Error::InvInput)?;
        if purchased > config.max_tokens_per_holder {
            return Err(Error::PurchaseLim);
        }

        let owner_balance = get_balance(&env, &config.owner);
        if owner_balance < units {
            return Err(Error::InsufBalance);
        }

        let buyer_balance = get_balance(&env, &buyer)
            .checked_add(units)
            .ok_or(Error::InvInput)?;
        let owner_balance = owner_balance - units;

        // Effects before the external payment transfer
        set_balance(&env, &config.owner, owner_balance);
        sync_holder(&env, &config.owner, owner_balance);
        set_balance(&env, &buyer, buyer_balance);
        sync_holder(&env, &buyer, buyer_balance);
        set_purchased(&env, &buyer, purchased);

        // Forward the full paid value to the proceeds account
        let token_client = TokenClient::new(&env, &config.payment_token);
        token_client.transfer(&buyer, &config.proceeds_account, &paid_value);

        TokenUtils::new(&env)
            .events()
            .transfer(config.owner, buyer.clone(), units);
        env.events()
            .publish((TOKENS_PURCHASED,), (buyer, units, paid_value));

        Ok(())
    }

    /// Returns whether the primary sale window is open
    pub fn is_primary_sale_window_open(env: Env) -> bool {
        is_sale_open(&env)
    }

    /// Open or close the primary sale window
    ///
    /// # Arguments
    /// * `caller` - Must be the pool owner
    /// * `open` - New window state
    ///
    /// # Errors
    /// * `Unauthorized` - Caller is not the pool owner
    pub fn set_sale_window_open(env: Env, caller: Address, open: bool) -> Result<(), Error> {
        let config = get_config(&env)?;
        if config.owner != caller {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();

        set_sale_open(&env, open);

        env.events().publish((SALE_WINDOW_SET,), (caller, open));

        Ok(())
    }

    /// Overwrite the per-purchaser cap for all future offering purchases.
    /// Past purchases already at the old cap stay valid.
    ///
    /// # Arguments
    /// * `caller` - Must be the pool owner
    /// * `new_cap` - New cap, must be positive
    ///
    /// # Errors
    /// * `Unauthorized` - Caller is not the pool owner
    /// * `InvInput` - Non-positive cap
    pub fn set_max_token_limit_per_holder(
        env: Env,
        caller: Address,
        new_cap: Amount,
    ) -> Result<(), Error> {
        let mut config = get_config(&env)?;
        if config.owner != caller {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();

        if new_cap <= 0 {
            return Err(Error::InvInput);
        }

        config.max_tokens_per_holder = new_cap;
        set_config(&env, &config);

        env.events().publish((HOLDER_CAP_SET,), (caller, new_cap));

        Ok(())
    }

    /// Get units an identity has bought on the initial offering
    pub fn purchased_amount(env: Env, id: Address) -> Amount {
        get_purchased(&env, &id)
    }

    /// Deposit payment-token value and accrue it to current holders pro rata
    ///
    /// Each holder is credited `amount * balance / total_supply` (floor
    /// division). The leftover of at most `total_supply - 1` stays in the
    /// contract's token balance as undistributed dust; it is never rounded
    /// up into anyone's accrual. The host serializes invocations, so the
    /// holder list read here is a true snapshot for the whole deposit.
    ///
    /// # Arguments
    /// * `from` - Depositor, must authorize the call
    /// * `amount` - Payment-token value to distribute, must be positive
    ///
    /// # Errors
    /// * `InvInput` - Non-positive amount or arithmetic overflow
    pub fn deposit(env: Env, from: Address, amount: Amount) -> Result<(), Error> {
        from.require_auth();
        let config = get_config(&env)?;

        if amount <= 0 {
            return Err(Error::InvInput);
        }

        // Pull the deposited value into the contract's custody
        let token_client = TokenClient::new(&env, &config.payment_token);
        token_client.transfer(&from, &env.current_contract_address(), &amount);

        let holders = get_holders(&env);
        for holder in holders.iter() {
            let share = amount
                .checked_mul(get_balance(&env, &holder))
                .ok_or(Error::InvInput)?
                / config.total_supply;

            if share > 0 {
                let accrued = get_dividend(&env, &holder)
                    .checked_add(share)
                    .ok_or(Error::InvInput)?;
                set_dividend(&env, &holder, accrued);
            }
        }

        let total_in = get_dividends_in(&env)
            .checked_add(amount)
            .ok_or(Error::InvInput)?;
        set_dividends_in(&env, total_in);

        env.events().publish((DIVIDENDS_DEPOSITED,), (from, amount));

        Ok(())
    }

    /// Get an identity's claimable dividend accrual
    pub fn eligible_dividends(env: Env, id: Address) -> Amount {
        get_dividend(&env, &id)
    }

    /// Pay out and zero the caller's dividend accrual
    ///
    /// The accrual is zeroed before the token transfer is attempted, so a
    /// reentrant claim sees nothing left. A failed transfer traps and the
    /// host rolls the zeroing back with the rest of the invocation.
    ///
    /// # Arguments
    /// * `claimant` - Claiming identity, must authorize the call
    ///
    /// # Errors
    /// * `NoClaim` - Claimant has no accrued dividends
    pub fn claim_dividends(env: Env, claimant: Address) -> Result<Amount, Error> {
        claimant.require_auth();
        let config = get_config(&env)?;

        let amount = get_dividend(&env, &claimant);
        if amount == 0 {
            return Err(Error::NoClaim);
        }

        set_dividend(&env, &claimant, 0);
        let total_out = get_dividends_out(&env)
            .checked_add(amount)
            .ok_or(Error::InvInput)?;
        set_dividends_out(&env, total_out);

        let token_client = TokenClient::new(&env, &config.payment_token);
        token_client.transfer(&env.current_contract_address(), &claimant, &amount);

        env.events()
            .publish((DIVIDENDS_CLAIMED,), (claimant, amount));

        Ok(amount)
    }

    /// Get the value still custodied for dividends: everything ever
    /// deposited minus everything ever claimed (claimable accruals plus
    /// retained dust)
    pub fn dividend_pool_balance(env: Env) -> Amount {
        get_dividends_in(&env) - get_dividends_out(&env)
    }

    // ---------- Upgrade (time-locked, owner only) ----------

    /// Schedule an upgrade. Owner only. Executable after 48h.
    pub fn schedule_upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
    ) -> Result<(), Error> {
        let config = get_config(&env)?;
        if config.owner != caller {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();

        let now = env.ledger().timestamp();
        let pending = PendingUpgrade {
            wasm_hash: new_wasm_hash.clone(),
            execute_not_before: now + UPGRADE_TIME_LOCK_SECS,
        };
        set_pending_upgrade(&env, &pending);

        env.events().publish(
            (UPGRADE_SCHEDULED,),
            (caller, new_wasm_hash, pending.execute_not_before),
        );

        Ok(())
    }

    /// Execute a scheduled upgrade. Owner only. Only after the time-lock.
    pub fn execute_upgrade(env: Env, caller: Address) -> Result<(), Error> {
        let config = get_config(&env)?;
        if config.owner != caller {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();

        let pending = get_pending_upgrade(&env).ok_or(Error::UpgNotSched)?;
        let now = env.ledger().timestamp();
        if now < pending.execute_not_before {
            return Err(Error::UpgTooEarly);
        }

        env.deployer()
            .update_current_contract_wasm(pending.wasm_hash.clone());
        clear_pending_upgrade(&env);

        env.events()
            .publish((UPGRADE_EXECUTED,), (caller, pending.wasm_hash));

        Ok(())
    }

    /// Cancel a scheduled upgrade. Owner only.
    pub fn cancel_upgrade(env: Env, caller: Address) -> Result<(), Error> {
        let config = get_config(&env)?;
        if config.owner != caller {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();

        if !has_pending_upgrade(&env) {
            return Err(Error::UpgNotSched);
        }
        clear_pending_upgrade(&env);

        env.events().publish((UPGRADE_CANCELLED,), caller);

        Ok(())
    }

    /// Get pending upgrade info, if any.
    pub fn get_pending_upgrade(env: Env) -> Option<PendingUpgrade> {
        storage::get_pending_upgrade(&env)
    }
}
