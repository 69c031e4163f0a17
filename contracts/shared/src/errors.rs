use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    NotInit = 1,
    AlreadyInit = 2,
    Unauthorized = 3,
    InvInput = 4,

    // Ledger errors
    InsufBalance = 5,

    // Initial offering errors
    SaleClosed = 6,
    /// Purchase limit exceeds allowable token balance per holder
    PurchaseLim = 7,

    // Dividend errors
    NoClaim = 8,

    // Upgrade errors
    UpgNotSched = 9,
    UpgTooEarly = 10,
}
