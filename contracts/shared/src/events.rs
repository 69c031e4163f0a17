use soroban_sdk::{symbol_short, Symbol};

// Pool-share token events
pub const TOKEN_INITIALIZED: Symbol = symbol_short!("init");
pub const TOKENS_PURCHASED: Symbol = symbol_short!("purchase");
pub const SALE_WINDOW_SET: Symbol = symbol_short!("salewnd");
pub const HOLDER_CAP_SET: Symbol = symbol_short!("capset");

// Dividend events
pub const DIVIDENDS_DEPOSITED: Symbol = symbol_short!("divdep");
pub const DIVIDENDS_CLAIMED: Symbol = symbol_short!("divclaim");

// Upgrade events
pub const UPGRADE_SCHEDULED: Symbol = symbol_short!("upgsched");
pub const UPGRADE_EXECUTED: Symbol = symbol_short!("upgexec");
pub const UPGRADE_CANCELLED: Symbol = symbol_short!("upgcancel");
