//! Shared state handed to every request handler.

use tally_ledger::LedgerStore;

/// Application services available to handlers via `Extension<Arc<AppServices>>`.
pub struct AppServices {
    pub ledger: LedgerStore,
}

pub fn build_services() -> AppServices {
    AppServices {
        ledger: LedgerStore::new(),
    }
}
