//! Reconciliation module - comparing system totals to balance-sheet figures.

mod reconciliation_checker;
mod reconciliation_model;


pub use reconciliation_checker::{
    reconcile, ALLOCATION_TOTAL_ITEM, CAPITAL_ACCOUNTS_ITEM, EQUITY_PERCENTAGE_ITEM,
};
pub use reconciliation_model::{
    BalanceSheetTotals, ReconciliationItem, ReconciliationOverride, ReconciliationReport,
    ReconciliationStatus, SystemTotals,
};
