//! Pure reconciliation of system totals against balance-sheet figures.

use rust_decimal::Decimal;

use super::reconciliation_model::{
    BalanceSheetTotals, ReconciliationItem, ReconciliationReport, ReconciliationStatus,
    SystemTotals,
};
use crate::constants::{
    EQUITY_TOTAL_TARGET, RECONCILIATION_DOLLAR_TOLERANCE, RECONCILIATION_PERCENT_TOLERANCE,
};

/// Line-item description for the capital-accounts comparison.
pub const CAPITAL_ACCOUNTS_ITEM: &str = "Member capital accounts vs balance-sheet equity";

/// Line-item description for the allocation-total comparison.
pub const ALLOCATION_TOTAL_ITEM: &str = "Allocated total vs final allocable amount";

/// Line-item description for the equity-percentage comparison.
pub const EQUITY_PERCENTAGE_ITEM: &str = "Total equity percentage vs 100%";

/// Compares system totals against balance-sheet figures for a fiscal year.
///
/// Pure and idempotent: identical inputs always yield an identical report.
/// The report is advisory for running the allocation calculator; it only
/// blocks committing a period as allocated (see `AllocationService`).
pub fn reconcile(
    fiscal_year: i32,
    system: &SystemTotals,
    balance_sheet: &BalanceSheetTotals,
) -> ReconciliationReport {
    let items = vec![
        compare_item(
            CAPITAL_ACCOUNTS_ITEM,
            system.total_member_capital_accounts,
            balance_sheet.total_equity,
            RECONCILIATION_DOLLAR_TOLERANCE,
        ),
        compare_item(
            ALLOCATION_TOTAL_ITEM,
            system.total_allocated,
            balance_sheet.final_allocable_amount,
            RECONCILIATION_DOLLAR_TOLERANCE,
        ),
        compare_item(
            EQUITY_PERCENTAGE_ITEM,
            system.total_equity_percentage,
            Some(EQUITY_TOTAL_TARGET),
            RECONCILIATION_PERCENT_TOLERANCE,
        ),
    ];

    let is_reconciled = items
        .iter()
        .all(|item| item.status == ReconciliationStatus::Matched);

    ReconciliationReport {
        fiscal_year,
        items,
        is_reconciled,
    }
}

/// Builds one compared line, classifying it against its tolerance.
fn compare_item(
    description: &str,
    system_amount: Option<Decimal>,
    balance_sheet_amount: Option<Decimal>,
    tolerance: Decimal,
) -> ReconciliationItem {
    let (variance, status) = match (system_amount, balance_sheet_amount) {
        (Some(system), Some(balance)) => {
            let variance = system - balance;
            let status = if variance.abs() < tolerance {
                ReconciliationStatus::Matched
            } else {
                ReconciliationStatus::Variance
            };
            (Some(variance), status)
        }
        _ => (None, ReconciliationStatus::Missing),
    };

    ReconciliationItem {
        description: description.to_string(),
        system_amount,
        balance_sheet_amount,
        variance,
        tolerance,
        status,
    }
}
