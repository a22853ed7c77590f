//! Reconciliation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of a single reconciled line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconciliationStatus {
    /// Variance within the item's tolerance
    Matched,
    /// Variance exceeds the item's tolerance
    Variance,
    /// One side has no corresponding record
    Missing,
}

/// One compared line in a reconciliation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationItem {
    pub description: String,
    pub system_amount: Option<Decimal>,
    pub balance_sheet_amount: Option<Decimal>,
    /// `system_amount - balance_sheet_amount`; absent when either side is missing.
    pub variance: Option<Decimal>,
    /// Absolute tolerance applied to this item (currency for dollar items,
    /// percentage points for percentage items).
    pub tolerance: Decimal,
    pub status: ReconciliationStatus,
}

/// The full comparison of system totals against balance-sheet figures for a
/// fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub fiscal_year: i32,
    pub items: Vec<ReconciliationItem>,
    pub is_reconciled: bool,
}

impl ReconciliationReport {
    /// The capital-accounts variance, if that item was comparable.
    ///
    /// This is the figure stored on the period as `reconciliation_difference`.
    pub fn capital_accounts_variance(&self) -> Option<Decimal> {
        self.items
            .iter()
            .find(|item| item.description == super::CAPITAL_ACCOUNTS_ITEM)
            .and_then(|item| item.variance)
    }
}

/// System-side totals fed into reconciliation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemTotals {
    /// Sum of member allocation amounts for the year
    pub total_allocated: Option<Decimal>,
    /// Sum of member ending capital balances
    pub total_member_capital_accounts: Option<Decimal>,
    /// Sum of effective member equity percentages
    pub total_equity_percentage: Option<Decimal>,
}

/// Externally reported balance-sheet totals fed into reconciliation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetTotals {
    pub total_equity: Option<Decimal>,
    /// The allocable pool the allocation total should account for
    pub final_allocable_amount: Option<Decimal>,
}

/// Explicit operator override allowing an unreconciled period to be allocated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationOverride {
    pub reason: String,
    pub authorized_by: String,
}
