//! The two-tier year-end allocation calculator.
//!
//! Tier 1 pays a capped, SOFR-linked incentive return on each member's
//! capital balance; tier 2 splits whatever remains of the allocable pool by
//! equity percentage. Both tiers floor each per-member amount at the point of
//! computation, so the run carries an explicit rounding remainder.

use rust_decimal::Decimal;

use super::allocation_errors::AllocationError;
use super::allocation_model::{AllocationInput, AllocationRun, MemberAllocation};
use crate::constants::{EFFECTIVE_RATE_CAP, SOFR_SPREAD};
use crate::errors::{Error, Result};
use crate::financials::FinancialPeriod;

/// The capped benchmark-linked rate applied to capital balances in pass 1,
/// in percent: `min(sofr_rate + 5, 10)`.
pub fn effective_return_rate(sofr_rate: Decimal) -> Decimal {
    (sofr_rate + SOFR_SPREAD).min(EFFECTIVE_RATE_CAP)
}

/// Computes every member's year-end allocation for a financial period.
///
/// Pass 1 (balance incentive returns) fully completes, with its sum
/// materialized, before any pass-2 (equity-based) amount is computed - the
/// residual pool is a function of the complete pass-1 sum, so every member's
/// pass-2 amount depends on every other member's capital balance.
///
/// `remaining_net_income` may be negative when incentive returns exceed the
/// allocable pool; it is passed through unclamped and callers are responsible
/// for flagging it.
pub fn calculate_allocations(
    period: &FinancialPeriod,
    roster: &[AllocationInput],
) -> Result<AllocationRun> {
    if period.is_allocated {
        return Err(Error::Allocation(AllocationError::PeriodLocked(
            period.fiscal_year,
        )));
    }
    if roster.is_empty() {
        return Err(Error::Allocation(AllocationError::EmptyRoster(
            period.fiscal_year,
        )));
    }

    // Resolve every percentage up front so the calculation never partially runs.
    let percentages = roster
        .iter()
        .map(|input| {
            input.equity_percentage.ok_or_else(|| {
                Error::Allocation(AllocationError::MissingEquityPercentage(
                    input.member_id.clone(),
                ))
            })
        })
        .collect::<Result<Vec<Decimal>>>()?;

    let rate = effective_return_rate(period.sofr_rate);

    // Pass 1: balance incentive returns, floored per member.
    let incentive_returns: Vec<Decimal> = roster
        .iter()
        .map(|input| (input.capital_balance * rate / Decimal::ONE_HUNDRED).floor())
        .collect();
    let total_balance_incentive_returns: Decimal = incentive_returns.iter().copied().sum();

    let remaining_net_income = period.final_allocable_amount - total_balance_incentive_returns;

    // Pass 2: equity-based split of the residual pool, floored per member.
    let mut allocations = Vec::with_capacity(roster.len());
    let mut total_allocated = Decimal::ZERO;
    for ((input, percentage), incentive_return) in roster
        .iter()
        .zip(percentages.into_iter())
        .zip(incentive_returns.into_iter())
    {
        let equity_based_allocation =
            (remaining_net_income * percentage / Decimal::ONE_HUNDRED).floor();
        let allocation_amount = incentive_return + equity_based_allocation;
        total_allocated += allocation_amount;

        allocations.push(MemberAllocation {
            member_id: input.member_id.clone(),
            fiscal_year: period.fiscal_year,
            equity_percentage: percentage,
            beginning_capital_balance: input.capital_balance,
            balance_incentive_return: incentive_return,
            equity_based_allocation,
            allocation_amount,
            distributions: input.distributions,
            ending_capital_balance: input.capital_balance + allocation_amount
                - input.distributions,
            effective_return_rate: rate,
        });
    }

    Ok(AllocationRun {
        fiscal_year: period.fiscal_year,
        effective_return_rate: rate,
        total_balance_incentive_returns,
        remaining_net_income,
        total_allocated,
        rounding_remainder: period.final_allocable_amount - total_allocated,
        allocations,
    })
}
