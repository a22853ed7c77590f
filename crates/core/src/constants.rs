use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Spread added to the SOFR benchmark when computing the effective return rate, in percent.
pub const SOFR_SPREAD: Decimal = dec!(5);

/// Upper cap on the effective return rate, in percent.
pub const EFFECTIVE_RATE_CAP: Decimal = dec!(10);

/// Target sum of member equity percentages.
pub const EQUITY_TOTAL_TARGET: Decimal = dec!(100);

/// Absolute-currency tolerance for dollar-amount reconciliation items.
pub const RECONCILIATION_DOLLAR_TOLERANCE: Decimal = dec!(10000);

/// Tolerance in percentage points for percentage reconciliation items.
pub const RECONCILIATION_PERCENT_TOLERANCE: Decimal = dec!(0.1);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
