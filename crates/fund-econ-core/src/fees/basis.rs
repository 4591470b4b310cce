use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::fees::params::FundParameters;
use crate::fees::schedule::FeeBasis;
use crate::types::Money;

/// Cumulative capital deployed by `year`: a linear ramp across the
/// investment period, flat at the full fund size thereafter.
fn invested_cost(year: u32, params: &FundParameters) -> Money {
    if year <= params.investment_period {
        params.fund_size * Decimal::from(year) / Decimal::from(params.investment_period)
    } else {
        params.fund_size
    }
}

/// Fair value of the deployed capital: the invested-cost figure compounded
/// at the NAV growth assumption. The exponent lags nominal fund age by one
/// year since value only compounds once capital is at work.
fn fair_value(year: u32, params: &FundParameters) -> Money {
    let growth = Decimal::ONE + params.nav_growth_rate / dec!(100);
    let exponent = Decimal::from(year.saturating_sub(1));
    invested_cost(year, params) * growth.powd(exponent)
}

/// Monetary base a fee rate applies to in a given year.
///
/// Total over its inputs; callers pass `1 <= year <= fund_term`.
pub fn resolve_base(year: u32, basis: FeeBasis, params: &FundParameters) -> Money {
    match basis {
        FeeBasis::CommittedCapital => params.fund_size,
        FeeBasis::InvestedCost => invested_cost(year, params),
        FeeBasis::NetAssetValue => fair_value(year, params),
        FeeBasis::LowerOfCostOrFair => invested_cost(year, params).min(fair_value(year, params)),
    }
}
