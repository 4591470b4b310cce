use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::fees::basis::resolve_base;
use crate::fees::params::{validate_params, FundParameters};
use crate::fees::schedule::{FeeBasis, FeePhase};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FundEconResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One year of the fee projection. Regenerated whole on every call, never
/// mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyFeeRecord {
    pub year: u32,
    /// None only for a year no phase covers (schedule failed validation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_basis: Option<FeeBasis>,
    pub base_amount: Money,
    pub fee_rate: Percent,
    pub fee_amount: Money,
    pub cumulative_fees: Money,
    pub fees_pct_of_commitments: Percent,
}

/// Full fee projection over the fund term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeProjection {
    pub yearly: Vec<YearlyFeeRecord>,
    pub total_fees: Money,
    pub average_annual_fee_pct: Percent,
    pub first_half_fees: Money,
    pub second_half_fees: Money,
    pub fees_pct_of_commitments: Percent,
}

// ---------------------------------------------------------------------------
// Main calculation
// ---------------------------------------------------------------------------

/// Project management fees year by year over the full fund term.
///
/// Assumes the schedule already passed `validate_schedule`. A year no phase
/// covers produces a zero-fee record plus an envelope warning rather than an
/// error, so the validator stays the sole correctness gate and this function
/// stays total over any phase list.
pub fn project_fees(
    params: &FundParameters,
    phases: &[FeePhase],
) -> FundEconResult<ComputationOutput<FeeProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_params(params)?;

    // Stable sort: phases sharing a start year keep caller order, matching
    // the order the validator reports them in.
    let mut sorted: Vec<&FeePhase> = phases.iter().collect();
    sorted.sort_by_key(|p| p.start_year);

    let mut yearly: Vec<YearlyFeeRecord> = Vec::with_capacity(params.fund_term as usize);
    let mut cumulative = Decimal::ZERO;
    let mut uncovered: Vec<u32> = Vec::new();

    for year in 1..=params.fund_term {
        let covering = sorted
            .iter()
            .find(|p| p.start_year <= year && year <= p.end_year);

        let record = match covering {
            Some(phase) => {
                let base_amount = resolve_base(year, phase.fee_basis, params);
                let fee_amount = base_amount * phase.fee_rate / dec!(100);
                cumulative += fee_amount;
                YearlyFeeRecord {
                    year,
                    fee_basis: Some(phase.fee_basis),
                    base_amount,
                    fee_rate: phase.fee_rate,
                    fee_amount,
                    cumulative_fees: cumulative,
                    fees_pct_of_commitments: cumulative / params.fund_size * dec!(100),
                }
            }
            None => {
                uncovered.push(year);
                YearlyFeeRecord {
                    year,
                    fee_basis: None,
                    base_amount: Decimal::ZERO,
                    fee_rate: Decimal::ZERO,
                    fee_amount: Decimal::ZERO,
                    cumulative_fees: cumulative,
                    fees_pct_of_commitments: cumulative / params.fund_size * dec!(100),
                }
            }
        };
        yearly.push(record);
    }

    if !uncovered.is_empty() {
        warnings.push(format!(
            "No fee phase covers year(s) {:?}; those years were projected at zero fees",
            uncovered
        ));
    }

    // -- Summary statistics --
    let total_fees = cumulative;
    let average_annual_fee_pct =
        total_fees / params.fund_size / Decimal::from(params.fund_term) * dec!(100);

    // Half split at floor(term / 2), midpoint year on the first-half side
    let midpoint = params.fund_term / 2;
    let mut first_half_fees = Decimal::ZERO;
    let mut second_half_fees = Decimal::ZERO;
    for record in &yearly {
        if record.year <= midpoint {
            first_half_fees += record.fee_amount;
        } else {
            second_half_fees += record.fee_amount;
        }
    }

    let fees_pct_of_commitments = total_fees / params.fund_size * dec!(100);

    let output = FeeProjection {
        yearly,
        total_fees,
        average_annual_fee_pct,
        first_half_fees,
        second_half_fees,
        fees_pct_of_commitments,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Management Fee Projection: piecewise phase schedule over committed/invested/NAV bases",
        &serde_json::json!({
            "fund_size": params.fund_size.to_string(),
            "fund_term": params.fund_term,
            "investment_period": params.investment_period,
            "nav_growth_rate": params.nav_growth_rate.to_string(),
            "phases": phases.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
