use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fees::params::{validate_params, FundParameters};
use crate::types::Percent;
use crate::FundEconResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Valuation basis a fee rate is applied to.
///
/// Serialised with the names fund documents use, which is also what the UI
/// sends over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeBasis {
    #[serde(rename = "Committed Capital")]
    CommittedCapital,
    #[serde(rename = "Invested Cost")]
    InvestedCost,
    #[serde(rename = "Net Asset Value")]
    NetAssetValue,
    #[serde(rename = "Lower of Cost or Fair Value")]
    LowerOfCostOrFair,
}

/// A contiguous year range charged at one basis and rate. Years are
/// 1-indexed and inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeePhase {
    pub start_year: u32,
    pub end_year: u32,
    pub fee_basis: FeeBasis,
    /// Annual rate in percent (2.0 = 2%)
    pub fee_rate: Percent,
}

/// Economic sanity ceiling for an annual fee rate, in percent.
pub const MAX_REASONABLE_FEE_RATE: Decimal = dec!(10);

/// Headline rate charged on committed capital during the investment period
pub const DEFAULT_INVESTMENT_PERIOD_RATE: Decimal = dec!(2.0);

/// Stepped-down rate charged on invested cost after the investment period
pub const DEFAULT_STEP_DOWN_RATE: Decimal = dec!(1.5);

/// A single problem found in a schedule.
///
/// `Structural` issues invalidate the schedule. `EconomicWarning`s are
/// advisory; callers decide whether to treat them as blocking.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ScheduleIssue {
    #[error("{0}")]
    Structural(String),
    #[error("{0}")]
    EconomicWarning(String),
}

/// Outcome of checking a schedule against a fund term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff no structural issue was found. Economic warnings never
    /// flip this to false.
    pub valid: bool,
    pub issues: Vec<ScheduleIssue>,
}

impl ValidationReport {
    pub fn structural_errors(&self) -> impl Iterator<Item = &ScheduleIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i, ScheduleIssue::Structural(_)))
    }

    pub fn economic_warnings(&self) -> impl Iterator<Item = &ScheduleIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i, ScheduleIssue::EconomicWarning(_)))
    }

    /// Human-readable messages for every issue, in detection order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.to_string()).collect()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check a caller-supplied schedule against the fund term.
///
/// Every problem is reported, not just the first. When `valid` is true,
/// every year in `[1, fund_term]` is covered by exactly one phase.
///
/// Phases may arrive in any order; they are stable-sorted by start year
/// before the adjacency checks, so two phases sharing a start year keep
/// their caller order and always surface as an overlap.
pub fn validate_schedule(phases: &[FeePhase], fund_term: u32) -> ValidationReport {
    let mut issues: Vec<ScheduleIssue> = Vec::new();

    if phases.is_empty() {
        issues.push(ScheduleIssue::Structural(
            "Schedule is empty: at least one fee phase is required".into(),
        ));
        return ValidationReport {
            valid: false,
            issues,
        };
    }

    for (idx, phase) in phases.iter().enumerate() {
        let label = idx + 1;
        if phase.start_year > phase.end_year {
            issues.push(ScheduleIssue::Structural(format!(
                "Phase {label}: start year {} is after end year {}",
                phase.start_year, phase.end_year
            )));
        }
        if phase.start_year < 1 {
            issues.push(ScheduleIssue::Structural(format!(
                "Phase {label}: start year must be 1 or later"
            )));
        }
        if phase.end_year > fund_term {
            issues.push(ScheduleIssue::Structural(format!(
                "Phase {label}: end year {} is beyond the {fund_term}-year fund term",
                phase.end_year
            )));
        }
        if phase.fee_rate < Decimal::ZERO {
            issues.push(ScheduleIssue::EconomicWarning(format!(
                "Phase {label}: fee rate {}% is negative",
                phase.fee_rate
            )));
        } else if phase.fee_rate > MAX_REASONABLE_FEE_RATE {
            issues.push(ScheduleIssue::EconomicWarning(format!(
                "Phase {label}: fee rate {}% is above the {MAX_REASONABLE_FEE_RATE}% ceiling",
                phase.fee_rate
            )));
        }
    }

    let mut sorted: Vec<&FeePhase> = phases.iter().collect();
    sorted.sort_by_key(|p| p.start_year);

    if sorted[0].start_year != 1 {
        issues.push(ScheduleIssue::Structural(format!(
            "Schedule must start at year 1; the first phase starts at year {}",
            sorted[0].start_year
        )));
    }
    let last = sorted[sorted.len() - 1];
    if last.end_year != fund_term {
        issues.push(ScheduleIssue::Structural(format!(
            "Schedule must run through year {fund_term}; the last phase ends at year {}",
            last.end_year
        )));
    }

    for pair in sorted.windows(2) {
        let (cur, next) = (pair[0], pair[1]);
        if next.start_year <= cur.end_year {
            issues.push(ScheduleIssue::Structural(format!(
                "Phases overlap: years {}-{} and {}-{}",
                cur.start_year, cur.end_year, next.start_year, next.end_year
            )));
        } else if next.start_year > cur.end_year + 1 {
            issues.push(ScheduleIssue::Structural(format!(
                "Gap in coverage: no phase covers years {}-{}",
                cur.end_year + 1,
                next.start_year - 1
            )));
        }
    }

    let valid = !issues
        .iter()
        .any(|i| matches!(i, ScheduleIssue::Structural(_)));
    ValidationReport { valid, issues }
}

// ---------------------------------------------------------------------------
// Default schedule
// ---------------------------------------------------------------------------

/// Canonical step-down schedule used to seed a new session or a reset:
/// the headline rate on committed capital through the investment period,
/// then the reduced rate on invested cost for the remaining years.
///
/// Valid by construction for any well-formed [`FundParameters`]; collapses
/// to a single phase when the investment period runs the whole term.
pub fn default_schedule(params: &FundParameters) -> FundEconResult<Vec<FeePhase>> {
    validate_params(params)?;

    let investment_phase = FeePhase {
        start_year: 1,
        end_year: params.investment_period,
        fee_basis: FeeBasis::CommittedCapital,
        fee_rate: DEFAULT_INVESTMENT_PERIOD_RATE,
    };

    if params.investment_period == params.fund_term {
        return Ok(vec![investment_phase]);
    }

    Ok(vec![
        investment_phase,
        FeePhase {
            start_year: params.investment_period + 1,
            end_year: params.fund_term,
            fee_basis: FeeBasis::InvestedCost,
            fee_rate: DEFAULT_STEP_DOWN_RATE,
        },
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
