//! Management fee modelling: phase schedules, valuation bases, and the
//! year-by-year fee projection.
//!
//! The flow is validate -> resolve -> project: [`validate_schedule`] gates a
//! caller-edited schedule, [`resolve_base`] prices a valuation basis for one
//! year, and [`project_fees`] folds both into a full-term projection. The
//! projection itself never fails on a bad schedule — it degrades to zero-fee
//! years — so callers are expected to run the validator first.

pub mod basis;
pub mod params;
pub mod projection;
pub mod schedule;

pub use basis::resolve_base;
pub use params::FundParameters;
pub use projection::{project_fees, FeeProjection, YearlyFeeRecord};
pub use schedule::{
    default_schedule, validate_schedule, FeeBasis, FeePhase, ScheduleIssue, ValidationReport,
};
