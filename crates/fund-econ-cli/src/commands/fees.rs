use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use fund_econ_core::fees::{self, FeePhase, FundParameters};

use crate::input;

/// Input document shared by the fee subcommands. The schedule may be
/// omitted; commands that need one fall back to the default step-down.
#[derive(Deserialize)]
pub struct FeeModelDocument {
    pub params: FundParameters,
    #[serde(default)]
    pub schedule: Option<Vec<FeePhase>>,
}

/// Arguments for the fee projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to JSON input file with params and optional schedule
    /// (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Fund size in millions
    #[arg(long)]
    pub fund_size: Option<Decimal>,

    /// Fund term in years
    #[arg(long)]
    pub fund_term: Option<u32>,

    /// Investment period in years
    #[arg(long)]
    pub investment_period: Option<u32>,

    /// Annual NAV growth assumption in percent (8 = 8%)
    #[arg(long, default_value = "8", allow_hyphen_values = true)]
    pub nav_growth: Decimal,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let doc: FeeModelDocument = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        FeeModelDocument {
            params: params_from_flags(
                args.fund_size,
                args.fund_term,
                args.investment_period,
                args.nav_growth,
            )?,
            schedule: None,
        }
    };

    let schedule = match doc.schedule {
        Some(schedule) => schedule,
        None => fees::default_schedule(&doc.params)?,
    };

    // The validator is the gate: structural problems stop the projection,
    // economic warnings ride along in the output envelope.
    let report = fees::validate_schedule(&schedule, doc.params.fund_term);
    if !report.valid {
        return Err(format!(
            "schedule failed validation:\n  {}",
            report.messages().join("\n  ")
        )
        .into());
    }

    let mut result = fees::project_fees(&doc.params, &schedule)?;
    for warning in report.economic_warnings() {
        result.warnings.push(warning.to_string());
    }
    Ok(serde_json::to_value(result)?)
}

/// Arguments for schedule validation
#[derive(Args)]
pub struct ValidateScheduleArgs {
    /// Path to JSON input file with params and schedule
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_validate_schedule(
    args: ValidateScheduleArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let doc: FeeModelDocument = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for validate-schedule".into());
    };

    let schedule = doc
        .schedule
        .ok_or("input document must include a \"schedule\" to validate")?;
    let report = fees::validate_schedule(&schedule, doc.params.fund_term);
    Ok(serde_json::to_value(report)?)
}

/// Arguments for the canonical default schedule
#[derive(Args)]
pub struct DefaultScheduleArgs {
    /// Path to JSON input file with params (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Fund size in millions
    #[arg(long)]
    pub fund_size: Option<Decimal>,

    /// Fund term in years
    #[arg(long)]
    pub fund_term: Option<u32>,

    /// Investment period in years
    #[arg(long)]
    pub investment_period: Option<u32>,

    /// Annual NAV growth assumption in percent (8 = 8%)
    #[arg(long, default_value = "8", allow_hyphen_values = true)]
    pub nav_growth: Decimal,
}

pub fn run_default_schedule(
    args: DefaultScheduleArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let params: FundParameters = if let Some(ref path) = args.input {
        let doc: FeeModelDocument = input::read_json(path)?;
        doc.params
    } else if let Some(data) = input::read_stdin()? {
        let doc: FeeModelDocument = serde_json::from_value(data)?;
        doc.params
    } else {
        params_from_flags(
            args.fund_size,
            args.fund_term,
            args.investment_period,
            args.nav_growth,
        )?
    };

    let schedule = fees::default_schedule(&params)?;
    Ok(serde_json::to_value(schedule)?)
}

fn params_from_flags(
    fund_size: Option<Decimal>,
    fund_term: Option<u32>,
    investment_period: Option<u32>,
    nav_growth: Decimal,
) -> Result<FundParameters, Box<dyn std::error::Error>> {
    let fund_size = fund_size.ok_or("--fund-size is required (or provide --input)")?;
    let fund_term = fund_term.ok_or("--fund-term is required (or provide --input)")?;
    let investment_period =
        investment_period.ok_or("--investment-period is required (or provide --input)")?;

    Ok(FundParameters {
        fund_size,
        fund_term,
        investment_period,
        nav_growth_rate: nav_growth,
        currency: None,
    })
}
