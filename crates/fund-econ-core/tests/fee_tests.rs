use fund_econ_core::fees::{
    default_schedule, project_fees, resolve_base, validate_schedule, FeeBasis, FeePhase,
    FundParameters, ScheduleIssue,
};
use fund_econ_core::types::Currency;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn fund_params(
    fund_size: Decimal,
    fund_term: u32,
    investment_period: u32,
    nav_growth_rate: Decimal,
) -> FundParameters {
    FundParameters {
        fund_size,
        fund_term,
        investment_period,
        nav_growth_rate,
        currency: Some(Currency::USD),
    }
}

fn phase(start_year: u32, end_year: u32, fee_basis: FeeBasis, fee_rate: Decimal) -> FeePhase {
    FeePhase {
        start_year,
        end_year,
        fee_basis,
        fee_rate,
    }
}

// ===========================================================================
// End-to-end scenario — known answers
// ===========================================================================

#[test]
fn test_step_down_fund_known_answers() {
    // 50M fund, 10-year term, 4-year investment period. 2.0% on committed
    // capital through year 4, then 1.5% on invested cost.
    let params = fund_params(dec!(50), 10, 4, dec!(8));
    let schedule = vec![
        phase(1, 4, FeeBasis::CommittedCapital, dec!(2.0)),
        phase(5, 10, FeeBasis::InvestedCost, dec!(1.5)),
    ];

    let report = validate_schedule(&schedule, params.fund_term);
    assert!(report.valid, "issues: {:?}", report.messages());

    let result = project_fees(&params, &schedule).unwrap();
    let out = &result.result;

    // Committed-capital years: 50 x 2% = 1.0 flat
    assert_eq!(out.yearly[0].fee_amount, dec!(1.0));
    assert_eq!(out.yearly[3].fee_amount, dec!(1.0));

    // Invested-cost years: fully deployed, 50 x 1.5% = 0.75
    assert_eq!(out.yearly[4].fee_amount, dec!(0.75));
    assert_eq!(out.yearly[9].fee_amount, dec!(0.75));

    // 4 x 1.0 + 6 x 0.75 = 8.5
    assert_eq!(out.total_fees, dec!(8.5));
    assert_eq!(out.fees_pct_of_commitments, dec!(17));
}

#[test]
fn test_ramped_committed_scenario_known_answers() {
    // Committed-capital fee applied while the invested-cost ramp is still
    // running: switching the first phase to invested cost makes each ramp
    // year bill on the deployed fraction only.
    let params = fund_params(dec!(50), 10, 4, dec!(8));
    let schedule = vec![
        phase(1, 4, FeeBasis::InvestedCost, dec!(2.0)),
        phase(5, 10, FeeBasis::InvestedCost, dec!(1.5)),
    ];

    let result = project_fees(&params, &schedule).unwrap();
    let out = &result.result;

    // Ramp years: 50 x (year/4) x 2%
    assert_eq!(out.yearly[0].fee_amount, dec!(0.25));
    assert_eq!(out.yearly[1].fee_amount, dec!(0.5));
    assert_eq!(out.yearly[2].fee_amount, dec!(0.75));
    assert_eq!(out.yearly[3].fee_amount, dec!(1.0));

    // Post-ramp: 50 x 1.5% = 0.75 per year
    assert_eq!(out.yearly[4].fee_amount, dec!(0.75));

    // (0.25 + 0.5 + 0.75 + 1.0) + 6 x 0.75 = 2.5 + 4.5 = 7.0
    assert_eq!(out.total_fees, dec!(7.0));
    assert_eq!(out.fees_pct_of_commitments, dec!(14.0));

    // total / fund_size / term x 100 = 7 / 50 / 10 x 100 = 1.4
    assert_eq!(out.average_annual_fee_pct, dec!(1.4));
}

// ===========================================================================
// Projection properties
// ===========================================================================

#[test]
fn test_coverage_invariant() {
    let params = fund_params(dec!(250), 12, 5, dec!(6));
    let schedule = default_schedule(&params).unwrap();
    assert!(validate_schedule(&schedule, params.fund_term).valid);

    let result = project_fees(&params, &schedule).unwrap();
    let years: Vec<u32> = result.result.yearly.iter().map(|r| r.year).collect();

    assert_eq!(years, (1..=12).collect::<Vec<u32>>());
}

#[test]
fn test_cumulative_fees_monotonic() {
    let params = fund_params(dec!(250), 12, 5, dec!(6));
    let schedule = default_schedule(&params).unwrap();
    let result = project_fees(&params, &schedule).unwrap();

    let mut prev = Decimal::ZERO;
    for record in &result.result.yearly {
        assert!(
            record.cumulative_fees >= prev,
            "cumulative fees decreased in year {}",
            record.year
        );
        prev = record.cumulative_fees;
    }
}

#[test]
fn test_total_is_exact_sum_of_yearly_fees() {
    let params = fund_params(dec!(173), 11, 4, dec!(7.3));
    let schedule = vec![
        phase(1, 4, FeeBasis::CommittedCapital, dec!(2.0)),
        phase(5, 8, FeeBasis::NetAssetValue, dec!(1.25)),
        phase(9, 11, FeeBasis::LowerOfCostOrFair, dec!(1.0)),
    ];
    assert!(validate_schedule(&schedule, params.fund_term).valid);

    let result = project_fees(&params, &schedule).unwrap();
    let out = &result.result;

    let summed: Decimal = out.yearly.iter().map(|r| r.fee_amount).sum();
    assert_eq!(out.total_fees, summed);
    assert_eq!(out.yearly.last().unwrap().cumulative_fees, summed);
}

#[test]
fn test_half_split_conserves_total() {
    let params = fund_params(dec!(173), 11, 4, dec!(7.3));
    let schedule = default_schedule(&params).unwrap();
    let result = project_fees(&params, &schedule).unwrap();
    let out = &result.result;

    assert_eq!(out.first_half_fees + out.second_half_fees, out.total_fees);
}

// ===========================================================================
// Basis properties
// ===========================================================================

#[test]
fn test_committed_capital_year_invariant() {
    let params = fund_params(dec!(80), 10, 4, dec!(12));
    let base = resolve_base(1, FeeBasis::CommittedCapital, &params);

    for year in 2..=10 {
        assert_eq!(resolve_base(year, FeeBasis::CommittedCapital, &params), base);
    }
}

#[test]
fn test_invested_cost_ramp_boundary() {
    let params = fund_params(dec!(80), 10, 4, dec!(12));

    assert_eq!(resolve_base(4, FeeBasis::InvestedCost, &params), dec!(80));
    assert_eq!(resolve_base(5, FeeBasis::InvestedCost, &params), dec!(80));
}

#[test]
fn test_lower_of_dominated_by_cost() {
    for growth in [dec!(-12), dec!(0), dec!(9)] {
        let params = fund_params(dec!(80), 10, 4, growth);
        for year in 1..=10 {
            assert!(
                resolve_base(year, FeeBasis::LowerOfCostOrFair, &params)
                    <= resolve_base(year, FeeBasis::InvestedCost, &params)
            );
        }
    }
}

// ===========================================================================
// Validator gate
// ===========================================================================

#[test]
fn test_validator_rejects_overlap() {
    let schedule = vec![
        phase(1, 5, FeeBasis::CommittedCapital, dec!(2.0)),
        phase(4, 10, FeeBasis::InvestedCost, dec!(1.5)),
    ];
    let report = validate_schedule(&schedule, 10);

    assert!(!report.valid);
    assert!(report
        .issues
        .iter()
        .any(|i| matches!(i, ScheduleIssue::Structural(m) if m.contains("overlap"))));
}

#[test]
fn test_validator_rejects_gap() {
    let schedule = vec![
        phase(1, 4, FeeBasis::CommittedCapital, dec!(2.0)),
        phase(6, 10, FeeBasis::InvestedCost, dec!(1.5)),
    ];
    let report = validate_schedule(&schedule, 10);

    assert!(!report.valid);
    assert!(report
        .issues
        .iter()
        .any(|i| matches!(i, ScheduleIssue::Structural(m) if m.contains("Gap"))));
}

#[test]
fn test_default_schedule_validates_across_param_grid() {
    for fund_term in 1..=15 {
        for investment_period in 1..=fund_term {
            let params = fund_params(dec!(100), fund_term, investment_period, dec!(8));
            let schedule = default_schedule(&params).unwrap();
            let report = validate_schedule(&schedule, fund_term);
            assert!(
                report.valid,
                "term={fund_term} period={investment_period}: {:?}",
                report.messages()
            );
        }
    }
}

// ===========================================================================
// Wire format
// ===========================================================================

#[test]
fn test_phase_round_trips_with_wire_basis_names() {
    let json = r#"{
        "start_year": 1,
        "end_year": 4,
        "fee_basis": "Committed Capital",
        "fee_rate": "2.0"
    }"#;

    let parsed: FeePhase = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.fee_basis, FeeBasis::CommittedCapital);
    assert_eq!(parsed.fee_rate, dec!(2.0));

    let back = serde_json::to_string(&parsed).unwrap();
    assert!(back.contains("Committed Capital"));
}

#[test]
fn test_projection_serialises_through_envelope() {
    let params = fund_params(dec!(50), 10, 4, dec!(8));
    let schedule = default_schedule(&params).unwrap();
    let result = project_fees(&params, &schedule).unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["result"]["yearly"].as_array().unwrap().len(), 10);
    assert!(value["result"]["total_fees"].is_string());
    assert!(value["metadata"]["version"].is_string());
}
