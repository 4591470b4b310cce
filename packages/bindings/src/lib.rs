use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use fund_econ_core::fees::{self, FeePhase, FundParameters};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct ValidateInput {
    schedule: Vec<FeePhase>,
    fund_term: u32,
}

#[derive(Deserialize)]
struct ProjectInput {
    params: FundParameters,
    schedule: Vec<FeePhase>,
}

#[napi]
pub fn validate_schedule(input_json: String) -> NapiResult<String> {
    let input: ValidateInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let report = fees::validate_schedule(&input.schedule, input.fund_term);
    serde_json::to_string(&report).map_err(to_napi_error)
}

#[napi]
pub fn project_fees(input_json: String) -> NapiResult<String> {
    let input: ProjectInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fees::project_fees(&input.params, &input.schedule).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_schedule(input_json: String) -> NapiResult<String> {
    let params: FundParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = fees::default_schedule(&params).map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}
