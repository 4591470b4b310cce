use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FundEconError;
use crate::types::{Currency, Money, Percent};
use crate::FundEconResult;

/// Static description of a fund. Owned by the caller (UI form state); the
/// engine reads it and never holds on to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundParameters {
    /// Total committed capital, in millions
    pub fund_size: Money,
    /// Total number of years the fund exists
    pub fund_term: u32,
    /// Years during which new investments may be made (1..=fund_term)
    pub investment_period: u32,
    /// Assumed annual growth of deployed capital's fair value (signed,
    /// 8.0 = 8%). Read only by the NAV-sensitive bases.
    pub nav_growth_rate: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

pub(crate) fn validate_params(params: &FundParameters) -> FundEconResult<()> {
    if params.fund_size <= Decimal::ZERO {
        return Err(FundEconError::InvalidInput {
            field: "fund_size".into(),
            reason: "Fund size must be greater than zero".into(),
        });
    }
    if params.fund_term == 0 {
        return Err(FundEconError::InvalidInput {
            field: "fund_term".into(),
            reason: "Fund term must be at least 1 year".into(),
        });
    }
    if params.investment_period == 0 {
        return Err(FundEconError::InvalidInput {
            field: "investment_period".into(),
            reason: "Investment period must be at least 1 year".into(),
        });
    }
    if params.investment_period > params.fund_term {
        return Err(FundEconError::InvalidInput {
            field: "investment_period".into(),
            reason: "Investment period cannot exceed the fund term".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_params() -> FundParameters {
        FundParameters {
            fund_size: dec!(100),
            fund_term: 10,
            investment_period: 5,
            nav_growth_rate: dec!(8),
            currency: Some(Currency::USD),
        }
    }

    #[test]
    fn test_well_formed_params_pass() {
        assert!(validate_params(&base_params()).is_ok());
    }

    #[test]
    fn test_zero_fund_size_rejected() {
        let mut params = base_params();
        params.fund_size = Decimal::ZERO;

        match validate_params(&params).unwrap_err() {
            FundEconError::InvalidInput { field, .. } => assert_eq!(field, "fund_size"),
            other => panic!("Expected InvalidInput for fund_size, got: {other}"),
        }
    }

    #[test]
    fn test_zero_term_rejected() {
        let mut params = base_params();
        params.fund_term = 0;

        match validate_params(&params).unwrap_err() {
            FundEconError::InvalidInput { field, .. } => assert_eq!(field, "fund_term"),
            other => panic!("Expected InvalidInput for fund_term, got: {other}"),
        }
    }

    #[test]
    fn test_zero_investment_period_rejected() {
        let mut params = base_params();
        params.investment_period = 0;

        assert!(validate_params(&params).is_err());
    }

    #[test]
    fn test_investment_period_beyond_term_rejected() {
        let mut params = base_params();
        params.investment_period = 11;

        match validate_params(&params).unwrap_err() {
            FundEconError::InvalidInput { field, .. } => {
                assert_eq!(field, "investment_period");
            }
            other => panic!("Expected InvalidInput for investment_period, got: {other}"),
        }
    }

    #[test]
    fn test_investment_period_equal_to_term_allowed() {
        let mut params = base_params();
        params.investment_period = 10;

        assert!(validate_params(&params).is_ok());
    }
}
