use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{InvestmentProduct, InvestmentType, RiskLevel};

pub fn product(
    name: &str,
    risk_level: RiskLevel,
    annual_yield: i64,
    tenure_months: i32,
) -> InvestmentProduct {
    let now = Utc::now();
    InvestmentProduct {
        id: Uuid::new_v4(),
        name: name.to_string(),
        investment_type: InvestmentType::Bond,
        tenure_months,
        annual_yield: BigDecimal::from(annual_yield),
        risk_level,
        min_investment: BigDecimal::from(1000),
        max_investment: None,
        description: None,
        created_at: now,
        updated_at: now,
    }
}
