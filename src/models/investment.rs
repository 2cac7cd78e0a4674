use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{InvestmentType, RiskLevel};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    Active,
    Matured,
    Cancelled,
}

impl std::fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentStatus::Active => write!(f, "active"),
            InvestmentStatus::Matured => write!(f, "matured"),
            InvestmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// A user's holding in one product. `expected_return` is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Investment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub amount: BigDecimal,
    pub invested_at: DateTime<Utc>,
    pub status: InvestmentStatus,
    pub expected_return: BigDecimal,
    pub maturity_date: NaiveDate,
}

/// An investment joined with the product fields shown next to it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct InvestmentDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub investment: Investment,
    pub product_name: String,
    pub investment_type: InvestmentType,
    pub risk_level: RiskLevel,
    pub description: Option<String>,
    pub annual_yield: BigDecimal,
    pub tenure_months: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvestment {
    pub product_id: Option<Uuid>,
    pub amount: Option<BigDecimal>,
}

/// Smallest amount accepted at the request layer, regardless of product.
pub const MIN_REQUEST_AMOUNT: i64 = 1000;

/// Amounts must stay below this to fit `NUMERIC(15,2)`.
pub const AMOUNT_CEILING: i64 = 10_000_000_000_000;

/// Fractional digits carried by every stored money value.
pub const MONEY_SCALE: i64 = 2;

impl CreateInvestment {
    /// Returns the product id and the amount at money scale once both are
    /// present and plausible.
    pub fn validate(&self) -> Result<(Uuid, BigDecimal), String> {
        let product_id = self
            .product_id
            .ok_or_else(|| "Product ID is required".to_string())?;
        let amount = match &self.amount {
            Some(amount) if *amount >= BigDecimal::from(MIN_REQUEST_AMOUNT) => amount,
            _ => return Err("Minimum investment amount is ₹1,000".to_string()),
        };
        let scaled = amount.with_scale(MONEY_SCALE);
        if scaled != *amount {
            return Err("Amount cannot have more than 2 decimal places".to_string());
        }
        if scaled >= BigDecimal::from(AMOUNT_CEILING) {
            return Err("Amount exceeds the maximum allowed value".to_string());
        }
        Ok((product_id, scaled))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    pub total_invested: BigDecimal,
    pub total_expected_return: BigDecimal,
    pub total_gain: BigDecimal,
    pub active_investments: u64,
}

impl Default for PortfolioSummary {
    fn default() -> Self {
        Self {
            total_invested: BigDecimal::zero(),
            total_expected_return: BigDecimal::zero(),
            total_gain: BigDecimal::zero(),
            active_investments: 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedInvestmentResponse {
    pub message: String,
    pub investment: InvestmentDetails,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub investments: Vec<InvestmentDetails>,
    pub portfolio_summary: PortfolioSummary,
}

#[derive(Debug, Serialize)]
pub struct InvestmentResponse {
    pub investment: InvestmentDetails,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
