use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::RiskLevel;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvestmentType {
    Bond,
    Fd,
    Mf,
    Etf,
    Other,
}

impl std::fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentType::Bond => write!(f, "bond"),
            InvestmentType::Fd => write!(f, "fd"),
            InvestmentType::Mf => write!(f, "mf"),
            InvestmentType::Etf => write!(f, "etf"),
            InvestmentType::Other => write!(f, "other"),
        }
    }
}

// Catalog entry. Seeded and administered outside this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct InvestmentProduct {
    pub id: Uuid,
    pub name: String,
    pub investment_type: InvestmentType,
    pub tenure_months: i32,
    /// Nominal yearly interest rate in percent (8.5 for 8.5%)
    pub annual_yield: BigDecimal,
    pub risk_level: RiskLevel,
    pub min_investment: BigDecimal,
    /// `None` means the product has no upper cap
    pub max_investment: Option<BigDecimal>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Columns a product listing may be ordered by. Always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    AnnualYield,
    TenureMonths,
    MinInvestment,
    CreatedAt,
}

impl ProductSort {
    /// Maps a client-supplied sort key onto the allow-list.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "annual_yield" => Some(ProductSort::AnnualYield),
            "tenure_months" => Some(ProductSort::TenureMonths),
            "min_investment" => Some(ProductSort::MinInvestment),
            "created_at" => Some(ProductSort::CreatedAt),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            ProductSort::AnnualYield => "annual_yield",
            ProductSort::TenureMonths => "tenure_months",
            ProductSort::MinInvestment => "min_investment",
            ProductSort::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub risk_level: Option<RiskLevel>,
    pub investment_type: Option<InvestmentType>,
    pub sort: Option<ProductSort>,
}

/// Query string of `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub risk_level: Option<RiskLevel>,
    pub investment_type: Option<InvestmentType>,
    pub sort_by: Option<String>,
}

impl From<ProductQuery> for ProductFilter {
    fn from(query: ProductQuery) -> Self {
        // Absent sort_by falls back to yield; unknown keys leave the store order alone.
        let sort = match query.sort_by.as_deref() {
            None => Some(ProductSort::AnnualYield),
            Some(key) => ProductSort::from_param(key),
        };
        Self {
            risk_level: query.risk_level,
            investment_type: query.investment_type,
            sort,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<InvestmentProduct>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product: InvestmentProduct,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<InvestmentProduct>,
    pub risk_appetite: RiskLevel,
}
