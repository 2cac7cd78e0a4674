mod audit;
mod investment;
mod product;
mod risk;
mod user;

use std::sync::OnceLock;

use regex::Regex;

pub use audit::{Actor, AuditEntry};
pub use investment::{
    CreateInvestment, CreatedInvestmentResponse, Investment, InvestmentDetails,
    InvestmentResponse, InvestmentStatus, MessageResponse, PortfolioResponse, PortfolioSummary,
    AMOUNT_CEILING, MIN_REQUEST_AMOUNT, MONEY_SCALE,
};
pub use product::{
    InvestmentProduct, InvestmentType, ProductFilter, ProductListResponse, ProductQuery,
    ProductResponse, ProductSort, RecommendationResponse,
};
pub use risk::RiskLevel;
pub use user::{
    LoginRequest, LoginResponse, NewUser, ProfileResponse, PublicUser, SignupRequest,
    SignupResponse, User,
};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"))
        .is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;
    use uuid::Uuid;

    fn signup(first_name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            first_name: first_name.to_string(),
            last_name: None,
            email: email.to_string(),
            password: password.to_string(),
            risk_appetite: None,
        }
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("jane@example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_signup_validation_rules() {
        assert!(signup("Jo", "jo@example.com", "secret").validate().is_ok());
        assert_eq!(
            signup(" J ", "jo@example.com", "secret").validate().unwrap_err(),
            "First name must be at least 2 characters long"
        );
        assert_eq!(
            signup("Jo", "not-an-email", "secret").validate().unwrap_err(),
            "Valid email address is required"
        );
        assert_eq!(
            signup("Jo", "jo@example.com", "12345").validate().unwrap_err(),
            "Password must be at least 6 characters long"
        );
    }

    fn investment_request(product_id: Option<Uuid>, amount: &str) -> CreateInvestment {
        CreateInvestment {
            product_id,
            amount: Some(BigDecimal::from_str(amount).unwrap()),
        }
    }

    #[test]
    fn test_investment_request_floor() {
        let product_id = Some(Uuid::new_v4());
        assert!(investment_request(product_id, "999").validate().is_err());

        let (id, amount) = investment_request(product_id, "1000").validate().unwrap();
        assert_eq!(Some(id), product_id);
        assert_eq!(amount, BigDecimal::from(1000));

        assert_eq!(
            investment_request(None, "5000").validate().unwrap_err(),
            "Product ID is required"
        );
    }

    #[test]
    fn test_investment_amount_normalized_to_money_scale() {
        let product_id = Some(Uuid::new_v4());
        let (_, amount) = investment_request(product_id, "10000.10000000000").validate().unwrap();
        assert_eq!(amount.to_string(), "10000.10");

        let (_, amount) = investment_request(product_id, "2500").validate().unwrap();
        assert_eq!(amount.to_string(), "2500.00");

        assert_eq!(
            investment_request(product_id, "1000.005").validate().unwrap_err(),
            "Amount cannot have more than 2 decimal places"
        );
    }

    #[test]
    fn test_investment_amount_must_fit_money_column() {
        let product_id = Some(Uuid::new_v4());
        assert!(investment_request(product_id, "9999999999999.99").validate().is_ok());
        assert_eq!(
            investment_request(product_id, "10000000000000").validate().unwrap_err(),
            "Amount exceeds the maximum allowed value"
        );
    }

    #[test]
    fn test_sort_allow_list() {
        assert_eq!(ProductSort::from_param("tenure_months"), Some(ProductSort::TenureMonths));
        assert_eq!(ProductSort::from_param("droptable"), None);
        assert_eq!(ProductSort::from_param("annual_yield; DROP TABLE users"), None);
    }

    #[test]
    fn test_query_defaults_to_yield_sort() {
        let filter = ProductFilter::from(ProductQuery::default());
        assert_eq!(filter.sort, Some(ProductSort::AnnualYield));

        let filter = ProductFilter::from(ProductQuery {
            sort_by: Some("droptable".to_string()),
            ..Default::default()
        });
        assert_eq!(filter.sort, None);
    }

    #[test]
    fn test_risk_level_wire_format() {
        assert_eq!(serde_json::to_string(&RiskLevel::Moderate).unwrap(), "\"moderate\"");
        assert_eq!("high".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("extreme".parse::<RiskLevel>().is_err());
    }
}
