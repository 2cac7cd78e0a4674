use bigdecimal::BigDecimal;

/// Maturity value under simple interest prorated monthly:
/// `principal + principal * annual_yield * tenure_months / 1200`.
///
/// `annual_yield` is a percentage. Nothing compounds.
pub fn calculate_return(
    principal: &BigDecimal,
    annual_yield: &BigDecimal,
    tenure_months: i32,
) -> BigDecimal {
    let interest = principal * annual_yield * BigDecimal::from(tenure_months)
        / BigDecimal::from(100 * 12);
    principal.clone() + interest
}
