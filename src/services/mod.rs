pub mod auth_service;
pub mod investment_service;
pub mod portfolio_service;
pub mod product_service;
pub mod returns;
