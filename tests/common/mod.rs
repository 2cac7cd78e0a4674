#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bigdecimal::BigDecimal;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use grip_invest::app::create_app;
use grip_invest::config::AppConfig;
use grip_invest::models::{AuditEntry, InvestmentProduct, InvestmentType, RiskLevel};
use grip_invest::state::AppState;
use grip_invest::store::MemoryStore;

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub router: Router,
}

impl TestApp {
    pub fn new(products: Vec<InvestmentProduct>) -> Self {
        let store = Arc::new(MemoryStore::with_products(products));
        let state = AppState::new(store.clone(), AppConfig::for_tests(JWT_SECRET));
        Self { store, router: create_app(state) }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn invest(&self, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, "/api/investments", Some(token), Some(body)).await
    }

    /// Registers a user and returns a bearer token for them.
    pub async fn login_as(&self, email: &str, risk_appetite: &str) -> String {
        let (status, _) = self
            .request(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({
                    "first_name": "Investment",
                    "last_name": "Tester",
                    "email": email,
                    "password": "password123",
                    "risk_appetite": risk_appetite,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": "password123" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn wait_for_audit(&self, count: usize) -> Vec<AuditEntry> {
        for _ in 0..100 {
            let entries = self.store.audit_entries();
            if entries.len() >= count {
                return entries;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.store.audit_entries()
    }
}

pub fn product(
    name: &str,
    investment_type: InvestmentType,
    risk_level: RiskLevel,
    annual_yield: &str,
    tenure_months: i32,
) -> InvestmentProduct {
    let now = Utc::now();
    InvestmentProduct {
        id: Uuid::new_v4(),
        name: name.to_string(),
        investment_type,
        tenure_months,
        annual_yield: BigDecimal::from_str(annual_yield).unwrap(),
        risk_level,
        min_investment: BigDecimal::from(1000),
        max_investment: None,
        description: Some(format!("{} description", name)),
        created_at: now,
        updated_at: now,
    }
}

/// Decimal fields serialize as strings; accept numbers too.
pub fn dec(value: &Value) -> BigDecimal {
    match value {
        Value::String(s) => BigDecimal::from_str(s).unwrap(),
        Value::Number(n) => BigDecimal::from_str(&n.to_string()).unwrap(),
        other => panic!("not a decimal: {}", other),
    }
}
