//! Reference billing adapter
//!
//! Hand-written example of the shape every generated adapter should have:
//! constructed with an API key, one HTTP call per canonical operation.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Canonical customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Canonical invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Provider response missing field: {0}")]
    MissingField(&'static str),
}

/// The two operations a billing adapter exposes
#[async_trait]
pub trait BillingAdapter: Send + Sync {
    /// Create a customer, returning the provider's id for it
    async fn create_customer(&self, data: &Customer) -> Result<String, AdapterError>;

    async fn get_invoice(&self, id: &str) -> Result<Invoice, AdapterError>;
}

/// Adapter for the Dummy Billing API (`X-API-Key` auth)
#[derive(Debug, Clone)]
pub struct DummyAdapter {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl DummyAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.dummybilling.com";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn error_for(response: reqwest::Response) -> AdapterError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        AdapterError::Status { status, body }
    }
}

#[async_trait]
impl BillingAdapter for DummyAdapter {
    async fn create_customer(&self, data: &Customer) -> Result<String, AdapterError> {
        let response = self
            .http_client
            .post(format!("{}/customers", self.base_url))
            .header("X-API-Key", &self.api_key)
            .json(data)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            return Err(Self::error_for(response).await);
        }

        let body: serde_json::Value = response.json().await?;
        body.get("id")
            .and_then(|id| id.as_str())
            .map(String::from)
            .ok_or(AdapterError::MissingField("id"))
    }

    async fn get_invoice(&self, id: &str) -> Result<Invoice, AdapterError> {
        let response = self
            .http_client
            .get(format!("{}/invoices/{}", self.base_url, id))
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Self::error_for(response).await);
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn customer() -> Customer {
        Customer {
            id: "local-1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_customer() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/customers"))
            .and(header("x-api-key", "secret"))
            .and(body_json(json!({
                "id": "local-1",
                "name": "Ada Lovelace",
                "email": "ada@example.com"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "cus_42"})))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = DummyAdapter::with_base_url("secret", server.uri());
        let id = adapter.create_customer(&customer()).await.unwrap();
        assert_eq!(id, "cus_42");
    }

    #[tokio::test]
    async fn test_create_customer_rejects_non_created() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "cus_42"})))
            .mount(&server)
            .await;

        let adapter = DummyAdapter::with_base_url("secret", server.uri());
        let err = adapter.create_customer(&customer()).await.unwrap_err();
        assert!(matches!(err, AdapterError::Status { status, .. } if status == StatusCode::OK));
    }

    #[tokio::test]
    async fn test_get_invoice() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/invoices/inv_7"))
            .and(header("x-api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "inv_7",
                "customer_id": "cus_42",
                "amount": 19.99,
                "currency": "EUR"
            })))
            .mount(&server)
            .await;

        let adapter = DummyAdapter::with_base_url("secret", server.uri());
        let invoice = adapter.get_invoice("inv_7").await.unwrap();
        assert_eq!(
            invoice,
            Invoice {
                id: "inv_7".to_string(),
                customer_id: "cus_42".to_string(),
                amount: 19.99,
                currency: "EUR".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_get_invoice_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/invoices/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such invoice"))
            .mount(&server)
            .await;

        let adapter = DummyAdapter::with_base_url("secret", server.uri());
        match adapter.get_invoice("missing").await.unwrap_err() {
            AdapterError::Status { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "no such invoice");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }
}
