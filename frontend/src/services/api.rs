use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{Cosif, Movement, NewMovement, Product};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },
}

/// API client for the movements backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client pointed at the configured backend
    pub fn new() -> Self {
        Self::with_base_url(AppConfig::from_build_env().api_base_url)
    }

    /// Create a client with a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /movimentos`
    pub async fn get_movements(&self) -> Result<Vec<Movement>, ApiError> {
        let response = Request::get(&self.movements_url())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    /// `POST /movimentos`, returning the stored movement
    pub async fn create_movement(&self, movement: &NewMovement) -> Result<Movement, ApiError> {
        let response = Request::post(&self.movements_url())
            .json(movement)
            .map_err(|e| ApiError::Serialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    /// `GET /produtos`
    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = Request::get(&self.products_url())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    /// `GET /produtos/{code}/cosifs`. No request is made for an empty code.
    pub async fn get_classifications(&self, product_code: &str) -> Result<Vec<Cosif>, ApiError> {
        if product_code.is_empty() {
            return Ok(Vec::new());
        }

        let response = Request::get(&self.classifications_url(product_code))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    fn movements_url(&self) -> String {
        format!("{}/movimentos", self.base_url)
    }

    fn products_url(&self) -> String {
        format!("{}/produtos", self.base_url)
    }

    fn classifications_url(&self, product_code: &str) -> String {
        let encoded: String = js_sys::encode_uri_component(product_code).into();
        format!("{}/produtos/{}/cosifs", self.base_url, encoded)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ApiError::Server { status, body });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
