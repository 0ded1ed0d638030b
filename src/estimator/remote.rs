//! Remote estimation backend
//!
//! Delegates estimation to an external HTTP service exposing
//! `/food-estimate`, `/movement-estimate`, and `/craving-alternatives`
//! endpoints. Network failures map to [`EstimatorError`] variants so callers
//! can distinguish a slow service from a down one.

use crate::estimator::{
    CravingSuggestions, EstimatorError, FoodEstimate, FoodQuery, MovementEstimate, TextEstimator,
};
use crate::events::types::MovementIntensity;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Configuration for the remote estimation service
#[derive(Debug, Clone)]
pub struct RemoteEstimatorConfig {
    /// Base URL of the estimation service (e.g., "http://localhost:8090")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for RemoteEstimatorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

/// HTTP client for a remote estimation service
pub struct RemoteEstimator {
    client: Client,
    config: RemoteEstimatorConfig,
}

#[derive(Serialize)]
struct MovementRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    intensity: Option<MovementIntensity>,
}

#[derive(Serialize)]
struct CravingRequest<'a> {
    text: &'a str,
}

impl RemoteEstimator {
    pub fn new(config: RemoteEstimatorConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    pub fn config(&self) -> &RemoteEstimatorConfig {
        &self.config
    }

    /// Check if the estimation service is reachable
    pub async fn health_check(&self) -> Result<(), EstimatorError> {
        let url = format!("{}/health", self.config.base_url);

        let response = self.client.get(&url).send().await.map_err(map_error)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(EstimatorError::Unavailable)
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, EstimatorError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%url, "estimation request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_error)?;

        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| EstimatorError::InvalidResponse(e.to_string()))
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "estimation service returned an error");
            Err(EstimatorError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

fn map_error(e: reqwest::Error) -> EstimatorError {
    if e.is_timeout() {
        EstimatorError::Timeout
    } else if e.is_connect() {
        EstimatorError::Unavailable
    } else {
        EstimatorError::Request(e)
    }
}

#[async_trait]
impl TextEstimator for RemoteEstimator {
    async fn estimate_food(&self, query: &FoodQuery) -> Result<FoodEstimate, EstimatorError> {
        self.post("/food-estimate", query).await
    }

    async fn estimate_movement(
        &self,
        text: &str,
        intensity: Option<MovementIntensity>,
    ) -> Result<MovementEstimate, EstimatorError> {
        self.post("/movement-estimate", &MovementRequest { text, intensity })
            .await
    }

    async fn craving_suggestions(&self, text: &str) -> Result<CravingSuggestions, EstimatorError> {
        self.post("/craving-alternatives", &CravingRequest { text })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RemoteEstimatorConfig::default();
        assert_eq!(config.base_url, "http://localhost:8090");
        assert_eq!(config.request_timeout_ms, 5000);
    }

    #[tokio::test]
    async fn test_unreachable_service_maps_to_unavailable() {
        // Nothing listens on this port
        let estimator = RemoteEstimator::new(RemoteEstimatorConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 500,
        });

        let result = estimator.estimate_food(&FoodQuery::new("salad")).await;
        assert!(matches!(
            result,
            Err(EstimatorError::Unavailable | EstimatorError::Timeout)
        ));
    }
}
