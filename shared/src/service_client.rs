//! HTTP client for the Hissaback backend

use crate::{error::AppError, error::ErrorDetail, models::*, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: String,
    service_name: String,
}

impl ServiceClient {
    pub fn new(base_url: String, service_name: String, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_name,
        })
    }

    /// Make a GET request
    pub async fn get<T>(&self, endpoint: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("🌐 GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<Q, T>(&self, endpoint: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("🌐 GET {} (with query)", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Make a POST request
    pub async fn post<T, R>(&self, endpoint: &str, body: &T) -> Result<R>
    where
        T: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("🌐 POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handle HTTP response and deserialize
    async fn handle_response<T>(&self, response: Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.map_reqwest_error(e))?;
            Ok(serde_json::from_str::<T>(&body)?)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_default();

            let detail = serde_json::from_str::<ErrorDetail>(&error_text)
                .ok()
                .and_then(|body| body.message());

            debug!(
                "⚠️ {} answered HTTP {} - {}",
                self.service_name,
                status,
                if error_text.is_empty() { "<empty body>" } else { error_text.as_str() }
            );

            Err(AppError::backend(status.as_u16(), detail))
        }
    }

    /// Map reqwest errors to AppError
    fn map_reqwest_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::timeout(format!("Request to {} timed out", self.service_name))
        } else if error.is_connect() {
            AppError::service_unavailable(&self.service_name)
        } else {
            AppError::external_service(&self.service_name, error.to_string())
        }
    }
}

/// Everything the widget needs from the backend.
#[async_trait]
pub trait HissabackApi: Send + Sync {
    async fn list_offers(&self) -> Result<Vec<Offer>>;
    async fn list_campaigns(&self) -> Result<Vec<Campaign>>;
    async fn list_links(&self) -> Result<Vec<SmartLink>>;
    async fn create_link(&self, request: &CreateLinkRequest) -> Result<SmartLink>;
    async fn request_otp(&self, request: &OtpRequest) -> Result<OtpRequested>;
    async fn verify_otp(&self, request: &OtpVerifyRequest) -> Result<OtpVerification>;
    async fn track_click(&self, event: &ClickEvent) -> Result<ClickRecord>;
    async fn user_payouts(&self, user_id: &str) -> Result<UserPayouts>;
    async fn health(&self) -> Result<HealthStatus>;
}

pub struct HissabackClient {
    client: ServiceClient,
}

impl HissabackClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> Result<Self> {
        let client = ServiceClient::new(base_url, "hissaback-api".to_string(), timeout_seconds)?;
        Ok(Self { client })
    }

    pub fn from_config(config: &crate::Config) -> Result<Self> {
        Self::new(
            config.backend.api_url.clone(),
            config.backend.request_timeout_seconds,
        )
    }
}

#[async_trait]
impl HissabackApi for HissabackClient {
    async fn list_offers(&self) -> Result<Vec<Offer>> {
        self.client.get("/v1/offers").await
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let list: CampaignList = self.client.get("/v1/campaigns").await?;
        Ok(list.campaigns)
    }

    async fn list_links(&self) -> Result<Vec<SmartLink>> {
        let list: LinkList = self.client.get("/v1/links").await?;
        Ok(list.links)
    }

    async fn create_link(&self, request: &CreateLinkRequest) -> Result<SmartLink> {
        self.client.post("/v1/links", request).await
    }

    async fn request_otp(&self, request: &OtpRequest) -> Result<OtpRequested> {
        self.client.post("/v1/auth/enduser/otp/request", request).await
    }

    async fn verify_otp(&self, request: &OtpVerifyRequest) -> Result<OtpVerification> {
        self.client.post("/v1/auth/enduser/otp/verify", request).await
    }

    async fn track_click(&self, event: &ClickEvent) -> Result<ClickRecord> {
        self.client.post("/v1/events/click", event).await
    }

    async fn user_payouts(&self, user_id: &str) -> Result<UserPayouts> {
        self.client
            .get_with_query("/v1/rewards/user", &[("user_id", user_id)])
            .await
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.client.get("/health").await
    }
}
