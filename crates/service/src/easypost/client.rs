//! HTTP client for the EasyPost v2 REST API.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

use super::EasyPostError;
use super::types::{CreatedShipment, PurchasedShipment, ShipmentRequest};
use crate::config::ShipperConfig;

/// Outbound call timeout. Expiry surfaces as a transport error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// EasyPost REST API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct EasyPostClient {
    client: reqwest::Client,
    base_url: String,
}

impl EasyPostClient {
    /// Create a new EasyPost API client.
    ///
    /// The Basic auth header is built once here: API key as username, empty
    /// password, base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns `EasyPostError::InvalidApiKey` if the key cannot form a valid
    /// header, or `EasyPostError::Http` if the HTTP client fails to build.
    pub fn new(config: &ShipperConfig) -> Result<Self, EasyPostError> {
        let credentials = format!("{}:", config.easypost_api_key.expose_secret());
        let encoded = BASE64.encode(credentials);

        let mut auth = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|e| EasyPostError::InvalidApiKey(e.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.easypost_base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Create a shipment and collect its rate quotes.
    ///
    /// # Errors
    ///
    /// Returns `EasyPostError::Http` on transport failure and
    /// `EasyPostError::Api` on any non-2xx response.
    pub async fn create_shipment(
        &self,
        request: &ShipmentRequest,
    ) -> Result<CreatedShipment, EasyPostError> {
        let url = format!("{}/shipments", self.base_url);
        let body = serde_json::json!({ "shipment": request });

        let response = self.client.post(&url).json(&body).send().await?;
        read_json(response).await
    }

    /// Purchase a quoted rate for a created shipment.
    ///
    /// # Errors
    ///
    /// Returns `EasyPostError::Http` on transport failure and
    /// `EasyPostError::Api` on any non-2xx response.
    pub async fn buy_shipment(
        &self,
        shipment_id: &str,
        rate_id: &str,
        insurance: &str,
    ) -> Result<PurchasedShipment, EasyPostError> {
        let url = format!("{}/shipments/{shipment_id}/buy", self.base_url);
        let body = serde_json::json!({
            "rate": { "id": rate_id },
            "insurance": insurance,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        read_json(response).await
    }
}

/// Check the status and deserialize the body, keeping the raw body on
/// failure for diagnostics.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, EasyPostError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(EasyPostError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}
