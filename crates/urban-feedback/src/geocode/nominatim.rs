//! Nominatim (OpenStreetMap) reverse-geocoding client.
//!
//! Nominatim's usage policy requires an identifying `User-Agent`, so the client
//! refuses to send requests without one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::GeocodingConfig;
use crate::device::Coordinates;

use super::{GeocodeError, ReverseGeocoder};

/// Connect timeout for the lookup. The overall bound is applied by the geocoding stage.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum length for error bodies echoed into errors and logs.
const MAX_ERROR_BODY_LENGTH: usize = 200;

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub struct NominatimClient {
    client: Client,
    endpoint: String,
    zoom: u8,
}

fn create_http_client(user_agent: &str, request_timeout: Duration) -> Result<Client, GeocodeError> {
    if user_agent.trim().is_empty() {
        return Err(GeocodeError::Client(
            "an identifying User-Agent is required".to_string(),
        ));
    }
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .timeout(request_timeout)
        .build()
        .map_err(|e| GeocodeError::Client(e.to_string()))
}

fn truncate_body(body: &str) -> String {
    if body.len() > MAX_ERROR_BODY_LENGTH {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated)", &body[..end])
    } else {
        body.to_string()
    }
}

impl NominatimClient {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: &str,
        zoom: u8,
        request_timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        Ok(Self {
            client: create_http_client(user_agent, request_timeout)?,
            endpoint: endpoint.into(),
            zoom,
        })
    }

    pub fn from_config(config: &GeocodingConfig) -> Result<Self, GeocodeError> {
        Self::new(
            config.endpoint.clone(),
            &config.user_agent,
            config.zoom,
            config.timeout(),
        )
    }

    fn query(&self, coords: Coordinates) -> Vec<(&'static str, String)> {
        vec![
            ("format", "json".to_string()),
            ("lat", coords.lat.to_string()),
            ("lon", coords.lng.to_string()),
            ("zoom", self.zoom.to_string()),
            ("addressdetails", "1".to_string()),
        ]
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn lookup(&self, coords: Coordinates) -> Result<String, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query(coords))
            .send()
            .await
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(
                status = status.as_u16(),
                body = %truncate_body(&body),
                "Reverse geocoding rejected"
            );
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body: ReverseResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                GeocodeError::Malformed(e.to_string())
            } else {
                GeocodeError::Transport(e.to_string())
            }
        })?;

        match body {
            ReverseResponse {
                display_name: Some(name),
                ..
            } => Ok(name),
            ReverseResponse {
                error: Some(message),
                ..
            } => Err(GeocodeError::Service(truncate_body(&message))),
            _ => Err(GeocodeError::MissingDisplayName),
        }
    }
}
