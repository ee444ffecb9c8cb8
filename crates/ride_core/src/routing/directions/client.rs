use reqwest::{blocking::Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

use super::error::DirectionsError;
use super::parser::parse_response;
use super::response::DirectionsResponse;
use super::STATUS_OK;
use crate::config::DirectionsConfig;
use crate::routing::DirectionsProvider;
use crate::spatial::GeoPoint;

const DIRECTIONS_PATH: &str = "/maps/api/directions/json";

/// Thin blocking HTTP client for the directions provider.
#[derive(Debug, Clone)]
pub struct HttpDirectionsClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpDirectionsClient {
    pub fn new(config: &DirectionsConfig) -> Result<Self, DirectionsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn request_url(&self, origin: GeoPoint, destination: GeoPoint) -> Result<Url, DirectionsError> {
        let mut url = Url::parse(&format!("{}{}", self.endpoint, DIRECTIONS_PATH)).map_err(
            |err| DirectionsError::Api(format!("failed to build directions URL: {}", err)),
        )?;
        url.query_pairs_mut()
            .append_pair("origin", &origin.to_string())
            .append_pair("destination", &destination.to_string())
            .append_pair("mode", "driving");
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }
}

impl DirectionsProvider for HttpDirectionsClient {
    fn directions(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsResponse, DirectionsError> {
        let url = self.request_url(origin, destination)?;
        debug!(%origin, %destination, "requesting directions");

        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        let parsed = parse_response(&body)?;
        if parsed.status != STATUS_OK {
            warn!(
                status = %parsed.status,
                message = parsed.error_message.as_deref().unwrap_or(""),
                "directions provider returned no route"
            );
        }
        Ok(parsed)
    }
}
