//! Geolocation lookups against an ip-api.com compatible service.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use netlens_common::config::Config;
use netlens_common::geo::{GeoDetails, GeoLocator, LookupError};
use serde::Deserialize;

/// Subset of the ip-api.com JSON body. Every field is optional.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: Option<String>,
    message: Option<String>,
    city: Option<String>,
    country: Option<String>,
    isp: Option<String>,
}

pub struct IpApiLocator {
    client: reqwest::Client,
    endpoint: String,
}

impl IpApiLocator {
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building geolocation http client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Self::new(&cfg.geo_endpoint, cfg.geo_timeout)
    }

    fn url_for(&self, query: &str) -> String {
        format!("{}/{}", self.endpoint, query)
    }
}

#[async_trait]
impl GeoLocator for IpApiLocator {
    async fn locate(&self, query: &str) -> Result<GeoDetails, LookupError> {
        let response = self
            .client
            .get(self.url_for(query))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(transport_error)?;

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;

        if body.status.as_deref() == Some("fail") {
            let reason: String = body.message.unwrap_or_else(|| "fail".to_string());
            return Err(LookupError::Rejected(reason));
        }

        Ok(GeoDetails {
            city: non_empty(body.city),
            country: non_empty(body.country),
            isp: non_empty(body.isp),
        })
    }
}

fn transport_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Transport(e.to_string())
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}
