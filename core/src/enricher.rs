//! Geolocation Enricher.
//!
//! Wraps a [`GeoLocator`] so that every requested address yields a
//! [`GeoRecord`]: lookup errors become sentinel records and are never
//! surfaced to the caller.

use std::sync::Arc;
use std::time::Duration;

use netlens_common::geo::{GeoLocator, GeoRecord, LookupError};
use netlens_common::network::address::NetworkAddress;
use tokio::task::JoinHandle;
use tracing::{error, warn};

#[derive(Clone)]
pub struct GeoEnricher {
    locator: Arc<dyn GeoLocator>,
    timeout: Duration,
}

impl GeoEnricher {
    pub fn new(locator: Arc<dyn GeoLocator>, timeout: Duration) -> Self {
        Self { locator, timeout }
    }

    /// Looks up one address. Never fails.
    pub async fn enrich(&self, address: &str) -> GeoRecord {
        let lookup = tokio::time::timeout(self.timeout, self.locator.locate(address)).await;
        match lookup.unwrap_or_else(|_| Err(LookupError::Timeout)) {
            Ok(details) => GeoRecord::from_details(address, details),
            Err(e) => {
                warn!("Geolocation error for IP {address}: {e}");
                GeoRecord::not_found(address)
            }
        }
    }

    /// Looks up every address concurrently, one task per address.
    ///
    /// Waits for all tasks. The output has one record per input, in input
    /// order, whatever order the lookups complete in.
    pub async fn enrich_all(&self, addresses: Vec<NetworkAddress>) -> Vec<GeoRecord> {
        let handles: Vec<(NetworkAddress, JoinHandle<GeoRecord>)> = addresses
            .into_iter()
            .map(|address| {
                let enricher: GeoEnricher = self.clone();
                let query: NetworkAddress = address.clone();
                let handle = tokio::spawn(async move { enricher.enrich(query.as_str()).await });
                (address, handle)
            })
            .collect();

        let mut records: Vec<GeoRecord> = Vec::with_capacity(handles.len());
        for (address, handle) in handles {
            match handle.await {
                Ok(record) => records.push(record),
                Err(e) => {
                    error!("Failed to get geolocation for IP {address}: {e}");
                    records.push(GeoRecord::lookup_failed(address));
                }
            }
        }
        records
    }
}
