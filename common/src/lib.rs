//! # Netlens Common
//!
//! Shared vocabulary of the workspace: request and result models, the
//! outbound ports the diagnostic pipeline depends on, configuration and
//! the error taxonomy.
//!
//! * **[`network`]**: probe targets, modes, platform families and addresses.
//! * **[`probe`]**: raw probe output and the [`probe::ProbeExecutor`] port.
//! * **[`measurement`]**: round-trip samples and loss statistics.
//! * **[`geo`]**: geolocation records and the [`geo::GeoLocator`] port.
//! * **[`diagnostic`]**: the outward-facing result of a diagnostic run.

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod geo;
pub mod measurement;
pub mod network;
pub mod probe;
