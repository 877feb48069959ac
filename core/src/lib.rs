//! # Netlens Core
//!
//! The diagnostic pipeline and the concrete adapters behind its ports.
//!
//! * **[`command`]**: platform command lines and per-mode deadlines.
//! * **[`executor`]**: runs a utility as a child process under a deadline.
//! * **[`locator`]**: ip-api.com client implementing the geolocation port.
//! * **[`enricher`]**: best-effort annotation of addresses, concurrently.
//! * **[`diagnostics`]**: orchestrates one request from probe to result.
//! * **[`system`]**: host privilege checks.

pub mod command;
pub mod diagnostics;
pub mod enricher;
pub mod executor;
pub mod locator;
pub mod system;
