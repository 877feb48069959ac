//! Cross-crate tests for the diagnostic pipeline and its HTTP front end.

#[cfg(test)]
mod support;

#[cfg(test)]
mod diagnostics;

#[cfg(test)]
mod server;
