//! Text grammars for the output of platform diagnostic utilities.
//!
//! * [`grammar`]: line classification, one recognizer per platform family.
//! * [`ping`]: reachability report parsing and formatting.
//! * [`address`]: dotted-quad extraction for path traces.

pub mod address;
pub mod grammar;
pub mod ping;
