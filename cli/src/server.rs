//! HTTP REST front end of the diagnostic service.

mod handlers;

pub use handlers::{ErrorResponse, TargetQuery, create_router};

/// Hint attached to path-trace failures, which are usually privilege problems.
pub const PRIVILEGE_HINT: &str =
    "Make sure you are running the application with administrator privileges";
