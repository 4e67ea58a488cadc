//! Audit core - capture of inbound calls and the read side over them

pub mod actor;
pub mod capture;
pub mod export;
pub mod filter;
pub mod query;
pub mod stats;

pub use self::actor::resolve_actor;
pub use self::capture::capture_request;
pub use self::filter::{FilterError, LogFilter};

/// Query surface prefix. Calls under it are never captured.
pub const LOGS_PATH: &str = "/api/logs";

/// Actor attributed when the caller gives no identity
pub const ANONYMOUS_ACTOR: &str = "anonymous";
