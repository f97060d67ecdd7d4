use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("vprobe/", env!("CARGO_PKG_VERSION"));

/// Base URL the local vehicle API listens on.
pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:8003";

pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
