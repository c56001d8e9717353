pub(crate) const DEFAULT_USER_AGENT: &str = concat!("ledge-swarm/", env!("CARGO_PKG_VERSION"));

/// Platform API base URL; the API listens on port 1323 unless reconfigured.
pub(crate) const DEFAULT_HOST: &str = "http://127.0.0.1:1323";
pub(crate) const DEFAULT_FUNCTION: &str = "func";
pub(crate) const DEFAULT_PARAM_NAME: &str = "n";
pub(crate) const DEFAULT_PARAM_VALUE: &str = "100000";
