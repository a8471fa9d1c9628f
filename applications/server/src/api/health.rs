/// Liveness endpoint

/// GET / - plain-text liveness probe, no auth
pub async fn root() -> &'static str {
    "E-Bazar server is running"
}
