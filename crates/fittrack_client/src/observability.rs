//! Readiness probing against the progress backend.

/// Result of a backend health probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Health {
    pub ready: bool,
    pub status: Option<u16>,
}

impl Health {
    /// Static readiness of this process (no backend involved).
    pub fn readiness() -> Self {
        Self {
            ready: true,
            status: None,
        }
    }
}

/// Probe the backend's `/health` endpoint. Any transport failure is
/// reported as not ready rather than an error.
pub async fn check_backend(base_url: &str) -> Health {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    match reqwest::get(&url).await {
        Ok(resp) => {
            let status = resp.status().as_u16();
            Health {
                ready: resp.status().is_success(),
                status: Some(status),
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "backend health probe failed");
            Health {
                ready: false,
                status: None,
            }
        }
    }
}
