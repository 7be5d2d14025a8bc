//! Construction of the template service from the stored session.

use anyhow::{Context, Result};
use tracing::warn;

use crate::api::{ApiError, ShopClient};
use crate::session::ShopSessionStore;
use crate::template::{KeyGenerator, ServiceError, TemplateService};

/// Build a service bound to the configured shop, failing when no session exists.
pub fn build_service(
    cache_dir: Option<String>,
    max_key_attempts: Option<u32>,
) -> Result<TemplateService<ShopClient>> {
    let session_store = ShopSessionStore::new(cache_dir)?;
    let session = session_store
        .get_session()?
        .context("Not logged in. Run 'themedup login --shop <domain>' first.")?;

    let client = ShopClient::new(&session.shop, session.access_token, &session.api_version)?;
    Ok(TemplateService::new(client, KeyGenerator::new(max_key_attempts)))
}

/// Like [`build_service`], but logs and returns `None` instead of failing.
pub fn try_build_service(
    cache_dir: Option<String>,
    max_key_attempts: Option<u32>,
) -> Option<TemplateService<ShopClient>> {
    match build_service(cache_dir, max_key_attempts) {
        Ok(service) => Some(service),
        Err(e) => {
            warn!("Template service unavailable: {:#}", e);
            None
        }
    }
}

/// Turn a service failure into the generic error shown to the user.
///
/// Diagnostic detail has already been logged by the service; only the
/// public message and, for rejected credentials, a hint are surfaced.
pub(super) fn report(err: ServiceError) -> anyhow::Error {
    if let ServiceError::UpstreamFetchFailure(source) | ServiceError::UpstreamCreateFailure(source) =
        &err
    {
        if let Some(api_error) = source.downcast_ref::<ApiError>() {
            if api_error.is_fatal() {
                eprintln!("   {}", api_error.user_hint());
            }
        }
    }
    anyhow::anyhow!(err.public_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_hides_upstream_detail() {
        let err = report(ServiceError::UpstreamFetchFailure(anyhow::anyhow!(
            "connection refused at 10.0.0.7:443"
        )));
        assert_eq!(err.to_string(), "Failed to fetch");
    }

    #[test]
    fn test_report_keeps_invalid_input_reason() {
        let err = report(ServiceError::InvalidInput("source key is required".to_string()));
        assert_eq!(err.to_string(), "Invalid input: source key is required");
    }
}
