//! Connector configuration
//!
//! Loaded from environment variables:
//! - `DESKGRAPH_SUBDOMAIN`: the upstream account subdomain (required)
//! - `DESKGRAPH_EMAIL`: account email for API-token auth (required)
//! - `DESKGRAPH_API_TOKEN`: the API token (required)
//! - `DESKGRAPH_ORGS`: comma-separated organization allow-list
//!   (empty = sync all organizations)

use deskgraph_core::{ConnectorError, ConnectorResult};

#[derive(Debug, Clone, Default)]
pub struct ConnectorConfig {
    pub subdomain: String,
    pub email: String,
    pub api_token: String,
    /// Organization names to sync. Empty means every organization the
    /// credentials can see.
    pub orgs: Vec<String>,
}

impl ConnectorConfig {
    pub fn from_env() -> Self {
        let orgs = std::env::var("DESKGRAPH_ORGS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            subdomain: std::env::var("DESKGRAPH_SUBDOMAIN").unwrap_or_default(),
            email: std::env::var("DESKGRAPH_EMAIL").unwrap_or_default(),
            api_token: std::env::var("DESKGRAPH_API_TOKEN").unwrap_or_default(),
            orgs,
        }
    }

    pub fn validate(&self) -> ConnectorResult<()> {
        if self.subdomain.is_empty() {
            return Err(ConnectorError::Config {
                message: "subdomain is required".to_string(),
            });
        }
        if self.api_token.is_empty() {
            return Err(ConnectorError::Config {
                message: "api token is required".to_string(),
            });
        }
        if self.email.is_empty() {
            return Err(ConnectorError::Config {
                message: "email is required".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> ConnectorConfig {
        ConnectorConfig {
            subdomain: "acme".to_string(),
            email: "ops@acme.test".to_string(),
            api_token: "token".to_string(),
            orgs: vec!["Acme".to_string()],
        }
    }

    #[test]
    fn test_full_config_validates() {
        assert!(full_config().validate().is_ok());
    }

    #[test]
    fn test_missing_subdomain_rejected() {
        let mut config = full_config();
        config.subdomain.clear();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConnectorError::Config { .. }));
    }

    #[test]
    fn test_missing_token_rejected() {
        let mut config = full_config();
        config.api_token.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_allow_list_is_valid() {
        let mut config = full_config();
        config.orgs.clear();
        assert!(config.validate().is_ok());
    }
}
