//! Connector registry: one syncer per resource kind

use crate::config::ConnectorConfig;
use crate::sync::{
    GroupSyncer, OrgSyncer, ResourceProvisioner, ResourceSyncer, RoleSyncer, TeamSyncer,
    UserSyncer,
};
use deskgraph_client::{UpstreamApi, UserListOptions, ZendeskClient};
use deskgraph_core::{ConnectorResult, ResourceKind};
use std::sync::Arc;

/// Display metadata reported to the host sync engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
}

pub struct Connector {
    api: Arc<dyn UpstreamApi>,
    orgs: Vec<String>,
}

impl Connector {
    /// Build a connector backed by the live upstream API.
    pub fn new(config: &ConnectorConfig) -> Self {
        let api = Arc::new(ZendeskClient::new(
            &config.subdomain,
            config.email.clone(),
            config.api_token.clone(),
        ));
        Self::with_api(api, config.orgs.clone())
    }

    /// Build a connector over any API implementation (tests use a mock).
    pub fn with_api(api: Arc<dyn UpstreamApi>, orgs: Vec<String>) -> Self {
        Self { api, orgs }
    }

    /// One syncer per resource kind, in sync order.
    pub fn resource_syncers(&self) -> Vec<Arc<dyn ResourceSyncer>> {
        vec![
            Arc::new(GroupSyncer::new(self.api.clone())),
            Arc::new(OrgSyncer::new(self.api.clone(), &self.orgs)),
            Arc::new(RoleSyncer::new(self.api.clone())),
            Arc::new(TeamSyncer::new(self.api.clone())),
            Arc::new(UserSyncer::new(self.api.clone())),
        ]
    }

    /// Grant/revoke handler for a resource kind, where mutation is
    /// supported. Users and team members are read-only projections.
    pub fn provisioner_for(&self, kind: ResourceKind) -> Option<Arc<dyn ResourceProvisioner>> {
        match kind {
            ResourceKind::Group => Some(Arc::new(GroupSyncer::new(self.api.clone()))),
            ResourceKind::Org => Some(Arc::new(OrgSyncer::new(self.api.clone(), &self.orgs))),
            ResourceKind::Role => Some(Arc::new(RoleSyncer::new(self.api.clone()))),
            ResourceKind::User | ResourceKind::TeamMember => None,
        }
    }

    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "Deskgraph Connector".to_string(),
            description: "Syncs users, groups, organizations, and roles from Zendesk".to_string(),
        }
    }

    /// Exercise the configured credentials with one harmless listing.
    pub async fn validate(&self) -> ConnectorResult<()> {
        self.api.list_users(UserListOptions::default()).await?;
        Ok(())
    }
}
