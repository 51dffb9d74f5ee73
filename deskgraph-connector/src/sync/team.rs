//! Team-member syncer: the staff projection of upstream accounts

use crate::mapper;
use crate::sync::{title_case, ResourceSyncer};
use async_trait::async_trait;
use deskgraph_client::{UpstreamApi, UserListOptions};
use deskgraph_core::{
    ConnectorResult, Entitlement, Grant, PageToken, Resource, ResourceId, ResourceKind,
};
use std::sync::Arc;

/// Descriptive role-tier catalog advertised on every team member. Purely
/// informational; no upstream lookup backs it.
const TEAM_ACCESS_LEVELS: [&str; 7] = [
    "member",
    "admin",
    "agent",
    "contributor",
    "legacy agent",
    "light agent",
    "custom roles",
];

pub struct TeamSyncer {
    api: Arc<dyn UpstreamApi>,
}

impl TeamSyncer {
    pub fn new(api: Arc<dyn UpstreamApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResourceSyncer for TeamSyncer {
    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::TeamMember
    }

    async fn list(
        &self,
        parent_id: Option<&ResourceId>,
        page: &PageToken,
    ) -> ConnectorResult<(Vec<Resource>, Option<String>)> {
        let (users, next) = self
            .api
            .list_users(UserListOptions::page(page.page_number()?))
            .await?;

        let resources = users
            .iter()
            .filter(|user| mapper::is_valid_team_member(user))
            .map(|user| mapper::team_member_resource(user, parent_id.cloned()))
            .collect();

        Ok((resources, next))
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _page: &PageToken,
    ) -> ConnectorResult<(Vec<Entitlement>, Option<String>)> {
        let entitlements = TEAM_ACCESS_LEVELS
            .iter()
            .map(|level| {
                Entitlement::permission(resource, *level)
                    .with_display_name(format!(
                        "{} Team Member {}",
                        resource.display_name,
                        title_case(level)
                    ))
                    .with_description(format!(
                        "Access to {} team member in Zendesk",
                        resource.display_name
                    ))
                    .grantable_to(&[ResourceKind::TeamMember])
            })
            .collect();

        Ok((entitlements, None))
    }

    /// Team members are grant targets, not grant sources.
    async fn grants(
        &self,
        _resource: &Resource,
        _page: &PageToken,
    ) -> ConnectorResult<(Vec<Grant>, Option<String>)> {
        Ok((Vec::new(), None))
    }
}
