//! Organization syncer: role-level grants per upstream organization
//!
//! An optional allow-list of organization names restricts which orgs are
//! surfaced; an empty allow-list means every organization. Only orgs with at
//! least one admin member qualify.

use crate::mapper;
use crate::sync::{ensure_team_member_principal, title_case, ResourceProvisioner, ResourceSyncer};
use async_trait::async_trait;
use deskgraph_client::{OrganizationListOptions, UpstreamApi, UserListOptions};
use deskgraph_core::{
    ConnectorResult, Entitlement, Grant, PageToken, Resource, ResourceId, ResourceKind,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Role slugs an organization advertises.
const ORG_ACCESS_LEVELS: [&str; 3] = [
    mapper::ROLE_END_USER,
    mapper::ROLE_ADMIN,
    mapper::ROLE_AGENT,
];

pub struct OrgSyncer {
    api: Arc<dyn UpstreamApi>,
    allowed: HashSet<String>,
}

impl OrgSyncer {
    pub fn new(api: Arc<dyn UpstreamApi>, orgs: &[String]) -> Self {
        Self {
            api,
            allowed: orgs.iter().cloned().collect(),
        }
    }

    fn is_allowed(&self, name: &str) -> bool {
        self.allowed.is_empty() || self.allowed.contains(name)
    }
}

#[async_trait]
impl ResourceSyncer for OrgSyncer {
    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::Org
    }

    async fn list(
        &self,
        parent_id: Option<&ResourceId>,
        page: &PageToken,
    ) -> ConnectorResult<(Vec<Resource>, Option<String>)> {
        let opts = OrganizationListOptions {
            page: page.page_number()?,
            per_page: page.size,
        };
        let (orgs, next) = self.api.list_organizations(opts).await?;

        // One admin listing covers the qualification check for every org on
        // the page.
        let (admins, _) = self
            .api
            .list_users(UserListOptions::with_roles(&[mapper::ROLE_ADMIN]))
            .await?;

        let mut resources = Vec::new();
        for org in &orgs {
            if !self.is_allowed(&org.name) {
                continue;
            }
            if admins.iter().any(|u| u.organization_id == org.id) {
                resources.push(mapper::org_resource(
                    org,
                    parent_id.cloned(),
                    ResourceKind::TeamMember,
                ));
            }
        }

        Ok((resources, next))
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _page: &PageToken,
    ) -> ConnectorResult<(Vec<Entitlement>, Option<String>)> {
        let entitlements = ORG_ACCESS_LEVELS
            .iter()
            .map(|level| {
                Entitlement::permission(resource, *level)
                    .with_display_name(format!(
                        "{} Organization {}",
                        resource.display_name,
                        title_case(level)
                    ))
                    .with_description(format!(
                        "Access to {} organization in Zendesk",
                        resource.display_name
                    ))
                    .grantable_to(&[ResourceKind::TeamMember])
            })
            .collect();

        Ok((entitlements, None))
    }

    async fn grants(
        &self,
        resource: &Resource,
        page: &PageToken,
    ) -> ConnectorResult<(Vec<Grant>, Option<String>)> {
        let organization_id = resource.id.numeric()?;
        let opts = UserListOptions {
            page: page.page_number()?,
            per_page: page.size,
            roles: Vec::new(),
        };
        let (users, next) = self.api.organization_users(organization_id, opts).await?;

        let mut grants = Vec::new();
        for user in &users {
            let role_name = user.role.to_lowercase();
            if ORG_ACCESS_LEVELS.contains(&role_name.as_str()) {
                let member = mapper::team_member_resource(user, None);
                grants.push(Grant::new(resource, role_name, member.id));
            } else {
                // Partial-result semantics: an unknown role skips the record,
                // it never fails the pass.
                tracing::warn!(
                    role_name = %role_name,
                    username = %user.name,
                    "unknown upstream role name"
                );
            }
        }

        Ok((grants, next))
    }
}

#[async_trait]
impl ResourceProvisioner for OrgSyncer {
    async fn grant(&self, principal: &Resource, entitlement: &Entitlement) -> ConnectorResult<()> {
        ensure_team_member_principal(principal)?;

        let user_id = principal.id.numeric()?;
        let organization_id = entitlement.resource_id.numeric()?;

        let membership = self
            .api
            .create_organization_membership(user_id, organization_id)
            .await?;
        tracing::info!(
            membership_id = membership.id,
            user_id = membership.user_id,
            organization_id = membership.organization_id,
            "organization membership created"
        );

        Ok(())
    }

    async fn revoke(&self, grant: &Grant) -> ConnectorResult<()> {
        ensure_team_member_principal(&Resource::new(
            grant.principal_id.kind,
            grant.principal_id.id.clone(),
            String::new(),
        ))?;

        let user_id = grant.principal_id.numeric()?;
        let organization_id = grant.resource_id.numeric()?;

        match self
            .api
            .delete_organization_membership(user_id, organization_id)
            .await?
        {
            Some(membership_id) => {
                tracing::info!(
                    membership_id,
                    user_id,
                    organization_id,
                    "organization membership revoked"
                );
            }
            None => {
                tracing::warn!(
                    user_id,
                    organization_id,
                    "organization membership not found upstream"
                );
            }
        }

        Ok(())
    }
}
