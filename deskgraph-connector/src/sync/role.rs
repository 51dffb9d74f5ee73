//! Custom role syncer
//!
//! Custom roles are flat upstream; the `member`/`admin` entitlement split is
//! synthesized to match the group shape. Grant derivation cross-references
//! the full user and group sets against each role, the most expensive
//! operation in the connector.

use crate::mapper;
use crate::sync::{
    ensure_team_member_principal, membership_entitlement_pair, ResourceProvisioner, ResourceSyncer,
};
use async_trait::async_trait;
use deskgraph_client::{UpstreamApi, UserListOptions};
use deskgraph_core::{
    ConnectorError, ConnectorResult, Entitlement, Grant, PageToken, Resource, ResourceId,
    ResourceKind,
};
use std::sync::Arc;

use super::group::{ADMIN_ENTITLEMENT, MEMBER_ENTITLEMENT};

pub struct RoleSyncer {
    api: Arc<dyn UpstreamApi>,
}

impl RoleSyncer {
    pub fn new(api: Arc<dyn UpstreamApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResourceSyncer for RoleSyncer {
    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::Role
    }

    async fn list(
        &self,
        parent_id: Option<&ResourceId>,
        _page: &PageToken,
    ) -> ConnectorResult<(Vec<Resource>, Option<String>)> {
        let roles = self.api.custom_roles().await?;
        let resources = roles
            .iter()
            .map(|role| mapper::role_resource(role, parent_id.cloned()))
            .collect();
        // Upstream does not paginate custom roles.
        Ok((resources, None))
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _page: &PageToken,
    ) -> ConnectorResult<(Vec<Entitlement>, Option<String>)> {
        Ok((membership_entitlement_pair(resource), None))
    }

    async fn grants(
        &self,
        resource: &Resource,
        page: &PageToken,
    ) -> ConnectorResult<(Vec<Grant>, Option<String>)> {
        let role_id = resource.id.numeric()?;

        // Fetched fresh per invocation; a page held over from an earlier
        // call would go stale mid-pass.
        let (users, next) = self
            .api
            .list_users(UserListOptions::page(page.page_number()?))
            .await?;

        let mut grants = Vec::new();
        for user in &users {
            if !mapper::is_valid_team_member(user) {
                continue;
            }
            if user.custom_role_id != role_id {
                continue;
            }

            let member = mapper::team_member_resource(user, None);
            grants.push(Grant::new(resource, MEMBER_ENTITLEMENT, member.id.clone()));
            grants.push(Grant::new(&member, MEMBER_ENTITLEMENT, resource.id.clone()));

            if user.role == mapper::ROLE_ADMIN {
                grants.push(Grant::new(resource, ADMIN_ENTITLEMENT, member.id.clone()));
                grants.push(Grant::new(&member, ADMIN_ENTITLEMENT, resource.id.clone()));
            }
        }

        // Groups hold a custom role when their name matches it exactly. Each
        // group detail is fetched once per grants pass.
        let (groups, _) = self.api.list_groups(0).await?;
        for group in &groups {
            let detail = self.api.get_group(group.id).await?;
            if detail.name == resource.display_name {
                let group_resource = mapper::group_resource(&detail, None);
                grants.push(Grant::new(
                    resource,
                    MEMBER_ENTITLEMENT,
                    group_resource.id.clone(),
                ));
                grants.push(Grant::new(
                    &group_resource,
                    MEMBER_ENTITLEMENT,
                    resource.id.clone(),
                ));
            }
        }

        Ok((grants, next))
    }
}

#[async_trait]
impl ResourceProvisioner for RoleSyncer {
    async fn grant(&self, principal: &Resource, entitlement: &Entitlement) -> ConnectorResult<()> {
        ensure_team_member_principal(principal)?;

        let user_id = principal.id.numeric()?;
        let user = self.api.get_user(user_id).await?;
        if user.role == mapper::ROLE_END_USER {
            tracing::warn!(user_id, role = %user.role, "user must be a team member");
            return Err(ConnectorError::NotATeamMember {
                user_id: principal.id.id.clone(),
                role: user.role,
            });
        }

        let role_id = entitlement.resource_id.numeric()?;
        let role = self
            .api
            .create_custom_role(&format!("Custom Role {}", role_id))
            .await?;
        tracing::info!(role_id = role.id, name = %role.name, "custom role membership created");

        Ok(())
    }

    async fn revoke(&self, grant: &Grant) -> ConnectorResult<()> {
        // Upstream exposes no per-user role detachment; revokes settle on
        // the next sync pass.
        tracing::debug!(
            role_id = %grant.resource_id.id,
            principal_id = %grant.principal_id.id,
            "role revoke is a no-op"
        );
        Ok(())
    }
}
