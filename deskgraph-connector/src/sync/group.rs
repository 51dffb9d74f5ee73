//! Group syncer: membership and admin grants per upstream group

use crate::mapper;
use crate::sync::{
    ensure_team_member_principal, membership_entitlement_pair, ResourceProvisioner, ResourceSyncer,
};
use async_trait::async_trait;
use deskgraph_client::UpstreamApi;
use deskgraph_core::{
    ConnectorError, ConnectorResult, Entitlement, Grant, PageToken, Resource, ResourceId,
    ResourceKind,
};
use std::sync::Arc;

pub(crate) const MEMBER_ENTITLEMENT: &str = "member";
pub(crate) const ADMIN_ENTITLEMENT: &str = "admin";

pub struct GroupSyncer {
    api: Arc<dyn UpstreamApi>,
}

impl GroupSyncer {
    pub fn new(api: Arc<dyn UpstreamApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResourceSyncer for GroupSyncer {
    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::Group
    }

    async fn list(
        &self,
        parent_id: Option<&ResourceId>,
        page: &PageToken,
    ) -> ConnectorResult<(Vec<Resource>, Option<String>)> {
        let (groups, next) = self.api.list_groups(page.page_number()?).await?;
        let resources = groups
            .iter()
            .map(|group| mapper::group_resource(group, parent_id.cloned()))
            .collect();
        Ok((resources, next))
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
        let group_id = resource.id.numeric()?;
        let (memberships, next) = self
            .api
            .group_memberships(group_id, page.page_number()?)
            .await?;

        let mut grants = Vec::new();
        for membership in &memberships {
            let user = self.api.get_user(membership.user_id).await?;
            let member = mapper::team_member_resource(&user, None);

            // Both directions of the relationship, so consumers can traverse
            // from either endpoint.
            grants.push(Grant::new(resource, MEMBER_ENTITLEMENT, member.id.clone()));
            grants.push(Grant::new(&member, MEMBER_ENTITLEMENT, resource.id.clone()));

            if user.role == mapper::ROLE_ADMIN {
                grants.push(Grant::new(resource, ADMIN_ENTITLEMENT, member.id.clone()));
                grants.push(Grant::new(&member, ADMIN_ENTITLEMENT, resource.id.clone()));
            }
        }

        Ok((grants, next))
    }
}

#[async_trait]
impl ResourceProvisioner for GroupSyncer {
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

        let group_id = entitlement.resource_id.numeric()?;
        let membership = self.api.create_group_membership(user_id, group_id).await?;
        tracing::info!(
            membership_id = membership.id,
            user_id = membership.user_id,
            group_id = membership.group_id,
            "group membership created"
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
        let group_id = grant.resource_id.numeric()?;

        match self.api.delete_group_membership(user_id, group_id).await? {
            Some(membership_id) => {
                tracing::info!(membership_id, user_id, group_id, "group membership revoked");
            }
            None => {
                // Already absent upstream; treat the revoke as settled.
                tracing::warn!(user_id, group_id, "group membership not found upstream");
            }
        }

        Ok(())
    }
}
