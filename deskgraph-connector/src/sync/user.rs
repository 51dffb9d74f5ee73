//! User syncer: flat identity projection of every upstream account
//!
//! Users carry no entitlements or grants of their own; relationships live on
//! the team_member, group, org, and role kinds.

use crate::mapper;
use crate::sync::ResourceSyncer;
use async_trait::async_trait;
use deskgraph_client::{UpstreamApi, UserListOptions};
use deskgraph_core::{
    ConnectorResult, Entitlement, Grant, PageToken, Resource, ResourceId, ResourceKind,
};
use std::sync::Arc;

pub struct UserSyncer {
    api: Arc<dyn UpstreamApi>,
}

impl UserSyncer {
    pub fn new(api: Arc<dyn UpstreamApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_kind(&self) -> ResourceKind {
        ResourceKind::User
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
            .map(|user| mapper::user_resource(user, parent_id.cloned()))
            .collect();

        Ok((resources, next))
    }

    async fn entitlements(
        &self,
        _resource: &Resource,
        _page: &PageToken,
    ) -> ConnectorResult<(Vec<Entitlement>, Option<String>)> {
        Ok((Vec::new(), None))
    }

    async fn grants(
        &self,
        _resource: &Resource,
        _page: &PageToken,
    ) -> ConnectorResult<(Vec<Grant>, Option<String>)> {
        Ok((Vec::new(), None))
    }
}
